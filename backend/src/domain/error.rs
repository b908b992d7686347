//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to response
//! envelopes (see [`crate::inbound::Envelope`]) or any other protocol-specific
//! shape. Every error carries a stable [`ErrorKind`] plus a message the
//! presentation layer may show verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error kind describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed or missing input; correctable by the user.
    #[serde(rename = "ValidationError")]
    Validation,
    /// Not authenticated, or the entitlement is insufficient.
    #[serde(rename = "AuthError")]
    Auth,
    /// A referenced identifier does not exist.
    #[serde(rename = "NotFoundError")]
    NotFound,
    /// An invariant would be violated, such as a second active subscription.
    #[serde(rename = "ConflictError")]
    Conflict,
    /// The caller acted on a resource owned by somebody else.
    #[serde(rename = "OwnershipError")]
    Ownership,
    /// The requested transition is illegal for the current state.
    #[serde(rename = "InvalidStateError")]
    InvalidState,
    /// An unexpected collaborator failure.
    #[serde(rename = "InternalError")]
    Internal,
}

impl ErrorKind {
    /// Stable wire name, matching the serialised form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::Auth => "AuthError",
            Self::NotFound => "NotFoundError",
            Self::Conflict => "ConflictError",
            Self::Ownership => "OwnershipError",
            Self::InvalidState => "InvalidStateError",
            Self::Internal => "InternalError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use place_directory::domain::{Error, ErrorKind};
///
/// let err = Error::new(ErrorKind::NotFound, "place not found");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// The message was blank.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Create a new error, panicking if validation fails.
    ///
    /// Callers in this crate only pass literal or formatted non-empty
    /// messages; use [`Error::try_new`] for caller-supplied text.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        match Self::try_new(kind, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            kind,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use place_directory::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::validation("name is required").with_details(json!({ "field": "name" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorKind::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Convenience constructor for [`ErrorKind::Auth`].
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Convenience constructor for [`ErrorKind::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Convenience constructor for [`ErrorKind::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Convenience constructor for [`ErrorKind::Ownership`].
    pub fn ownership(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Ownership, message)
    }

    /// Convenience constructor for [`ErrorKind::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, message)
    }

    /// Convenience constructor for [`ErrorKind::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    #[serde(rename = "errorKind")]
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            kind: value.kind,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            kind,
            message,
            details,
        } = value;

        let mut error = Error::try_new(kind, message)?;
        error.details = details;
        Ok(error)
    }
}
