//! Serialisable result envelope returned by the directory facade.
//!
//! Success serialises as `{"ok": true, "data": ...}` and failure as
//! `{"ok": false, "errorKind": ..., "message": ...}` with optional
//! `details`. Internal failures are redacted before they leave the engine.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::error;

use crate::domain::{Error, ErrorKind};

/// Outcome of one facade operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Ok(T),
    Err(Error),
}

impl<T> Envelope<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// The payload, if the operation succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ok(data) => Some(data),
            Self::Err(_) => None,
        }
    }

    /// The unredacted error, if the operation failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Ok(_) => None,
            Self::Err(err) => Some(err),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error().map(Error::kind)
    }

    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Self::Ok(data) => Ok(data),
            Self::Err(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, Error>> for Envelope<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Self::Ok(data),
            Err(err) => {
                if err.kind() == ErrorKind::Internal {
                    error!(error = %err, "internal failure reported to caller");
                }
                Self::Err(err)
            }
        }
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if error.kind() == ErrorKind::Internal {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Ok(data) => {
                let mut state = serializer.serialize_struct("Envelope", 2)?;
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Self::Err(err) => {
                let visible = redact_if_internal(err);
                let mut state = serializer.serialize_struct("Envelope", 4)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("errorKind", &visible.kind())?;
                state.serialize_field("message", visible.message())?;
                match visible.details() {
                    Some(details) => state.serialize_field("details", details)?,
                    None => state.skip_field("details")?,
                }
                state.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    #[rstest]
    fn success_carries_data() {
        let envelope = Envelope::<Vec<u32>>::from(Ok(vec![1, 2]));
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(value, json!({ "ok": true, "data": [1, 2] }));
    }

    #[rstest]
    fn unit_success_serialises_null_data() {
        let envelope = Envelope::<()>::from(Ok(()));
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(value, json!({ "ok": true, "data": null }));
    }

    #[rstest]
    #[case(Error::auth("advertising requires a premium subscription"), "AuthError")]
    #[case(Error::conflict("already subscribed"), "ConflictError")]
    #[case(Error::invalid_state("place is pending"), "InvalidStateError")]
    fn failure_exposes_kind_and_message(#[case] err: Error, #[case] kind: &str) {
        let message = err.message().to_owned();
        let envelope = Envelope::<Value>::from(Err(err));
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(
            value,
            json!({ "ok": false, "errorKind": kind, "message": message })
        );
    }

    #[rstest]
    fn failure_keeps_details() {
        let err = Error::validation("name is required").with_details(json!({ "field": "name" }));
        let envelope = Envelope::<()>::from(Err(err));
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(value["details"], json!({ "field": "name" }));
    }

    #[rstest]
    fn internal_failures_are_redacted() {
        let err = Error::internal("place repository unavailable: pool exhausted")
            .with_details(json!({ "host": "db-1" }));
        let envelope = Envelope::<()>::from(Err(err.clone()));
        let value = serde_json::to_value(&envelope).expect("serialise");

        assert_eq!(
            value,
            json!({ "ok": false, "errorKind": "InternalError", "message": "Internal server error" })
        );
        assert_eq!(envelope.error(), Some(&err));
    }
}
