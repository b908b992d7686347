//! Port abstraction for idempotency key persistence.

use async_trait::async_trait;

use crate::domain::{IdempotencyLookupQuery, IdempotencyLookupResult, IdempotencyRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by idempotency repository adapters.
    pub enum IdempotencyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "idempotency repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "idempotency repository query failed: {message}",
        /// A record with this key already exists (concurrent insert race).
        DuplicateKey { message: String } => "idempotency key already exists: {message}",
    }
}

/// Storage for idempotency records, scoped per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdempotencyRepository: Send + Sync {
    /// Look up `query.key` for `query.user_id` and compare payload hashes.
    async fn lookup(
        &self,
        query: &IdempotencyLookupQuery,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError>;

    /// Store a record. Fails with [`IdempotencyRepositoryError::DuplicateKey`]
    /// when the user already stored the same key.
    async fn store(&self, record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError>;
}

/// Repository that never remembers anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdempotencyRepository;

#[async_trait]
impl IdempotencyRepository for FixtureIdempotencyRepository {
    async fn lookup(
        &self,
        _query: &IdempotencyLookupQuery,
    ) -> Result<IdempotencyLookupResult, IdempotencyRepositoryError> {
        Ok(IdempotencyLookupResult::NotFound)
    }

    async fn store(&self, _record: &IdempotencyRecord) -> Result<(), IdempotencyRepositoryError> {
        Ok(())
    }
}
