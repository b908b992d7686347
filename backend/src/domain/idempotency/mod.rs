//! Idempotent retries for subscription purchases.
//!
//! - [`IdempotencyKey`]: client-supplied UUID naming one purchase attempt.
//! - [`PayloadHash`]: SHA-256 of the canonicalised request payload, used to
//!   tell a genuine retry from a reused key.
//! - [`IdempotencyRecord`]: stored link between a key, the payload hash, and
//!   the subscription the first attempt produced.
//! - [`IdempotencyLookupResult`]: outcome of looking a key up.
//!
//! Keys are scoped per user: two users may send the same key without
//! colliding.

mod key;
mod payload;
mod record;

pub use key::{IdempotencyKey, IdempotencyKeyValidationError};
pub use payload::{PayloadHash, PayloadHashError, canonicalize_and_hash};
pub use record::{IdempotencyLookupQuery, IdempotencyLookupResult, IdempotencyRecord};
