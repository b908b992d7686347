//! Place directory entitlement and moderation engine.
//!
//! The engine decides who may do what in a curated directory of places:
//! it derives effective privileges from stored roles and time-bounded
//! subscriptions, moderates user-submitted places, and gates advertisement
//! campaigns on entitlement and place ownership.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod startup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
