//! Outbound adapters implementing domain ports.
//!
//! - **memory**: a single in-process store implementing every persistence
//!   port and the package catalogue.
//! - **identity**: maps a request context onto a stored user.
//!
//! Adapters are thin translators. They contain no business logic beyond
//! the atomicity the ports require.

pub mod identity;
pub mod memory;

pub use identity::RepositoryIdentityProvider;
pub use memory::MemoryStore;
