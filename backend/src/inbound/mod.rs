//! Inbound adapters translating caller requests into domain service calls.
//!
//! [`DirectoryApi`] is the single entry point; transports wrap it and
//! serialise the [`Envelope`] it returns.

pub mod directory;
pub mod envelope;

pub use directory::{DirectoryApi, DirectoryPorts};
pub use envelope::Envelope;
