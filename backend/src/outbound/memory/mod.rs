//! In-process adapter implementing every persistence port.
//!
//! All state lives behind one mutex so multi-step checks such as
//! "no active subscription, then insert" run as a single atomic unit.
//! Nothing is awaited while the lock is held.

mod advertisements;
mod catalogue;
mod idempotency;
mod places;
mod subscriptions;
mod users;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{
    Advertisement, IdempotencyKey, IdempotencyRecord, Package, Place, Subscription, User, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    places: Vec<Place>,
    subscriptions: Vec<Subscription>,
    advertisements: Vec<Advertisement>,
    packages: Vec<Package>,
    idempotency: HashMap<(UserId, IdempotencyKey), IdempotencyRecord>,
}

/// Shared in-memory store.
///
/// Share it behind an `Arc` and hand the same instance to every service;
/// it implements each repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

/// The store mutex was poisoned by a panicking writer.
#[derive(Debug, Clone, Copy)]
struct Poisoned;

impl Poisoned {
    fn message(self) -> &'static str {
        "in-memory store lock poisoned"
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose catalogue already holds `packages`.
    pub fn with_packages(packages: Vec<Package>) -> Self {
        Self {
            state: Mutex::new(StoreState {
                packages,
                ..StoreState::default()
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, Poisoned> {
        self.state.lock().map_err(|_| Poisoned)
    }
}
