//! The `Botrally` service: one store, all components wired to it.

use botrally_ledger::RoundLedger;
use botrally_session::{CoordinatorConfig, SessionCoordinator};
use botrally_store::Store;

/// The assembled coordinator service.
///
/// Owns the store handle and hands out the coordinator and ledger views
/// that share it. A transport adapter constructs one of these at process
/// startup, keeps it for the process lifetime, and calls operations on
/// the two views from its request handlers — the store is the only
/// shared mutable state underneath.
#[derive(Clone)]
pub struct Botrally {
    store: Store,
    coordinator: SessionCoordinator,
    ledger: RoundLedger,
}

impl Botrally {
    /// Creates a service over a fresh, empty store.
    pub fn new(config: CoordinatorConfig) -> Self {
        let store = Store::new();
        Self {
            coordinator: SessionCoordinator::new(store.clone(), config),
            ledger: RoundLedger::new(store.clone()),
            store,
        }
    }

    /// The session coordinator: user/room/robot lifecycle operations.
    pub fn coordinator(&self) -> &SessionCoordinator {
        &self.coordinator
    }

    /// The round ledger: programming record submission and retrieval.
    pub fn ledger(&self) -> &RoundLedger {
        &self.ledger
    }

    /// The underlying store handle, for embedders that need direct
    /// access (tests, migration tooling).
    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Default for Botrally {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}
