//! The shared store handle and its atomic access units.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::Tables;

/// Cheap-clone handle to the shared tables.
///
/// One `Store` is created by the process entry point and a clone handed
/// to each component (coordinator, ledger); it is the only process-wide
/// shared mutable state.
///
/// # Atomicity
///
/// Every call to [`write`](Self::write) runs its closure under the single
/// write guard — that closure IS the atomic unit. A multi-entity mutation
/// (delete user + delete robot + delete records) performed inside one
/// closure can never be observed half-applied by any reader or writer.
/// [`read`](Self::read) takes the shared guard, so reads see a consistent
/// snapshot without blocking each other.
///
/// Closures are synchronous by design: holding the guard across an await
/// point would invite lock-ordering surprises, and nothing inside an
/// atomic unit needs to suspend.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    /// Creates a handle over a fresh, empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure under the shared guard.
    pub async fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Runs a mutating closure under the exclusive guard — one atomic
    /// unit.
    pub async fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }
}
