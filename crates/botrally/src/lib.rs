//! # Botrally
//!
//! Session/state coordinator for a turn-based multiplayer
//! robot-programming game.
//!
//! Players join a shared room, each owns one robot, and every round each
//! player commits a five-register program that is later revealed
//! together. This crate ties the pieces into one service and one error
//! type; a transport adapter (HTTP or otherwise) binds the operations to
//! the wire and maps [`ErrorKind`] to status codes.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use botrally::{Botrally, CoordinatorConfig};
//!
//! # async fn demo() -> Result<(), botrally::BotrallyError> {
//! let service = Botrally::new(CoordinatorConfig::default());
//! service.coordinator().create_user("alice").await?;
//! let code = service.coordinator().create_room("alice", "map1").await?;
//! println!("room {code} is open");
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::{BotrallyError, ErrorKind};
pub use service::Botrally;

// Re-export the pieces adapters work with, so `botrally` alone is
// enough for most embedders.
pub use botrally_ledger::{LedgerError, RoundLedger};
pub use botrally_protocol::{
    ProtocolError, Registers, RobotInfo, RoomCode, RoomInfo, RoomStatus,
    RoundEntry,
};
pub use botrally_session::{
    CoordinatorConfig, SessionCoordinator, SessionError,
};
pub use botrally_store::{Store, StoreError};

/// Installs a process-wide `tracing` subscriber driven by `RUST_LOG`.
///
/// Call once from the binary entry point before serving requests. Does
/// nothing if a subscriber is already set (useful when tests install
/// their own).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
