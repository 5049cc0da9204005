//! Session coordination for Botrally.
//!
//! This crate owns the lifecycle state machine tying users, rooms, and
//! robots together:
//!
//! 1. **Coordination** — creation, deletion, joining, exiting, robot
//!    assignment and movement ([`SessionCoordinator`])
//! 2. **Room codes** — unique, human-shareable numbers allocated under
//!    optimistic retry (internal to room creation)
//! 3. **Cascades** — deleting an entity clears or removes everything
//!    referencing it, inside one atomic store unit
//!
//! # How it fits in the stack
//!
//! ```text
//! Transport adapter (above, external)  ← binds operations to HTTP
//!     ↕
//! Session layer (this crate)  ← relationships and cascades
//!     ↕
//! Store layer (below)  ← raw CRUD on the four record kinds
//! ```

mod allocate;
mod config;
mod coordinator;
mod error;

pub use config::CoordinatorConfig;
pub use coordinator::SessionCoordinator;
pub use error::SessionError;
