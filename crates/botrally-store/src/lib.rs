//! The entity store: durable-shaped keyed storage for Botrally's four
//! record kinds.
//!
//! - **Records** ([`User`], [`Room`], [`Robot`], [`ProgramRecord`]) — the
//!   persisted shapes, cross-referencing each other by id, never by
//!   pointer.
//! - **Tables** ([`Tables`]) — the four keyed maps plus typed finders,
//!   filtered scans, and unique-constraint inserts.
//! - **Handle** ([`Store`]) — a cheap-clone handle whose `read`/`write`
//!   closures are the atomic units every multi-entity mutation runs in.
//! - **Errors** ([`StoreError`]) — uniqueness violations surfaced at
//!   commit time.
//!
//! The store provides raw CRUD only. Referential integrity — cascading
//! clears and deletes — is the coordinator's job, one layer up.

mod error;
mod handle;
mod record;
mod tables;

pub use error::StoreError;
pub use handle::Store;
pub use record::{ProgramRecord, Robot, Room, User};
pub use tables::Tables;
