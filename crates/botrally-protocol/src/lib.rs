//! Shared types for Botrally.
//!
//! This crate defines the vocabulary the rest of the workspace speaks:
//!
//! - **Identity** ([`UserId`], [`RoomId`], [`RobotId`], [`RecordId`],
//!   [`RoomCode`]) — newtype ids for every entity kind.
//! - **Enums** ([`RoomStatus`]) — the room lifecycle states, driven
//!   externally by clients.
//! - **DTOs** ([`RoomInfo`], [`RobotInfo`], [`RoundEntry`]) — the shapes a
//!   transport adapter serializes back to clients.
//! - **Errors** ([`ProtocolError`]) — what can go wrong parsing
//!   client-supplied values.
//!
//! It sits below every other crate and knows nothing about storage or
//! coordination:
//!
//! ```text
//! Coordinator / Ledger (above) → Store → Protocol (this crate)
//! ```

mod error;
mod time;
mod types;

pub use error::ProtocolError;
pub use time::unix_millis;
pub use types::{
    RecordId, Registers, RobotId, RobotInfo, RoomCode, RoomId, RoomInfo,
    RoomStatus, RoundEntry, UserId, REGISTER_COUNT,
};
