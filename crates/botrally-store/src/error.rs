//! Error types for the store layer.

use botrally_protocol::{RoomCode, RoomId, UserId};

/// Uniqueness violations detected at insert time.
///
/// These are the store's only failure modes — lookups return `Option`
/// and the in-memory tables cannot otherwise fail. Each variant carries
/// the conflicting key so callers can report which entity collided.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with this name already exists. User names are the public
    /// identity, so they must be unique.
    #[error("user name {0:?} is already taken")]
    NameTaken(String),

    /// A live room already holds this code. This is the commit-time
    /// uniqueness check the room-code allocator retries on.
    #[error("room code {0} is already in use")]
    CodeTaken(RoomCode),

    /// A record for this (user, room, round) key already exists —
    /// at most one submission per user per room per round.
    #[error("user {user} already submitted for round {round} in room {room}")]
    DuplicateRecord {
        /// The submitting user.
        user: UserId,
        /// The target room.
        room: RoomId,
        /// The duplicated round.
        round: u32,
    },
}
