//! Error types for the ledger layer.

use botrally_protocol::RoomCode;

/// Errors that can occur while submitting or fetching round records.
///
/// Submission failures distinguish the three missing-precondition cases
/// so the transport adapter can report which key was at fault.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The submitting user does not exist.
    #[error("user {0:?} not found")]
    UserNotFound(String),

    /// No live room holds this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The user exists but is not currently a member of the target
    /// room — submissions are only accepted from inside the room.
    #[error("user {user:?} is not in room {code}")]
    NotInRoom {
        /// The submitting user.
        user: String,
        /// The target room's code.
        code: RoomCode,
    },

    /// A record for this (user, room, round) already exists. Round data
    /// integrity wants at most one program per player per round.
    #[error("user {user:?} already submitted for round {round} in room {code}")]
    DuplicateRecord {
        /// The submitting user.
        user: String,
        /// The target room's code.
        code: RoomCode,
        /// The duplicated round.
        round: u32,
    },

    /// Rounds are numbered from 1; round zero is meaningless.
    #[error("round number must be positive")]
    InvalidRound,
}
