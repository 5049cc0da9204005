//! Error types for the session layer.

use botrally_protocol::RoomCode;

/// Errors that can occur during session coordination.
///
/// Each variant carries the key that was missing or conflicting, which is
/// all a caller needs to retry or report — internal store details never
/// cross this boundary.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No user with this name exists.
    #[error("user {0:?} not found")]
    UserNotFound(String),

    /// No live room holds this code.
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The user name is already registered. Names are the public
    /// identity, so this is a hard conflict, not a retryable state.
    #[error("user name {0:?} is already taken")]
    NameTaken(String),

    /// The user is already in a room. A user belongs to at most one
    /// room, and creating a room makes its owner a member.
    #[error("user {0:?} is already in a room")]
    AlreadyInRoom(String),

    /// The operation needs the user to be in a room, and they aren't.
    #[error("user {0:?} is not in a room")]
    NotInRoom(String),

    /// The operation needs the user to own a robot, and they don't.
    #[error("user {0:?} has no robot")]
    NoRobot(String),

    /// Room-code allocation ran out of retries — every candidate code
    /// collided. Transient: the caller may simply try again.
    #[error("room code allocation failed after {attempts} attempts")]
    CodesExhausted {
        /// How many candidates were tried.
        attempts: u32,
    },
}
