//! Record types: the persisted shape of each entity kind.
//!
//! Relations are foreign-key style — an id field plus a store lookup,
//! never a live reference. A dangling id is possible by design in one
//! place only: `Room.owner` survives the owner's deletion (the room
//! outlives its creator; lookups resolve the owner as absent).

use botrally_protocol::{
    RecordId, Registers, RobotId, RoomCode, RoomId, RoomStatus, UserId,
};

/// A player account.
///
/// Created empty: no robot, no room. `room` and `robot` are the two
/// relationships the coordinator maintains — at most one of each at any
/// time.
#[derive(Debug, Clone)]
pub struct User {
    /// Store key.
    pub id: UserId,
    /// Public identity, unique among all users.
    pub name: String,
    /// The robot this user owns, if they've chosen one.
    pub robot: Option<RobotId>,
    /// The room this user is currently in, if any.
    pub room: Option<RoomId>,
}

/// A shared game session.
///
/// Membership is derived, not stored: the members of a room are exactly
/// the users whose `room` field references it.
#[derive(Debug, Clone)]
pub struct Room {
    /// Store key.
    pub id: RoomId,
    /// The shareable code, unique among live rooms.
    pub code: RoomCode,
    /// Map identifier, opaque to the coordinator.
    pub map: String,
    /// The creating user. Immutable; may dangle after that user is
    /// deleted.
    pub owner: UserId,
    /// Lifecycle status, externally driven.
    pub status: RoomStatus,
}

/// A player's controllable game piece.
#[derive(Debug, Clone)]
pub struct Robot {
    /// Store key.
    pub id: RobotId,
    /// Display name; can be changed by re-choosing.
    pub name: String,
    /// Board position, unvalidated.
    pub x: i32,
    /// Board position, unvalidated.
    pub y: i32,
    /// Facing direction, free-form. Empty until first set.
    pub direction: String,
    /// The owning user. Immutable once set; the robot dies with its
    /// owner.
    pub owner: UserId,
}

/// One user's committed program for one round in one room.
///
/// Key invariant: at most one record per (user, room, round).
#[derive(Debug, Clone)]
pub struct ProgramRecord {
    /// Store key.
    pub id: RecordId,
    /// The submitting user.
    pub user: UserId,
    /// The room the round belongs to.
    pub room: RoomId,
    /// Round number, positive.
    pub round: u32,
    /// The five ordered instruction slots.
    pub registers: Registers,
}
