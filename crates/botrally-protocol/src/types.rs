//! Core identity types, enums, and wire DTOs.
//!
//! Everything here either keys an entity in the store or travels back to
//! clients through a transport adapter. The DTOs serialize with camelCase
//! field names to match the wire format clients already expect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a user.
///
/// Newtype wrapper over `u64` — you can't accidentally pass a [`RoomId`]
/// where a `UserId` is expected. `#[serde(transparent)]` serializes it as
/// the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a room.
///
/// This is the store's internal key, not the shareable code players type
/// in — that's [`RoomCode`]. Cross-entity references (`User.room`,
/// `ProgramRecord.room`) use this id, so a room can never be confused
/// with its human-facing number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RM-{}", self.0)
    }
}

/// A unique identifier for a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RobotId(pub u64);

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B-{}", self.0)
    }
}

/// A unique identifier for a programming record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PR-{}", self.0)
    }
}

/// The shareable room number players exchange out of band.
///
/// Codes are allocated sparsely (highest live code plus a random jitter)
/// so they stay short but aren't trivially guessable sequences. Unique
/// among live rooms; a deleted room's code may be reused later.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct RoomCode(pub u32);

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RoomStatus
// ---------------------------------------------------------------------------

/// The lifecycle status of a room.
///
/// ```text
/// WAITING → IN_PROGRESS → FINISHED
/// ```
///
/// Transitions are externally driven — clients tell the coordinator when
/// the game starts and ends, the server never advances the status on its
/// own. The wire spelling is the SCREAMING_SNAKE form shown above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    /// Room exists and members are gathering. The initial status.
    Waiting,
    /// The game is being played.
    InProgress,
    /// The game ended; the room lingers until deleted.
    Finished,
}

impl RoomStatus {
    /// Returns `true` for a freshly created room's status.
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::Waiting)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Waiting => "WAITING",
            Self::InProgress => "IN_PROGRESS",
            Self::Finished => "FINISHED",
        };
        f.write_str(s)
    }
}

impl FromStr for RoomStatus {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "FINISHED" => Ok(Self::Finished),
            other => Err(ProtocolError::UnknownStatus(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Registers
// ---------------------------------------------------------------------------

/// The number of instruction registers in one program.
pub const REGISTER_COUNT: usize = 5;

/// One round's program: five ordered instruction slots.
///
/// The tokens are opaque to the coordinator — instruction legality is the
/// game client's concern. Serializes transparently as a five-element
/// array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registers(pub [String; REGISTER_COUNT]);

impl Registers {
    /// Builds a program from any five stringy tokens.
    pub fn new<S: Into<String>>(slots: [S; REGISTER_COUNT]) -> Self {
        Self(slots.map(Into::into))
    }

    /// The ordered slots.
    pub fn slots(&self) -> &[String; REGISTER_COUNT] {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Snapshot of a room returned by the `roomInfo` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    /// The owner's user name. Empty string if the owning user has been
    /// deleted — the room outlives its owner.
    pub owner: String,
    /// Names of every user currently in the room, sorted ascending.
    pub users: Vec<String>,
    /// The map the room was created with.
    pub map: String,
    /// Current lifecycle status.
    pub game_status: RoomStatus,
    /// Server-side wall-clock time of the query, Unix millis.
    pub request_time: u64,
}

/// Snapshot of a robot returned by the `getRobotInfo` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobotInfo {
    /// The robot's display name.
    pub name: String,
    /// Board position. Numeric and unvalidated — the game client owns
    /// the board bounds.
    pub x: i32,
    /// Board position.
    pub y: i32,
    /// Facing direction, free-form. Empty until first set.
    pub direction: String,
}

/// One user's submission for one round, as returned by
/// `getProgrammingRecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundEntry {
    /// The submitting user's name.
    pub username: String,
    /// The five committed registers.
    pub registers: Registers,
    /// Which round this program belongs to.
    pub round: u32,
    /// Server-side wall-clock time of the query, Unix millis. The same
    /// value is stamped on every entry of one response.
    pub request_time: u64,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -- Identity ---------------------------------------------------------

    #[test]
    fn test_ids_serialize_transparently() {
        assert_eq!(serde_json::to_string(&UserId(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&RoomCode(100)).unwrap(), "100");
    }

    #[test]
    fn test_ids_display_with_prefix() {
        assert_eq!(UserId(7).to_string(), "U-7");
        assert_eq!(RoomId(3).to_string(), "RM-3");
        assert_eq!(RobotId(1).to_string(), "B-1");
        assert_eq!(RecordId(42).to_string(), "PR-42");
        // Room codes are human-shareable, so no prefix.
        assert_eq!(RoomCode(181).to_string(), "181");
    }

    // -- RoomStatus -------------------------------------------------------

    #[test]
    fn test_room_status_wire_spelling_round_trips() {
        for (status, wire) in [
            (RoomStatus::Waiting, "WAITING"),
            (RoomStatus::InProgress, "IN_PROGRESS"),
            (RoomStatus::Finished, "FINISHED"),
        ] {
            assert_eq!(status.to_string(), wire);
            assert_eq!(wire.parse::<RoomStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{wire}\"")
            );
        }
    }

    #[test]
    fn test_room_status_unknown_string_is_rejected() {
        let err = "PAUSED".parse::<RoomStatus>().unwrap_err();
        assert!(err.to_string().contains("PAUSED"));
    }

    #[test]
    fn test_room_status_is_waiting() {
        assert!(RoomStatus::Waiting.is_waiting());
        assert!(!RoomStatus::InProgress.is_waiting());
        assert!(!RoomStatus::Finished.is_waiting());
    }

    // -- Registers --------------------------------------------------------

    #[test]
    fn test_registers_serialize_as_array() {
        let regs = Registers::new(["MOVE1", "MOVE2", "TURN_L", "TURN_R", "BACKUP"]);
        let json = serde_json::to_string(&regs).unwrap();
        assert_eq!(
            json,
            r#"["MOVE1","MOVE2","TURN_L","TURN_R","BACKUP"]"#
        );
        let back: Registers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, regs);
    }

    // -- DTOs -------------------------------------------------------------

    #[test]
    fn test_room_info_uses_camel_case_fields() {
        let info = RoomInfo {
            owner: "alice".to_string(),
            users: vec!["alice".to_string(), "bob".to_string()],
            map: "map1".to_string(),
            game_status: RoomStatus::Waiting,
            request_time: 1_700_000_000_000,
        };
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"gameStatus\":\"WAITING\""));
        assert!(json.contains("\"requestTime\":1700000000000"));
    }

    #[test]
    fn test_round_entry_uses_camel_case_fields() {
        let entry = RoundEntry {
            username: "bob".to_string(),
            registers: Registers::new(["a", "b", "c", "d", "e"]),
            round: 3,
            request_time: 1,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"username\":\"bob\""));
        assert!(json.contains("\"requestTime\":1"));
    }
}
