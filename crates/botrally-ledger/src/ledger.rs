//! Submission and retrieval of per-round programming records.

use botrally_protocol::{unix_millis, RecordId, Registers, RoomCode, RoundEntry};
use botrally_store::Store;

use crate::LedgerError;

/// Accumulates per-round submissions and answers round queries.
///
/// Cheap to clone — it's just a store handle. Retrieval never gates on
/// completeness: clients poll [`records`](Self::records) freely and can
/// consult [`round_complete`](Self::round_complete) when they want to
/// reveal programs only after everyone has committed.
#[derive(Clone)]
pub struct RoundLedger {
    store: Store,
}

impl RoundLedger {
    /// Creates a ledger over the given store handle.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Records one user's program for one round of one room.
    ///
    /// The user must currently be a member of that room — being in some
    /// other room (or none) is rejected, and a second submission for the
    /// same round is a conflict.
    ///
    /// # Errors
    /// - [`LedgerError::InvalidRound`] — `round` is zero
    /// - [`LedgerError::UserNotFound`] / [`LedgerError::RoomNotFound`]
    /// - [`LedgerError::NotInRoom`] — user isn't in the target room
    /// - [`LedgerError::DuplicateRecord`] — already submitted this round
    pub async fn submit(
        &self,
        user_name: &str,
        code: RoomCode,
        round: u32,
        registers: Registers,
    ) -> Result<RecordId, LedgerError> {
        if round == 0 {
            return Err(LedgerError::InvalidRound);
        }
        self.store
            .write(|t| {
                let user = t
                    .user_by_name(user_name)
                    .cloned()
                    .ok_or_else(|| {
                        LedgerError::UserNotFound(user_name.to_string())
                    })?;
                let room_id = t
                    .room_by_code(code)
                    .map(|r| r.id)
                    .ok_or(LedgerError::RoomNotFound(code))?;
                if user.room != Some(room_id) {
                    return Err(LedgerError::NotInRoom {
                        user: user_name.to_string(),
                        code,
                    });
                }

                // insert_record's only failure mode is the duplicate key.
                let id = t
                    .insert_record(user.id, room_id, round, registers)
                    .map_err(|_| LedgerError::DuplicateRecord {
                        user: user_name.to_string(),
                        code,
                        round,
                    })?;
                tracing::info!(%id, user = user_name, %code, round, "program submitted");
                Ok(id)
            })
            .await
    }

    /// Returns every submission for one round of one room, each entry
    /// stamped with the same server-side request time.
    ///
    /// Order is unspecified; callers needing determinism sort by
    /// username. Does not gate on completeness.
    ///
    /// # Errors
    /// [`LedgerError::RoomNotFound`]
    pub async fn records(
        &self,
        code: RoomCode,
        round: u32,
    ) -> Result<Vec<RoundEntry>, LedgerError> {
        let request_time = unix_millis();
        self.store
            .read(|t| {
                let room_id = t
                    .room_by_code(code)
                    .map(|r| r.id)
                    .ok_or(LedgerError::RoomNotFound(code))?;
                let entries = t
                    .records_for_round(room_id, round)
                    .into_iter()
                    .map(|rec| RoundEntry {
                        username: t
                            .user(rec.user)
                            .map(|u| u.name.clone())
                            .unwrap_or_default(),
                        registers: rec.registers.clone(),
                        round: rec.round,
                        request_time,
                    })
                    .collect();
                Ok(entries)
            })
            .await
    }

    /// Whether every current member of the room has submitted for the
    /// given round.
    ///
    /// Derived on demand, never stored. An empty room is never complete —
    /// there is nobody whose program could be revealed.
    ///
    /// # Errors
    /// [`LedgerError::RoomNotFound`]
    pub async fn round_complete(
        &self,
        code: RoomCode,
        round: u32,
    ) -> Result<bool, LedgerError> {
        self.store
            .read(|t| {
                let room_id = t
                    .room_by_code(code)
                    .map(|r| r.id)
                    .ok_or(LedgerError::RoomNotFound(code))?;
                let members = t.members_of(room_id);
                Ok(!members.is_empty()
                    && members
                        .iter()
                        .all(|u| t.has_record(u.id, room_id, round)))
            })
            .await
    }
}

// =========================================================================
// Tests
// =========================================================================
