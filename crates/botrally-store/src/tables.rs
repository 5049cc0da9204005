//! The four entity tables and their typed accessors.
//!
//! `Tables` is a plain registry — keyed maps with O(1) id lookup and
//! linear filtered scans, mirroring the CRUD-plus-simple-filters contract
//! of a document store. It is NOT thread-safe by itself; concurrent
//! access goes through the [`Store`](crate::Store) handle, which wraps it
//! in a lock. Keeping the locking out of this type means every method
//! here is straight-line code that's easy to reason about inside an
//! atomic unit.

use std::collections::HashMap;

use botrally_protocol::{
    RecordId, Registers, RobotId, RoomCode, RoomId, RoomStatus, UserId,
};

use crate::{ProgramRecord, Robot, Room, StoreError, User};

/// All persisted state: one map per record kind, plus the id source.
#[derive(Debug, Default)]
pub struct Tables {
    users: HashMap<UserId, User>,
    rooms: HashMap<RoomId, Room>,
    robots: HashMap<RobotId, Robot>,
    records: HashMap<RecordId, ProgramRecord>,

    /// Monotonic id source shared by all kinds. Ids are never reused,
    /// so a stale reference can't silently resolve to a new entity.
    next_id: u64,
}

impl Tables {
    /// Creates an empty set of tables.
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // -- Users ------------------------------------------------------------

    /// Inserts a new user with no robot and no room.
    ///
    /// # Errors
    /// [`StoreError::NameTaken`] if a user with this name exists.
    pub fn insert_user(&mut self, name: &str) -> Result<UserId, StoreError> {
        if self.user_by_name(name).is_some() {
            return Err(StoreError::NameTaken(name.to_string()));
        }
        let id = UserId(self.fresh_id());
        self.users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                robot: None,
                room: None,
            },
        );
        Ok(id)
    }

    /// Looks up a user by id.
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Looks up a user by id, mutably.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Finds a user by their unique name.
    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.values().find(|u| u.name == name)
    }

    /// Finds a user by name, mutably.
    pub fn user_by_name_mut(&mut self, name: &str) -> Option<&mut User> {
        self.users.values_mut().find(|u| u.name == name)
    }

    /// All users whose `room` field references the given room.
    ///
    /// This is how membership is derived — rooms don't store a member
    /// list. Order is map order; callers needing determinism sort.
    pub fn members_of(&self, room: RoomId) -> Vec<&User> {
        self.users
            .values()
            .filter(|u| u.room == Some(room))
            .collect()
    }

    /// Clears the `room` field on every member of the given room.
    /// Returns how many users were affected.
    pub fn clear_membership(&mut self, room: RoomId) -> usize {
        let mut cleared = 0;
        for user in self.users.values_mut() {
            if user.room == Some(room) {
                user.room = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Removes a user, returning the removed record.
    pub fn remove_user(&mut self, id: UserId) -> Option<User> {
        self.users.remove(&id)
    }

    /// Number of users.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    // -- Rooms ------------------------------------------------------------

    /// Inserts a new room in `WAITING` status.
    ///
    /// # Errors
    /// [`StoreError::CodeTaken`] if a live room already holds `code` —
    /// this is the uniqueness check the code allocator retries under.
    pub fn insert_room(
        &mut self,
        code: RoomCode,
        map: &str,
        owner: UserId,
    ) -> Result<RoomId, StoreError> {
        if self.room_by_code(code).is_some() {
            return Err(StoreError::CodeTaken(code));
        }
        let id = RoomId(self.fresh_id());
        self.rooms.insert(
            id,
            Room {
                id,
                code,
                map: map.to_string(),
                owner,
                status: RoomStatus::Waiting,
            },
        );
        Ok(id)
    }

    /// Looks up a room by id.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Finds a room by its shareable code.
    pub fn room_by_code(&self, code: RoomCode) -> Option<&Room> {
        self.rooms.values().find(|r| r.code == code)
    }

    /// Finds a room by code, mutably.
    pub fn room_by_code_mut(&mut self, code: RoomCode) -> Option<&mut Room> {
        self.rooms.values_mut().find(|r| r.code == code)
    }

    /// The highest code among live rooms, if any room exists.
    ///
    /// The allocator seeds its next candidate from this.
    pub fn highest_code(&self) -> Option<RoomCode> {
        self.rooms.values().map(|r| r.code).max()
    }

    /// Removes a room, returning the removed record.
    pub fn remove_room(&mut self, id: RoomId) -> Option<Room> {
        self.rooms.remove(&id)
    }

    /// Number of live rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    // -- Robots -----------------------------------------------------------

    /// Inserts a new robot at the origin with no facing direction.
    pub fn insert_robot(&mut self, name: &str, owner: UserId) -> RobotId {
        let id = RobotId(self.fresh_id());
        self.robots.insert(
            id,
            Robot {
                id,
                name: name.to_string(),
                x: 0,
                y: 0,
                direction: String::new(),
                owner,
            },
        );
        id
    }

    /// Looks up a robot by id.
    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(&id)
    }

    /// Looks up a robot by id, mutably.
    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(&id)
    }

    /// Removes a robot, returning the removed record.
    pub fn remove_robot(&mut self, id: RobotId) -> Option<Robot> {
        self.robots.remove(&id)
    }

    /// Number of robots.
    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    // -- Programming records ----------------------------------------------

    /// Inserts a programming record.
    ///
    /// # Errors
    /// [`StoreError::DuplicateRecord`] if a record for this
    /// (user, room, round) key already exists.
    pub fn insert_record(
        &mut self,
        user: UserId,
        room: RoomId,
        round: u32,
        registers: Registers,
    ) -> Result<RecordId, StoreError> {
        if self.has_record(user, room, round) {
            return Err(StoreError::DuplicateRecord { user, room, round });
        }
        let id = RecordId(self.fresh_id());
        self.records.insert(
            id,
            ProgramRecord {
                id,
                user,
                room,
                round,
                registers,
            },
        );
        Ok(id)
    }

    /// Whether a record exists for this (user, room, round) key.
    pub fn has_record(&self, user: UserId, room: RoomId, round: u32) -> bool {
        self.records
            .values()
            .any(|r| r.user == user && r.room == room && r.round == round)
    }

    /// All records for one round of one room. Order is map order.
    pub fn records_for_round(
        &self,
        room: RoomId,
        round: u32,
    ) -> Vec<&ProgramRecord> {
        self.records
            .values()
            .filter(|r| r.room == room && r.round == round)
            .collect()
    }

    /// Deletes every record submitted by the given user, across all
    /// rooms and rounds. Returns how many were removed.
    pub fn remove_records_for_user(&mut self, user: UserId) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| r.user != user);
        before - self.records.len()
    }

    /// Deletes every record referencing the given room, all rounds.
    /// Returns how many were removed.
    pub fn remove_records_for_room(&mut self, room: RoomId) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| r.room != room);
        before - self.records.len()
    }

    /// Deletes one user's records for one room, all rounds. This is the
    /// exit-room cascade. Returns how many were removed.
    pub fn remove_records_for_member(
        &mut self,
        user: UserId,
        room: RoomId,
    ) -> usize {
        let before = self.records.len();
        self.records.retain(|_, r| !(r.user == user && r.room == room));
        before - self.records.len()
    }

    /// Number of programming records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn regs() -> Registers {
        Registers::new(["r1", "r2", "r3", "r4", "r5"])
    }

    // -- Users ------------------------------------------------------------

    #[test]
    fn test_insert_user_starts_empty() {
        let mut t = Tables::new();
        let id = t.insert_user("alice").unwrap();
        let user = t.user(id).unwrap();
        assert_eq!(user.name, "alice");
        assert!(user.robot.is_none());
        assert!(user.room.is_none());
    }

    #[test]
    fn test_insert_user_duplicate_name_rejected() {
        let mut t = Tables::new();
        t.insert_user("alice").unwrap();
        let err = t.insert_user("alice").unwrap_err();
        assert!(matches!(err, StoreError::NameTaken(n) if n == "alice"));
        assert_eq!(t.user_count(), 1);
    }

    #[test]
    fn test_user_by_name_finds_the_right_one() {
        let mut t = Tables::new();
        t.insert_user("alice").unwrap();
        let bob = t.insert_user("bob").unwrap();
        assert_eq!(t.user_by_name("bob").unwrap().id, bob);
        assert!(t.user_by_name("carol").is_none());
    }

    #[test]
    fn test_members_of_derives_membership_from_user_refs() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let b = t.insert_user("bob").unwrap();
        t.insert_user("carol").unwrap();
        let room = t.insert_room(RoomCode(100), "map1", a).unwrap();
        t.user_mut(a).unwrap().room = Some(room);
        t.user_mut(b).unwrap().room = Some(room);

        let mut names: Vec<_> =
            t.members_of(room).iter().map(|u| u.name.clone()).collect();
        names.sort();
        assert_eq!(names, ["alice", "bob"]);
    }

    #[test]
    fn test_clear_membership_only_touches_that_room() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let b = t.insert_user("bob").unwrap();
        let r1 = t.insert_room(RoomCode(100), "m", a).unwrap();
        let r2 = t.insert_room(RoomCode(150), "m", b).unwrap();
        t.user_mut(a).unwrap().room = Some(r1);
        t.user_mut(b).unwrap().room = Some(r2);

        assert_eq!(t.clear_membership(r1), 1);
        assert!(t.user(a).unwrap().room.is_none());
        assert_eq!(t.user(b).unwrap().room, Some(r2));
    }

    // -- Rooms ------------------------------------------------------------

    #[test]
    fn test_insert_room_duplicate_code_rejected() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        t.insert_room(RoomCode(100), "map1", a).unwrap();
        let err = t.insert_room(RoomCode(100), "map2", a).unwrap_err();
        assert!(matches!(err, StoreError::CodeTaken(RoomCode(100))));
        assert_eq!(t.room_count(), 1);
    }

    #[test]
    fn test_insert_room_starts_waiting() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let id = t.insert_room(RoomCode(100), "map1", a).unwrap();
        assert_eq!(t.room(id).unwrap().status, RoomStatus::Waiting);
    }

    #[test]
    fn test_highest_code_none_when_no_rooms() {
        let t = Tables::new();
        assert!(t.highest_code().is_none());
    }

    #[test]
    fn test_highest_code_tracks_max() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        t.insert_room(RoomCode(100), "m", a).unwrap();
        t.insert_room(RoomCode(181), "m", a).unwrap();
        t.insert_room(RoomCode(140), "m", a).unwrap();
        assert_eq!(t.highest_code(), Some(RoomCode(181)));
    }

    #[test]
    fn test_remove_room_frees_its_code() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let id = t.insert_room(RoomCode(100), "m", a).unwrap();
        t.remove_room(id).unwrap();
        // Code is reusable once the room is gone.
        t.insert_room(RoomCode(100), "m", a).unwrap();
    }

    // -- Robots -----------------------------------------------------------

    #[test]
    fn test_insert_robot_defaults() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let id = t.insert_robot("R2D2", a);
        let robot = t.robot(id).unwrap();
        assert_eq!(robot.name, "R2D2");
        assert_eq!((robot.x, robot.y), (0, 0));
        assert_eq!(robot.direction, "");
        assert_eq!(robot.owner, a);
    }

    // -- Records ----------------------------------------------------------

    #[test]
    fn test_insert_record_duplicate_key_rejected() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let room = t.insert_room(RoomCode(100), "m", a).unwrap();
        t.insert_record(a, room, 3, regs()).unwrap();

        let err = t.insert_record(a, room, 3, regs()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateRecord { round: 3, .. }
        ));
        assert_eq!(t.record_count(), 1);
    }

    #[test]
    fn test_insert_record_same_user_different_round_ok() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let room = t.insert_room(RoomCode(100), "m", a).unwrap();
        t.insert_record(a, room, 1, regs()).unwrap();
        t.insert_record(a, room, 2, regs()).unwrap();
        assert_eq!(t.record_count(), 2);
    }

    #[test]
    fn test_records_for_round_filters_room_and_round() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let b = t.insert_user("bob").unwrap();
        let r1 = t.insert_room(RoomCode(100), "m", a).unwrap();
        let r2 = t.insert_room(RoomCode(150), "m", b).unwrap();
        t.insert_record(a, r1, 1, regs()).unwrap();
        t.insert_record(b, r1, 1, regs()).unwrap();
        t.insert_record(a, r1, 2, regs()).unwrap();
        t.insert_record(b, r2, 1, regs()).unwrap();

        assert_eq!(t.records_for_round(r1, 1).len(), 2);
        assert_eq!(t.records_for_round(r1, 2).len(), 1);
        assert_eq!(t.records_for_round(r2, 2).len(), 0);
    }

    #[test]
    fn test_remove_records_for_member_spares_other_rooms() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        let r1 = t.insert_room(RoomCode(100), "m", a).unwrap();
        let r2 = t.insert_room(RoomCode(150), "m", a).unwrap();
        t.insert_record(a, r1, 1, regs()).unwrap();
        t.insert_record(a, r1, 2, regs()).unwrap();
        t.insert_record(a, r2, 1, regs()).unwrap();

        assert_eq!(t.remove_records_for_member(a, r1), 2);
        assert_eq!(t.record_count(), 1);
        assert!(t.has_record(a, r2, 1));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut t = Tables::new();
        let a = t.insert_user("alice").unwrap();
        t.remove_user(a);
        let b = t.insert_user("bob").unwrap();
        assert_ne!(a, b);
    }
}
