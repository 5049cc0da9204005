//! The session coordinator: every user/room/robot lifecycle operation.
//!
//! This is the central piece of the session layer. Each operation is one
//! logical transaction over the entity store — the whole effect runs
//! inside a single [`Store::write`] (or `read`) closure, so a cascade is
//! either fully applied or not applied at all, and no reader ever sees a
//! dangling cross-reference.
//!
//! ## Lifecycle ownership
//!
//! ```text
//! User ──owns──→ Robot          (robot dies with its user)
//!   │
//!   └─member-of─→ Room          (membership derived from User.room)
//!         │
//!         └──── ProgrammingRecords  (die with the room, or with the
//!                                    user's exit from it)
//! ```

use botrally_protocol::{
    unix_millis, RobotId, RobotInfo, RoomCode, RoomInfo, RoomStatus, UserId,
};
use botrally_store::Store;

use crate::{allocate, CoordinatorConfig, SessionError};

/// Coordinates user, room, and robot lifecycles over a shared store.
///
/// Cheap to clone — it's a store handle plus config. One instance (or
/// clone) per in-flight request is fine; all clones serialize through
/// the store's guard.
#[derive(Clone)]
pub struct SessionCoordinator {
    store: Store,
    config: CoordinatorConfig,
}

impl SessionCoordinator {
    /// Creates a coordinator over the given store handle.
    pub fn new(store: Store, config: CoordinatorConfig) -> Self {
        Self { store, config }
    }

    // -- Users ------------------------------------------------------------

    /// Registers a new user with no robot and no room.
    ///
    /// # Errors
    /// [`SessionError::NameTaken`] if the name is already registered.
    pub async fn create_user(&self, name: &str) -> Result<UserId, SessionError> {
        self.store
            .write(|t| {
                let id = t
                    .insert_user(name)
                    .map_err(|_| SessionError::NameTaken(name.to_string()))?;
                tracing::info!(%id, name, "user created");
                Ok(id)
            })
            .await
    }

    /// Deletes a user and everything they own: their robot (if any) and
    /// every programming record they submitted, in any room.
    ///
    /// Rooms the user created are NOT deleted — a room outlives its
    /// owner, whose name then resolves as absent in [`room_info`].
    ///
    /// [`room_info`]: Self::room_info
    ///
    /// # Errors
    /// [`SessionError::UserNotFound`]
    pub async fn delete_user(&self, name: &str) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let user = t
                    .user_by_name(name)
                    .cloned()
                    .ok_or_else(|| SessionError::UserNotFound(name.to_string()))?;
                if let Some(robot_id) = user.robot {
                    t.remove_robot(robot_id);
                }
                let records = t.remove_records_for_user(user.id);
                t.remove_user(user.id);
                tracing::info!(id = %user.id, name, records, "user deleted");
                Ok(())
            })
            .await
    }

    // -- Robots -----------------------------------------------------------

    /// Assigns a robot to a user.
    ///
    /// Lazily creates the robot on first choice; a re-choice renames the
    /// existing robot in place — identity, ownership, and position
    /// persist.
    ///
    /// # Errors
    /// [`SessionError::UserNotFound`]
    pub async fn choose_robot(
        &self,
        user_name: &str,
        robot_name: &str,
    ) -> Result<RobotId, SessionError> {
        self.store
            .write(|t| {
                let user = t
                    .user_by_name(user_name)
                    .cloned()
                    .ok_or_else(|| {
                        SessionError::UserNotFound(user_name.to_string())
                    })?;

                if let Some(robot_id) = user.robot {
                    if let Some(robot) = t.robot_mut(robot_id) {
                        robot.name = robot_name.to_string();
                    }
                    tracing::info!(%robot_id, user = user_name, name = robot_name, "robot renamed");
                    Ok(robot_id)
                } else {
                    let robot_id = t.insert_robot(robot_name, user.id);
                    if let Some(u) = t.user_mut(user.id) {
                        u.robot = Some(robot_id);
                    }
                    tracing::info!(%robot_id, user = user_name, name = robot_name, "robot created");
                    Ok(robot_id)
                }
            })
            .await
    }

    /// Deletes a user's robot and clears the ownership reference, as one
    /// unit.
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::NoRobot`] — the user never chose one
    pub async fn delete_robot(&self, user_name: &str) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let user = t
                    .user_by_name(user_name)
                    .cloned()
                    .ok_or_else(|| {
                        SessionError::UserNotFound(user_name.to_string())
                    })?;
                let robot_id = user
                    .robot
                    .ok_or_else(|| SessionError::NoRobot(user_name.to_string()))?;

                if let Some(u) = t.user_mut(user.id) {
                    u.robot = None;
                }
                t.remove_robot(robot_id);
                tracing::info!(%robot_id, user = user_name, "robot deleted");
                Ok(())
            })
            .await
    }

    /// Moves a user's robot to an absolute position. Range is the game
    /// client's concern, not validated here.
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::NoRobot`]
    pub async fn update_robot_position(
        &self,
        user_name: &str,
        x: i32,
        y: i32,
    ) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let robot_id = owned_robot(t, user_name)?;
                if let Some(robot) = t.robot_mut(robot_id) {
                    robot.x = x;
                    robot.y = y;
                }
                tracing::debug!(%robot_id, user = user_name, x, y, "robot moved");
                Ok(())
            })
            .await
    }

    /// Sets a user's robot facing direction (free-form string).
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::NoRobot`]
    pub async fn update_robot_direction(
        &self,
        user_name: &str,
        direction: &str,
    ) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let robot_id = owned_robot(t, user_name)?;
                if let Some(robot) = t.robot_mut(robot_id) {
                    robot.direction = direction.to_string();
                }
                tracing::debug!(%robot_id, user = user_name, direction, "robot turned");
                Ok(())
            })
            .await
    }

    /// Returns a snapshot of a user's robot.
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::NoRobot`]
    pub async fn robot_info(
        &self,
        user_name: &str,
    ) -> Result<RobotInfo, SessionError> {
        self.store
            .read(|t| {
                let user = t.user_by_name(user_name).ok_or_else(|| {
                    SessionError::UserNotFound(user_name.to_string())
                })?;
                let robot = user
                    .robot
                    .and_then(|id| t.robot(id))
                    .ok_or_else(|| SessionError::NoRobot(user_name.to_string()))?;
                Ok(RobotInfo {
                    name: robot.name.clone(),
                    x: robot.x,
                    y: robot.y,
                    direction: robot.direction.clone(),
                })
            })
            .await
    }

    // -- Rooms ------------------------------------------------------------

    /// Creates a room on a fresh unique code and makes the owner its
    /// first member.
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`] — owner missing
    /// - [`SessionError::AlreadyInRoom`] — owner is in a room
    /// - [`SessionError::CodesExhausted`] — allocation budget spent
    pub async fn create_room(
        &self,
        owner_name: &str,
        map: &str,
    ) -> Result<RoomCode, SessionError> {
        self.store
            .write(|t| {
                let owner = t
                    .user_by_name(owner_name)
                    .cloned()
                    .ok_or_else(|| {
                        SessionError::UserNotFound(owner_name.to_string())
                    })?;
                if owner.room.is_some() {
                    return Err(SessionError::AlreadyInRoom(
                        owner_name.to_string(),
                    ));
                }

                let mut rng = rand::rng();
                let (room_id, code) = allocate::insert_with_fresh_code(
                    t,
                    &mut rng,
                    &self.config,
                    map,
                    owner.id,
                )?;
                if let Some(u) = t.user_mut(owner.id) {
                    u.room = Some(room_id);
                }
                tracing::info!(%room_id, %code, owner = owner_name, map, "room created");
                Ok(code)
            })
            .await
    }

    /// Sets a room's lifecycle status. Transitions are externally
    /// driven; any of the three statuses can be set at any time.
    ///
    /// # Errors
    /// [`SessionError::RoomNotFound`]
    pub async fn update_room_status(
        &self,
        code: RoomCode,
        status: RoomStatus,
    ) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let room = t
                    .room_by_code_mut(code)
                    .ok_or(SessionError::RoomNotFound(code))?;
                room.status = status;
                tracing::info!(%code, %status, "room status updated");
                Ok(())
            })
            .await
    }

    /// Puts a user in a room. A user already in some room is moved —
    /// membership is exclusive, and the previous room's records are left
    /// untouched (only [`exit_room`]/[`delete_room`] cascade).
    ///
    /// [`exit_room`]: Self::exit_room
    /// [`delete_room`]: Self::delete_room
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::RoomNotFound`]
    pub async fn join_room(
        &self,
        user_name: &str,
        code: RoomCode,
    ) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                t.user_by_name(user_name).ok_or_else(|| {
                    SessionError::UserNotFound(user_name.to_string())
                })?;
                let room_id = t
                    .room_by_code(code)
                    .map(|r| r.id)
                    .ok_or(SessionError::RoomNotFound(code))?;
                if let Some(u) = t.user_by_name_mut(user_name) {
                    u.room = Some(room_id);
                }
                tracing::info!(user = user_name, %code, "user joined room");
                Ok(())
            })
            .await
    }

    /// Returns a snapshot of a room: owner name (empty if the owner was
    /// deleted), member names sorted ascending, map, status, and the
    /// server-side request time.
    ///
    /// # Errors
    /// [`SessionError::RoomNotFound`]
    pub async fn room_info(&self, code: RoomCode) -> Result<RoomInfo, SessionError> {
        let request_time = unix_millis();
        self.store
            .read(|t| {
                let room = t
                    .room_by_code(code)
                    .ok_or(SessionError::RoomNotFound(code))?;
                let mut users: Vec<String> = t
                    .members_of(room.id)
                    .into_iter()
                    .map(|u| u.name.clone())
                    .collect();
                users.sort();
                let owner = t
                    .user(room.owner)
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                Ok(RoomInfo {
                    owner,
                    users,
                    map: room.map.clone(),
                    game_status: room.status,
                    request_time,
                })
            })
            .await
    }

    /// Deletes a room: clears `room` on every member, removes the room,
    /// and removes every programming record referencing it — one atomic
    /// unit, so no member is ever left pointing at a dead room.
    ///
    /// # Errors
    /// [`SessionError::RoomNotFound`]
    pub async fn delete_room(&self, code: RoomCode) -> Result<(), SessionError> {
        self.store
            .write(|t| {
                let room_id = t
                    .room_by_code(code)
                    .map(|r| r.id)
                    .ok_or(SessionError::RoomNotFound(code))?;
                let members = t.clear_membership(room_id);
                let records = t.remove_records_for_room(room_id);
                t.remove_room(room_id);
                tracing::info!(%code, members, records, "room deleted");
                Ok(())
            })
            .await
    }

    /// Takes a user out of their current room and deletes their
    /// programming records for that room (all rounds). Returns the
    /// vacated room's code.
    ///
    /// # Errors
    /// - [`SessionError::UserNotFound`]
    /// - [`SessionError::NotInRoom`]
    pub async fn exit_room(&self, user_name: &str) -> Result<RoomCode, SessionError> {
        self.store
            .write(|t| {
                let user = t
                    .user_by_name(user_name)
                    .cloned()
                    .ok_or_else(|| {
                        SessionError::UserNotFound(user_name.to_string())
                    })?;
                let room_id = user
                    .room
                    .ok_or_else(|| SessionError::NotInRoom(user_name.to_string()))?;
                let code = t
                    .room(room_id)
                    .map(|r| r.code)
                    .ok_or_else(|| SessionError::NotInRoom(user_name.to_string()))?;

                if let Some(u) = t.user_mut(user.id) {
                    u.room = None;
                }
                let records = t.remove_records_for_member(user.id, room_id);
                tracing::info!(user = user_name, %code, records, "user exited room");
                Ok(code)
            })
            .await
    }
}

/// Resolves the robot a user owns, with the user-missing / no-robot
/// failure split both robot operations share.
fn owned_robot(
    t: &botrally_store::Tables,
    user_name: &str,
) -> Result<RobotId, SessionError> {
    let user = t
        .user_by_name(user_name)
        .ok_or_else(|| SessionError::UserNotFound(user_name.to_string()))?;
    user.robot
        .ok_or_else(|| SessionError::NoRobot(user_name.to_string()))
}

// =========================================================================
// Tests
// =========================================================================
