//! Room and user directory contracts.
//!
//! # Responsibility
//! - Expose the two lookups the scheduling engine needs from account and
//!   room management: room capacity and users by role.
//! - Provide in-memory implementations for tests, demos and replay.
//!
//! # Invariants
//! - A user holds exactly one role.
//! - `capacity_of` returns `None` iff `room_exists` returns `false`.

use crate::model::user::{UserId, UserRole};
use crate::repo::RepoResult;
use std::collections::BTreeMap;

/// Lookup of room ID -> seating capacity.
pub trait RoomDirectory {
    /// Returns the seating capacity of a room, `None` for unknown rooms.
    fn capacity_of(&self, room_id: &str) -> RepoResult<Option<u32>>;

    /// Returns whether a room is registered.
    fn room_exists(&self, room_id: &str) -> RepoResult<bool> {
        Ok(self.capacity_of(room_id)?.is_some())
    }
}

/// Lookup of user ID -> role.
pub trait UserDirectory {
    /// Lists every user ID holding `role`.
    fn ids_by_role(&self, role: UserRole) -> RepoResult<Vec<UserId>>;

    /// Returns the role of one user, `None` for unknown users.
    fn role_of(&self, user_id: &str) -> RepoResult<Option<UserRole>>;

    /// Returns whether `user_id` holds `role`.
    fn has_role(&self, user_id: &str, role: UserRole) -> RepoResult<bool> {
        Ok(self.role_of(user_id)? == Some(role))
    }
}

/// In-memory room directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoomDirectory {
    rooms: BTreeMap<String, u32>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::insert_room`].
    pub fn with_room(mut self, room_id: impl Into<String>, capacity: u32) -> Self {
        self.insert_room(room_id, capacity);
        self
    }

    /// Registers a room or replaces its capacity.
    pub fn insert_room(&mut self, room_id: impl Into<String>, capacity: u32) {
        self.rooms.insert(room_id.into(), capacity);
    }
}

impl RoomDirectory for InMemoryRoomDirectory {
    fn capacity_of(&self, room_id: &str) -> RepoResult<Option<u32>> {
        Ok(self.rooms.get(room_id).copied())
    }
}

/// In-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: BTreeMap<UserId, UserRole>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::insert_user`].
    pub fn with_user(mut self, user_id: impl Into<UserId>, role: UserRole) -> Self {
        self.insert_user(user_id, role);
        self
    }

    /// Registers a user or replaces their role.
    pub fn insert_user(&mut self, user_id: impl Into<UserId>, role: UserRole) {
        self.users.insert(user_id.into(), role);
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn ids_by_role(&self, role: UserRole) -> RepoResult<Vec<UserId>> {
        Ok(self
            .users
            .iter()
            .filter(|(_, user_role)| **user_role == role)
            .map(|(user_id, _)| user_id.clone())
            .collect())
    }

    fn role_of(&self, user_id: &str) -> RepoResult<Option<UserRole>> {
        Ok(self.users.get(user_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryRoomDirectory, InMemoryUserDirectory, RoomDirectory, UserDirectory};
    use crate::model::user::UserRole;

    #[test]
    fn room_exists_follows_capacity_lookup() {
        let rooms = InMemoryRoomDirectory::new().with_room("R1", 50);
        assert!(rooms.room_exists("R1").unwrap());
        assert!(!rooms.room_exists("R2").unwrap());
        assert_eq!(rooms.capacity_of("R1").unwrap(), Some(50));
    }

    #[test]
    fn ids_by_role_filters_and_sorts() {
        let users = InMemoryUserDirectory::new()
            .with_user("b", UserRole::Attendee)
            .with_user("sA", UserRole::Speaker)
            .with_user("a", UserRole::Attendee);

        assert_eq!(users.ids_by_role(UserRole::Attendee).unwrap(), vec!["a", "b"]);
        assert_eq!(users.ids_by_role(UserRole::Admin).unwrap(), Vec::<String>::new());
        assert!(users.has_role("sA", UserRole::Speaker).unwrap());
        assert!(!users.has_role("sA", UserRole::Attendee).unwrap());
    }
}
