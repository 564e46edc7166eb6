//! SQLite-backed room and user directories.
//!
//! # Responsibility
//! - Serve `RoomDirectory` / `UserDirectory` lookups from the `rooms` and
//!   `users` tables.
//! - Offer upsert helpers used by account/room management and seeding.
//!
//! # Invariants
//! - Read paths reject unknown role names instead of skipping rows.

use crate::model::user::{UserId, UserRole};
use crate::repo::directory::{RoomDirectory, UserDirectory};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Room directory over the `rooms` table.
pub struct SqliteRoomDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRoomDirectory<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a room or updates its capacity.
    pub fn upsert_room(&self, room_id: &str, capacity: u32) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO rooms (room_id, capacity) VALUES (?1, ?2)
             ON CONFLICT(room_id) DO UPDATE SET capacity = excluded.capacity;",
            params![room_id.trim(), capacity],
        )?;
        Ok(())
    }
}

impl RoomDirectory for SqliteRoomDirectory<'_> {
    fn capacity_of(&self, room_id: &str) -> RepoResult<Option<u32>> {
        let capacity = self
            .conn
            .query_row(
                "SELECT capacity FROM rooms WHERE room_id = ?1;",
                [room_id],
                |row| row.get::<_, u32>(0),
            )
            .optional()?;
        Ok(capacity)
    }
}

/// User directory over the `users` table.
pub struct SqliteUserDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserDirectory<'conn> {
    /// Wraps a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a user or updates their role.
    pub fn upsert_user(&self, user_id: &str, role: UserRole) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO users (user_id, role) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET role = excluded.role;",
            params![user_id.trim(), role.as_str()],
        )?;
        Ok(())
    }
}

impl UserDirectory for SqliteUserDirectory<'_> {
    fn ids_by_role(&self, role: UserRole) -> RepoResult<Vec<UserId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT user_id FROM users WHERE role = ?1 ORDER BY user_id ASC;")?;
        let ids = stmt
            .query_map([role.as_str()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn role_of(&self, user_id: &str) -> RepoResult<Option<UserRole>> {
        let role_text = self
            .conn
            .query_row(
                "SELECT role FROM users WHERE user_id = ?1;",
                [user_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match role_text {
            Some(text) => UserRole::parse(&text).map(Some).ok_or_else(|| {
                RepoError::InvalidData(format!("invalid role `{text}` in users.role"))
            }),
            None => Ok(None),
        }
    }
}
