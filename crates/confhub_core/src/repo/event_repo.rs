//! Event snapshot persistence.
//!
//! # Responsibility
//! - Serialize the event store (as `EventSnapshot`s) into SQLite.
//! - Load snapshots back in their original order so the store can be rebuilt
//!   by replaying them through the add-event checklist.
//!
//! # Invariants
//! - `replace_all` is atomic: either every snapshot is written or none.
//! - Speaker/attendee order is preserved via explicit `position` columns.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::event::{EventSnapshot, EventType};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Storage contract for event snapshots.
pub trait EventRepository {
    /// Replaces every stored event with `events`, keeping their order.
    fn replace_all(&self, events: &[EventSnapshot]) -> RepoResult<()>;
    /// Loads every stored event in saved order.
    fn load_all(&self) -> RepoResult<Vec<EventSnapshot>>;
}

/// SQLite-backed event snapshot repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn replace_all(&self, events: &[EventSnapshot]) -> RepoResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        // Child rows go with the cascade.
        tx.execute("DELETE FROM events;", [])?;

        for (position, event) in events.iter().enumerate() {
            insert_event_in_tx(&tx, position, event)?;
        }

        tx.commit()?;
        Ok(())
    }

    fn load_all(&self) -> RepoResult<Vec<EventSnapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_id, type, capacity, start_time, end_time, room_id
             FROM events
             ORDER BY position ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            let mut event = parse_event_row(row)?;
            event.speaker_ids = load_participants(
                self.conn,
                "SELECT speaker_id FROM event_speakers WHERE event_id = ?1 ORDER BY position ASC;",
                &event.event_id,
            )?;
            event.attendee_ids = load_participants(
                self.conn,
                "SELECT attendee_id FROM event_attendees WHERE event_id = ?1 ORDER BY position ASC;",
                &event.event_id,
            )?;
            events.push(event);
        }

        Ok(events)
    }
}

fn insert_event_in_tx(
    tx: &Transaction<'_>,
    position: usize,
    event: &EventSnapshot,
) -> RepoResult<()> {
    tx.execute(
        "INSERT INTO events (event_id, position, type, capacity, start_time, end_time, room_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            event.event_id.as_str(),
            position_to_db(position)?,
            event.event_type.as_str(),
            event.event_capacity,
            event.start_time,
            event.end_time,
            event.room_id.as_str(),
        ],
    )?;

    for (index, speaker_id) in event.speaker_ids.iter().enumerate() {
        tx.execute(
            "INSERT INTO event_speakers (event_id, position, speaker_id) VALUES (?1, ?2, ?3);",
            params![event.event_id.as_str(), position_to_db(index)?, speaker_id],
        )?;
    }
    for (index, attendee_id) in event.attendee_ids.iter().enumerate() {
        tx.execute(
            "INSERT INTO event_attendees (event_id, position, attendee_id) VALUES (?1, ?2, ?3);",
            params![event.event_id.as_str(), position_to_db(index)?, attendee_id],
        )?;
    }

    Ok(())
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<EventSnapshot> {
    let type_text: String = row.get("type")?;
    let event_type = EventType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid event type `{type_text}` in events.type"))
    })?;

    Ok(EventSnapshot {
        event_type,
        event_capacity: row.get("capacity")?,
        event_id: row.get("event_id")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        room_id: row.get("room_id")?,
        speaker_ids: Vec::new(),
        attendee_ids: Vec::new(),
    })
}

fn load_participants(conn: &Connection, sql: &str, event_id: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map([event_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ids)
}

fn position_to_db(position: usize) -> RepoResult<i64> {
    i64::try_from(position)
        .map_err(|_| RepoError::InvalidData(format!("position {position} out of range")))
}
