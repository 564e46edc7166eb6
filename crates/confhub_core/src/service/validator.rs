//! Conflict and capacity predicates.
//!
//! # Responsibility
//! - Answer bookability questions against a read-only store snapshot.
//!
//! # Invariants
//! - Never mutates the store.
//! - Time intervals are half-open `[start, end)`: touching endpoints do not
//!   conflict.
//! - Unknown rooms never have room to spare: capacity predicates fail closed.

use crate::model::event::EpochMs;
use crate::repo::directory::RoomDirectory;
use crate::repo::RepoResult;
use crate::store::event_store::EventStore;

/// Returns whether `[s1, e1)` and `[s2, e2)` overlap.
pub fn intervals_overlap(s1: EpochMs, e1: EpochMs, s2: EpochMs, e2: EpochMs) -> bool {
    s1 < e2 && s2 < e1
}

/// Returns whether `ids` contains the same ID twice.
pub fn is_speaker_duplicate(ids: &[String]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(index, id)| ids[..index].contains(id))
}

/// Read-only view combining the event store with the room directory.
pub struct ConflictValidator<'a, R: RoomDirectory> {
    store: &'a EventStore,
    rooms: &'a R,
}

impl<'a, R: RoomDirectory> ConflictValidator<'a, R> {
    pub fn new(store: &'a EventStore, rooms: &'a R) -> Self {
        Self { store, rooms }
    }

    /// True iff an event in `room_id` overlaps `[start, end)`.
    pub fn is_double_booking_room(&self, room_id: &str, start: EpochMs, end: EpochMs) -> bool {
        self.store.iter().any(|event| {
            event.room_id() == room_id
                && intervals_overlap(event.start_time(), event.end_time(), start, end)
        })
    }

    /// True iff any of `speaker_ids` speaks at an event overlapping `[start, end)`.
    pub fn is_double_booking_speaker(
        &self,
        speaker_ids: &[String],
        start: EpochMs,
        end: EpochMs,
    ) -> bool {
        self.store.iter().any(|event| {
            intervals_overlap(event.start_time(), event.end_time(), start, end)
                && speaker_ids.iter().any(|id| event.has_speaker(id))
        })
    }

    /// True iff speakers plus attendees fill the event. Unknown events are not full.
    pub fn is_event_full(&self, event_id: &str) -> bool {
        self.store
            .get(event_id)
            .is_some_and(|event| event.occupied_seats() >= event.event_capacity() as usize)
    }

    /// True iff `count` people would not fit in the room.
    pub fn is_exceeding_room_capacity(&self, count: usize, room_id: &str) -> RepoResult<bool> {
        Ok(match self.rooms.capacity_of(room_id)? {
            Some(capacity) => count > capacity as usize,
            None => true,
        })
    }

    /// True iff an event capacity of `capacity` fits in the room.
    pub fn is_valid_event_capacity(&self, capacity: u32, room_id: &str) -> RepoResult<bool> {
        Ok(match self.rooms.capacity_of(room_id)? {
            Some(room_capacity) => capacity <= room_capacity,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{intervals_overlap, is_speaker_duplicate};

    #[test]
    fn touching_intervals_do_not_overlap() {
        assert!(!intervals_overlap(10, 20, 20, 30));
        assert!(!intervals_overlap(20, 30, 10, 20));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (10, 20, 15, 25, true),
            (10, 20, 12, 18, true),
            (10, 20, 10, 20, true),
            (10, 20, 0, 5, false),
            (10, 20, 19, 21, true),
        ];
        for (s1, e1, s2, e2, expected) in cases {
            assert_eq!(intervals_overlap(s1, e1, s2, e2), expected);
            assert_eq!(intervals_overlap(s2, e2, s1, e1), expected);
        }
    }

    #[test]
    fn duplicate_detection_catches_non_adjacent_repeats() {
        let ids = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        assert!(!is_speaker_duplicate(&ids(&[])));
        assert!(!is_speaker_duplicate(&ids(&["a", "b", "c"])));
        assert!(is_speaker_duplicate(&ids(&["a", "b", "a"])));
    }
}
