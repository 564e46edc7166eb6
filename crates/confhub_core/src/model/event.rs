//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical scheduled-event record owned by the event store.
//! - Define the request shape accepted by the add-event use case.
//! - Provide the read-only snapshot projection handed to callers.
//!
//! # Invariants
//! - `event_id`, `event_type`, times, `room_id` and `speaker_ids` never change
//!   after creation.
//! - `start_time < end_time`.
//! - `event_capacity >= speaker_ids.len() + attendee_ids.len()`.
//! - `attendee_ids` holds each user at most once.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Caller-chosen unique event identifier.
pub type EventId = String;

/// Unix epoch milliseconds.
pub type EpochMs = i64;

/// Event classification by permitted speaker count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Party or social slot with no speakers.
    NoSpeaker,
    /// Talk with exactly one speaker.
    SingleSpeaker,
    /// Panel with more than one speaker.
    MultiSpeaker,
}

impl EventType {
    /// Returns whether `count` speakers is legal for this event type.
    pub fn accepts_speaker_count(self, count: usize) -> bool {
        match self {
            Self::NoSpeaker => count == 0,
            Self::SingleSpeaker => count == 1,
            Self::MultiSpeaker => count > 1,
        }
    }

    /// Returns the storage/wire name of this event type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSpeaker => "no_speaker",
            Self::SingleSpeaker => "single_speaker",
            Self::MultiSpeaker => "multi_speaker",
        }
    }

    /// Parses a storage/wire name back into an event type.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "no_speaker" => Some(Self::NoSpeaker),
            "single_speaker" => Some(Self::SingleSpeaker),
            "multi_speaker" => Some(Self::MultiSpeaker),
            _ => None,
        }
    }
}

/// Input for the add-event use case.
///
/// IDs may carry surrounding whitespace; the engine trims them before any
/// check runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddEventRequest {
    pub event_type: EventType,
    pub event_capacity: u32,
    pub event_id: EventId,
    pub start_time: EpochMs,
    pub end_time: EpochMs,
    pub room_id: String,
    pub speaker_ids: Vec<String>,
    pub attendee_ids: Vec<String>,
}

impl AddEventRequest {
    /// Builds a request with a freshly generated event ID and no participants.
    pub fn with_generated_id(
        event_type: EventType,
        event_capacity: u32,
        start_time: EpochMs,
        end_time: EpochMs,
        room_id: impl Into<String>,
    ) -> Self {
        Self {
            event_type,
            event_capacity,
            event_id: Uuid::new_v4().to_string(),
            start_time,
            end_time,
            room_id: room_id.into(),
            speaker_ids: Vec::new(),
            attendee_ids: Vec::new(),
        }
    }

    /// Returns a copy with every ID trimmed and attendee IDs de-duplicated.
    ///
    /// Speaker IDs keep duplicates so the duplicate-speaker check can see them.
    pub fn normalized(&self) -> Self {
        let mut attendee_ids: Vec<String> = Vec::with_capacity(self.attendee_ids.len());
        for id in &self.attendee_ids {
            let trimmed = id.trim();
            if !attendee_ids.iter().any(|existing| existing == trimmed) {
                attendee_ids.push(trimmed.to_string());
            }
        }

        Self {
            event_type: self.event_type,
            event_capacity: self.event_capacity,
            event_id: self.event_id.trim().to_string(),
            start_time: self.start_time,
            end_time: self.end_time,
            room_id: self.room_id.trim().to_string(),
            speaker_ids: self
                .speaker_ids
                .iter()
                .map(|id| id.trim().to_string())
                .collect(),
            attendee_ids,
        }
    }

    /// Number of seats the request occupies on creation.
    pub fn participant_count(&self) -> usize {
        self.speaker_ids.len() + self.attendee_ids.len()
    }
}

impl From<EventSnapshot> for AddEventRequest {
    fn from(value: EventSnapshot) -> Self {
        Self {
            event_type: value.event_type,
            event_capacity: value.event_capacity,
            event_id: value.event_id,
            start_time: value.start_time,
            end_time: value.end_time,
            room_id: value.room_id,
            speaker_ids: value.speaker_ids,
            attendee_ids: value.attendee_ids,
        }
    }
}

/// Read-only projection of an event handed out of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSnapshot {
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub event_capacity: u32,
    pub event_id: EventId,
    pub start_time: EpochMs,
    pub end_time: EpochMs,
    pub room_id: String,
    pub speaker_ids: Vec<String>,
    pub attendee_ids: Vec<String>,
}

/// Scheduled event owned by the event store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    event_type: EventType,
    event_capacity: u32,
    event_id: EventId,
    start_time: EpochMs,
    end_time: EpochMs,
    room_id: String,
    speaker_ids: Vec<String>,
    attendee_ids: Vec<String>,
}

impl Event {
    /// Builds an event from a normalized request that passed every check.
    pub(crate) fn from_validated(request: AddEventRequest) -> Self {
        Self {
            event_type: request.event_type,
            event_capacity: request.event_capacity,
            event_id: request.event_id,
            start_time: request.start_time,
            end_time: request.end_time,
            room_id: request.room_id,
            speaker_ids: request.speaker_ids,
            attendee_ids: request.attendee_ids,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn event_capacity(&self) -> u32 {
        self.event_capacity
    }

    pub fn start_time(&self) -> EpochMs {
        self.start_time
    }

    pub fn end_time(&self) -> EpochMs {
        self.end_time
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    pub fn speaker_ids(&self) -> &[String] {
        &self.speaker_ids
    }

    pub fn attendee_ids(&self) -> &[String] {
        &self.attendee_ids
    }

    /// Seats taken by speakers and attendees together.
    pub fn occupied_seats(&self) -> usize {
        self.speaker_ids.len() + self.attendee_ids.len()
    }

    pub fn has_attendee(&self, user_id: &str) -> bool {
        self.attendee_ids.iter().any(|id| id == user_id)
    }

    pub fn has_speaker(&self, user_id: &str) -> bool {
        self.speaker_ids.iter().any(|id| id == user_id)
    }

    /// Returns a detached copy safe to hand to callers.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            event_type: self.event_type,
            event_capacity: self.event_capacity,
            event_id: self.event_id.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            room_id: self.room_id.clone(),
            speaker_ids: self.speaker_ids.clone(),
            attendee_ids: self.attendee_ids.clone(),
        }
    }

    pub(crate) fn push_attendee(&mut self, user_id: String) {
        self.attendee_ids.push(user_id);
    }

    /// Removes one attendee, keeping the order of the rest.
    pub(crate) fn remove_attendee(&mut self, user_id: &str) -> bool {
        match self.attendee_ids.iter().position(|id| id == user_id) {
            Some(index) => {
                self.attendee_ids.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_capacity(&mut self, capacity: u32) {
        self.event_capacity = capacity;
    }
}

#[cfg(test)]
mod tests {
    use super::{AddEventRequest, EventType};

    #[test]
    fn speaker_count_rules_follow_event_type() {
        assert!(EventType::NoSpeaker.accepts_speaker_count(0));
        assert!(!EventType::NoSpeaker.accepts_speaker_count(1));
        assert!(EventType::SingleSpeaker.accepts_speaker_count(1));
        assert!(!EventType::SingleSpeaker.accepts_speaker_count(2));
        assert!(!EventType::MultiSpeaker.accepts_speaker_count(1));
        assert!(EventType::MultiSpeaker.accepts_speaker_count(3));
    }

    #[test]
    fn normalized_trims_ids_and_dedups_attendees_only() {
        let request = AddEventRequest {
            event_type: EventType::MultiSpeaker,
            event_capacity: 10,
            event_id: " E1 ".to_string(),
            start_time: 0,
            end_time: 10,
            room_id: "R1\t".to_string(),
            speaker_ids: vec![" sA".to_string(), "sA ".to_string()],
            attendee_ids: vec!["a1".to_string(), " a1 ".to_string(), "a2".to_string()],
        };

        let normalized = request.normalized();
        assert_eq!(normalized.event_id, "E1");
        assert_eq!(normalized.room_id, "R1");
        assert_eq!(normalized.speaker_ids, vec!["sA", "sA"]);
        assert_eq!(normalized.attendee_ids, vec!["a1", "a2"]);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = AddEventRequest::with_generated_id(EventType::NoSpeaker, 5, 0, 1, "R1");
        let b = AddEventRequest::with_generated_id(EventType::NoSpeaker, 5, 0, 1, "R1");
        assert_ne!(a.event_id, b.event_id);
        assert!(a.speaker_ids.is_empty());
    }
}
