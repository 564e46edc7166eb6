//! Scheduling engine.
//!
//! # Responsibility
//! - Own the event store and apply every scheduling mutation to it.
//! - Evaluate add-event, sign-up and cancel rules in one fixed order and
//!   report the first violation as an `Outcome`.
//!
//! # Invariants
//! - Validation runs to completion before any mutation; a rejected call
//!   leaves the store untouched.
//! - No room or speaker is booked into two overlapping events.
//! - `event_capacity >= speakers + attendees` and
//!   `event_capacity <= room capacity` after every successful mutation.
//! - Directory failures surface as `SchedulingError`, never as outcomes.

use crate::model::event::{AddEventRequest, Event, EventSnapshot, EventType};
use crate::model::outcome::Outcome;
use crate::model::user::UserRole;
use crate::repo::directory::{RoomDirectory, UserDirectory};
use crate::repo::RepoError;
use crate::service::validator::{is_speaker_duplicate, ConflictValidator};
use crate::store::event_store::EventStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Unexpected failure while evaluating a scheduling rule.
#[derive(Debug)]
pub enum SchedulingError {
    /// Room or user directory lookup failed.
    Directory(RepoError),
}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directory(err) => write!(f, "directory lookup failed: {err}"),
        }
    }
}

impl Error for SchedulingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Directory(err) => Some(err),
        }
    }
}

impl From<RepoError> for SchedulingError {
    fn from(value: RepoError) -> Self {
        Self::Directory(value)
    }
}

/// Event store plus the directories its rules consult.
pub struct SchedulingEngine<R: RoomDirectory, U: UserDirectory> {
    store: EventStore,
    rooms: R,
    users: U,
}

impl<R: RoomDirectory, U: UserDirectory> SchedulingEngine<R, U> {
    /// Creates an engine with an empty store.
    pub fn new(rooms: R, users: U) -> Self {
        Self {
            store: EventStore::new(),
            rooms,
            users,
        }
    }

    pub fn rooms(&self) -> &R {
        &self.rooms
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    fn validator(&self) -> ConflictValidator<'_, R> {
        ConflictValidator::new(&self.store, &self.rooms)
    }

    /// Creates an event if every rule passes.
    ///
    /// Rules run in this order and the first failure is returned:
    /// room double booking, duplicate event ID, unknown room, participants
    /// over room capacity, event capacity over room capacity, empty time
    /// range, unknown speaker, speaker double booking, unknown attendee,
    /// attendees over room capacity, participants over event capacity,
    /// speaker count vs. event type, repeated speaker.
    pub fn add_event(&mut self, request: &AddEventRequest) -> SchedulingResult<Outcome> {
        let request = request.normalized();
        let outcome = self.check_add_event(&request)?;

        if outcome != Outcome::EventAdded {
            info!(
                "event=event_add module=engine status=rejected event_id={} outcome={}",
                request.event_id, outcome
            );
            return Ok(outcome);
        }

        info!(
            "event=event_add module=engine status=ok event_id={} room_id={} type={} capacity={}",
            request.event_id,
            request.room_id,
            request.event_type.as_str(),
            request.event_capacity
        );
        self.store.insert(Event::from_validated(request));
        Ok(Outcome::EventAdded)
    }

    fn check_add_event(&self, request: &AddEventRequest) -> SchedulingResult<Outcome> {
        let validator = self.validator();
        let room_id = request.room_id.as_str();

        if validator.is_double_booking_room(room_id, request.start_time, request.end_time) {
            return Ok(Outcome::DoubleBookRoom);
        }
        if self.store.contains(&request.event_id) {
            return Ok(Outcome::EventAlreadyExist);
        }
        if !self.rooms.room_exists(room_id)? {
            return Ok(Outcome::RoomDne);
        }
        if validator.is_exceeding_room_capacity(request.participant_count(), room_id)? {
            return Ok(Outcome::AttendeeOverload);
        }
        if !validator.is_valid_event_capacity(request.event_capacity, room_id)? {
            return Ok(Outcome::InvalidEventCapacity);
        }
        if request.start_time >= request.end_time {
            return Ok(Outcome::InvalidTimeSelection);
        }
        if !self.all_hold_role(&request.speaker_ids, UserRole::Speaker)? {
            return Ok(Outcome::SpeakerDne);
        }
        if validator.is_double_booking_speaker(
            &request.speaker_ids,
            request.start_time,
            request.end_time,
        ) {
            return Ok(Outcome::DoubleBookSpeaker);
        }
        if !self.all_hold_role(&request.attendee_ids, UserRole::Attendee)? {
            return Ok(Outcome::AttendeeDne);
        }
        if validator.is_exceeding_room_capacity(request.attendee_ids.len(), room_id)? {
            return Ok(Outcome::ExceedsRoomCapacity);
        }
        if request.participant_count() > request.event_capacity as usize {
            return Ok(Outcome::InvalidEventCapacity);
        }
        if !request
            .event_type
            .accepts_speaker_count(request.speaker_ids.len())
        {
            return Ok(Outcome::NumSpeakersMismatch);
        }
        if is_speaker_duplicate(&request.speaker_ids) {
            return Ok(Outcome::SameSpeakerAdded);
        }

        Ok(Outcome::EventAdded)
    }

    fn all_hold_role(&self, ids: &[String], role: UserRole) -> SchedulingResult<bool> {
        if ids.is_empty() {
            return Ok(true);
        }
        let known = self.users.ids_by_role(role)?;
        Ok(ids.iter().all(|id| known.contains(id)))
    }

    /// Adds `user_id` to the attendee list of `event_id`.
    pub fn sign_up(&mut self, user_id: &str, event_id: &str) -> SchedulingResult<Outcome> {
        let user_id = user_id.trim();
        let event_id = event_id.trim();
        let outcome = self.check_sign_up(user_id, event_id)?;

        if outcome == Outcome::SignupSuccess {
            if let Some(event) = self.store.get_mut(event_id) {
                event.push_attendee(user_id.to_string());
            }
        }

        debug!(
            "event=signup module=engine event_id={} user_id={} outcome={}",
            event_id, user_id, outcome
        );
        Ok(outcome)
    }

    fn check_sign_up(&self, user_id: &str, event_id: &str) -> SchedulingResult<Outcome> {
        let event = self.store.get(event_id);
        if event.is_some_and(|event| event.has_attendee(user_id)) {
            return Ok(Outcome::UserDoubleSignup);
        }
        if self.validator().is_event_full(event_id) {
            return Ok(Outcome::EventFull);
        }
        if event.is_none() {
            return Ok(Outcome::EventDne);
        }
        if !self.all_hold_role(&[user_id.to_string()], UserRole::Attendee)? {
            return Ok(Outcome::AttendeeDne);
        }
        Ok(Outcome::SignupSuccess)
    }

    /// Removes `user_id` from the attendee list of `event_id`.
    pub fn cancel_sign_up(&mut self, user_id: &str, event_id: &str) -> SchedulingResult<Outcome> {
        let user_id = user_id.trim();
        let event_id = event_id.trim();
        let outcome = self.check_cancel_sign_up(user_id, event_id)?;

        if outcome == Outcome::CancelSuccess {
            if let Some(event) = self.store.get_mut(event_id) {
                event.remove_attendee(user_id);
            }
        }

        debug!(
            "event=signup_cancel module=engine event_id={} user_id={} outcome={}",
            event_id, user_id, outcome
        );
        Ok(outcome)
    }

    fn check_cancel_sign_up(&self, user_id: &str, event_id: &str) -> SchedulingResult<Outcome> {
        let Some(event) = self.store.get(event_id) else {
            return Ok(Outcome::EventDne);
        };
        if !self.all_hold_role(&[user_id.to_string()], UserRole::Attendee)? {
            return Ok(Outcome::AttendeeDne);
        }
        if !event.has_attendee(user_id) {
            return Ok(Outcome::AttendeeNotInEvent);
        }
        Ok(Outcome::CancelSuccess)
    }

    /// Changes the capacity of an event held in `room_id`.
    ///
    /// Returns `false` without mutating when the event is missing, is not in
    /// `room_id`, or `new_capacity` would not fit the room or the people
    /// already in the event.
    pub fn modify_event_capacity(
        &mut self,
        event_id: &str,
        room_id: &str,
        new_capacity: u32,
    ) -> SchedulingResult<bool> {
        let event_id = event_id.trim();
        let room_id = room_id.trim();

        let Some(event) = self.store.get(event_id) else {
            return Ok(false);
        };
        if event.room_id() != room_id
            || (new_capacity as usize) < event.occupied_seats()
            || !self.validator().is_valid_event_capacity(new_capacity, room_id)?
        {
            info!(
                "event=capacity_change module=engine status=rejected event_id={} capacity={}",
                event_id, new_capacity
            );
            return Ok(false);
        }

        if let Some(event) = self.store.get_mut(event_id) {
            event.set_capacity(new_capacity);
        }
        info!(
            "event=capacity_change module=engine status=ok event_id={} capacity={}",
            event_id, new_capacity
        );
        Ok(true)
    }

    /// Removes the event with `event_id`. Returns whether one was removed.
    pub fn cancel_event_by_id(&mut self, event_id: &str) -> bool {
        let event_id = event_id.trim();
        let removed = self
            .store
            .remove_where(|event| event.event_id() == event_id);
        log_bulk_cancel("id", removed);
        removed > 0
    }

    /// Removes every event of `event_type`. Returns whether any was removed.
    pub fn cancel_events_by_type(&mut self, event_type: EventType) -> bool {
        let removed = self
            .store
            .remove_where(|event| event.event_type() == event_type);
        log_bulk_cancel("type", removed);
        removed > 0
    }

    /// Removes events by attendee count.
    ///
    /// With `at_least`, removes events with at least `size` attendees;
    /// otherwise only events with exactly `size`. A negative `size` is
    /// rejected without mutation.
    pub fn cancel_events_by_size(&mut self, size: i64, at_least: bool) -> bool {
        let Ok(size) = usize::try_from(size) else {
            log_bulk_cancel("size", 0);
            return false;
        };
        let removed = self.store.remove_where(|event| {
            let attendees = event.attendee_ids().len();
            if at_least {
                attendees >= size
            } else {
                attendees == size
            }
        });
        log_bulk_cancel("size", removed);
        removed > 0
    }

    /// Returns every event in insertion order.
    pub fn list_events(&self) -> Vec<EventSnapshot> {
        self.store.snapshots()
    }

    pub fn get_event(&self, event_id: &str) -> Option<EventSnapshot> {
        self.store.get(event_id.trim()).map(Event::snapshot)
    }

    /// Events `user_id` is signed up for.
    pub fn events_for_attendee(&self, user_id: &str) -> Vec<EventSnapshot> {
        let user_id = user_id.trim();
        self.collect_where(|event| event.has_attendee(user_id))
    }

    /// Events `user_id` speaks at.
    pub fn events_for_speaker(&self, user_id: &str) -> Vec<EventSnapshot> {
        let user_id = user_id.trim();
        self.collect_where(|event| event.has_speaker(user_id))
    }

    /// Events with a free seat that `user_id` has not joined yet.
    pub fn available_events(&self, user_id: &str) -> Vec<EventSnapshot> {
        let user_id = user_id.trim();
        let validator = self.validator();
        self.collect_where(|event| {
            !event.has_attendee(user_id) && !validator.is_event_full(event.event_id())
        })
    }

    fn collect_where<F>(&self, predicate: F) -> Vec<EventSnapshot>
    where
        F: Fn(&Event) -> bool,
    {
        self.store
            .iter()
            .filter(|event| predicate(*event))
            .map(Event::snapshot)
            .collect()
    }
}

fn log_bulk_cancel(by: &str, removed: usize) {
    info!(
        "event=event_cancel module=engine by={} status={} removed={}",
        by,
        if removed > 0 { "ok" } else { "noop" },
        removed
    );
}
