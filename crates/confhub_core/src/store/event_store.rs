//! Ordered in-memory event store.
//!
//! # Responsibility
//! - Own every scheduled `Event` for the process lifetime.
//! - Offer lookup by ID, ordered iteration and predicate-based removal.
//!
//! # Invariants
//! - Event IDs are unique within the store.
//! - Iteration order is insertion order.
//! - Only the scheduling engine holds `&mut EventStore`.

use crate::model::event::{Event, EventSnapshot};

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, event_id: &str) -> bool {
        self.get(event_id).is_some()
    }

    pub fn get(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.event_id() == event_id)
    }

    pub(crate) fn get_mut(&mut self, event_id: &str) -> Option<&mut Event> {
        self.events
            .iter_mut()
            .find(|event| event.event_id() == event_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Appends a validated event. Callers must have checked ID uniqueness.
    pub(crate) fn insert(&mut self, event: Event) {
        debug_assert!(!self.contains(event.event_id()));
        self.events.push(event);
    }

    /// Removes every event matching `predicate` and returns how many went.
    ///
    /// Each event is visited exactly once, in order.
    pub(crate) fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Event) -> bool,
    {
        let before = self.events.len();
        self.events.retain(|event| !predicate(event));
        before - self.events.len()
    }

    /// Returns detached copies of every event in insertion order.
    pub fn snapshots(&self) -> Vec<EventSnapshot> {
        self.events.iter().map(Event::snapshot).collect()
    }
}
