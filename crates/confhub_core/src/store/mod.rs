//! In-memory authoritative event state.

pub mod event_store;
