//! Scheduling domain model.
//!
//! # Responsibility
//! - Define the typed records shared by store, engine and persistence.
//! - Define the closed outcome taxonomy returned by scheduling operations.
//!
//! # Invariants
//! - An `Event` is only constructed by the scheduling engine after its
//!   ordered checklist has passed.
//! - Outside the engine, events are observed through `EventSnapshot` copies.

pub mod event;
pub mod outcome;
pub mod user;
