//! Core scheduling logic for ConfHub.
//! This crate is the single source of truth for booking invariants:
//! no double-booked room, no double-booked speaker, no capacity overflow.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{AddEventRequest, EpochMs, Event, EventId, EventSnapshot, EventType};
pub use model::outcome::Outcome;
pub use model::user::{UserId, UserRole};
pub use repo::directory::{
    InMemoryRoomDirectory, InMemoryUserDirectory, RoomDirectory, UserDirectory,
};
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::sqlite_directory::{SqliteRoomDirectory, SqliteUserDirectory};
pub use repo::{RepoError, RepoResult};
pub use service::engine::{SchedulingEngine, SchedulingError, SchedulingResult};
pub use service::facade::{FacadeError, FacadeResult, RestoreReport, SchedulingFacade};
pub use store::event_store::EventStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
