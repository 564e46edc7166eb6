//! Scheduling facade consumed by UI and CLI layers.
//!
//! # Responsibility
//! - Resolve the explicitly passed acting user and enforce role permissions.
//! - Check room existence before handing event creation to the engine.
//! - Serialize all engine access behind one lock so every
//!   validate-then-mutate sequence is atomic.
//! - Rebuild and persist engine state through an `EventRepository`.
//!
//! # Invariants
//! - No ambient session: every mutating call names its actor.
//! - The engine lock is held for the whole of each operation.
//! - Replay goes through the same add-event checklist as live calls.

use crate::model::event::{AddEventRequest, EventSnapshot, EventType};
use crate::model::outcome::Outcome;
use crate::model::user::{UserId, UserRole};
use crate::repo::directory::{RoomDirectory, UserDirectory};
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoError;
use crate::service::engine::{SchedulingEngine, SchedulingError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard};

pub type FacadeResult<T> = Result<T, FacadeError>;

/// Errors surfaced to UI callers.
#[derive(Debug)]
pub enum FacadeError {
    /// Acting user is not registered in the user directory.
    UnknownActor(UserId),
    /// Acting user's role does not allow the operation.
    NotPermitted {
        actor: UserId,
        role: UserRole,
        action: &'static str,
    },
    /// Engine rule evaluation failed unexpectedly.
    Scheduling(SchedulingError),
    /// Directory or event repository failure.
    Repo(RepoError),
    /// A previous holder of the engine lock panicked.
    LockPoisoned,
}

impl Display for FacadeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownActor(actor) => write!(f, "unknown user: {actor}"),
            Self::NotPermitted {
                actor,
                role,
                action,
            } => write!(
                f,
                "user {actor} with role {} may not {action}",
                role.as_str()
            ),
            Self::Scheduling(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "scheduling engine lock poisoned"),
        }
    }
}

impl Error for FacadeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Scheduling(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SchedulingError> for FacadeError {
    fn from(value: SchedulingError) -> Self {
        Self::Scheduling(value)
    }
}

impl From<RepoError> for FacadeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Summary of a replay from persisted snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RestoreReport {
    /// Events re-added to the store.
    pub restored: usize,
    /// Snapshots refused by the checklist, with the refusing outcome.
    pub rejected: Vec<(String, Outcome)>,
}

/// Thread-safe boundary over one scheduling engine.
pub struct SchedulingFacade<R: RoomDirectory, U: UserDirectory> {
    engine: Mutex<SchedulingEngine<R, U>>,
}

impl<R: RoomDirectory, U: UserDirectory> SchedulingFacade<R, U> {
    pub fn new(rooms: R, users: U) -> Self {
        Self::from_engine(SchedulingEngine::new(rooms, users))
    }

    pub fn from_engine(engine: SchedulingEngine<R, U>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    fn lock(&self) -> FacadeResult<MutexGuard<'_, SchedulingEngine<R, U>>> {
        self.engine.lock().map_err(|_| FacadeError::LockPoisoned)
    }

    /// Creates an event on behalf of an organizer or admin.
    pub fn schedule_event(
        &self,
        actor_id: &str,
        request: &AddEventRequest,
    ) -> FacadeResult<Outcome> {
        let mut engine = self.lock()?;
        require_manager(&*engine, actor_id, "schedule events")?;

        if !engine.rooms().room_exists(request.room_id.trim())? {
            info!(
                "event=event_add module=facade status=rejected outcome={}",
                Outcome::RoomDne
            );
            return Ok(Outcome::RoomDne);
        }

        Ok(engine.add_event(request)?)
    }

    /// Signs the acting user up for an event.
    pub fn sign_up(&self, actor_id: &str, event_id: &str) -> FacadeResult<Outcome> {
        let mut engine = self.lock()?;
        require_known(&*engine, actor_id)?;
        Ok(engine.sign_up(actor_id, event_id)?)
    }

    /// Cancels the acting user's sign-up.
    pub fn cancel_sign_up(&self, actor_id: &str, event_id: &str) -> FacadeResult<Outcome> {
        let mut engine = self.lock()?;
        require_known(&*engine, actor_id)?;
        Ok(engine.cancel_sign_up(actor_id, event_id)?)
    }

    /// Changes an event's capacity within its own room.
    pub fn change_event_capacity(
        &self,
        actor_id: &str,
        event_id: &str,
        new_capacity: u32,
    ) -> FacadeResult<bool> {
        let mut engine = self.lock()?;
        require_manager(&*engine, actor_id, "change event capacity")?;

        let Some(event) = engine.get_event(event_id) else {
            return Ok(false);
        };
        Ok(engine.modify_event_capacity(&event.event_id, &event.room_id, new_capacity)?)
    }

    pub fn cancel_event(&self, actor_id: &str, event_id: &str) -> FacadeResult<bool> {
        let mut engine = self.lock()?;
        require_manager(&*engine, actor_id, "cancel events")?;
        Ok(engine.cancel_event_by_id(event_id))
    }

    pub fn cancel_events_by_type(
        &self,
        actor_id: &str,
        event_type: EventType,
    ) -> FacadeResult<bool> {
        let mut engine = self.lock()?;
        require_manager(&*engine, actor_id, "cancel events")?;
        Ok(engine.cancel_events_by_type(event_type))
    }

    pub fn cancel_events_by_size(
        &self,
        actor_id: &str,
        size: i64,
        at_least: bool,
    ) -> FacadeResult<bool> {
        let mut engine = self.lock()?;
        require_manager(&*engine, actor_id, "cancel events")?;
        Ok(engine.cancel_events_by_size(size, at_least))
    }

    pub fn list_events(&self) -> FacadeResult<Vec<EventSnapshot>> {
        Ok(self.lock()?.list_events())
    }

    /// Events the user attends or speaks at, by their role.
    pub fn my_schedule(&self, actor_id: &str) -> FacadeResult<Vec<EventSnapshot>> {
        let engine = self.lock()?;
        let role = require_known(&*engine, actor_id)?;
        Ok(match role {
            UserRole::Speaker => engine.events_for_speaker(actor_id),
            _ => engine.events_for_attendee(actor_id),
        })
    }

    /// Events the user could still sign up for.
    pub fn available_events(&self, actor_id: &str) -> FacadeResult<Vec<EventSnapshot>> {
        let engine = self.lock()?;
        require_known(&*engine, actor_id)?;
        Ok(engine.available_events(actor_id))
    }

    /// Replays persisted snapshots through the add-event checklist.
    pub fn restore_from<E: EventRepository>(&self, repo: &E) -> FacadeResult<RestoreReport> {
        let snapshots = repo.load_all()?;
        let mut engine = self.lock()?;
        let mut report = RestoreReport::default();

        for snapshot in snapshots {
            let event_id = snapshot.event_id.clone();
            match engine.add_event(&AddEventRequest::from(snapshot))? {
                Outcome::EventAdded => report.restored += 1,
                outcome => {
                    warn!(
                        "event=restore module=facade status=skipped event_id={} outcome={}",
                        event_id, outcome
                    );
                    report.rejected.push((event_id, outcome));
                }
            }
        }

        info!(
            "event=restore module=facade status=ok restored={} rejected={}",
            report.restored,
            report.rejected.len()
        );
        Ok(report)
    }

    /// Writes the current store through `repo`, replacing what it held.
    pub fn persist_to<E: EventRepository>(&self, repo: &E) -> FacadeResult<usize> {
        let snapshots = self.lock()?.list_events();
        repo.replace_all(&snapshots)?;
        info!(
            "event=persist module=facade status=ok events={}",
            snapshots.len()
        );
        Ok(snapshots.len())
    }
}

fn require_known<R: RoomDirectory, U: UserDirectory>(
    engine: &SchedulingEngine<R, U>,
    actor_id: &str,
) -> FacadeResult<UserRole> {
    let actor_id = actor_id.trim();
    engine
        .users()
        .role_of(actor_id)?
        .ok_or_else(|| FacadeError::UnknownActor(actor_id.to_string()))
}

fn require_manager<R: RoomDirectory, U: UserDirectory>(
    engine: &SchedulingEngine<R, U>,
    actor_id: &str,
    action: &'static str,
) -> FacadeResult<()> {
    let role = require_known(engine, actor_id)?;
    if !role.can_manage_events() {
        warn!(
            "event=permission module=facade status=denied role={} action={}",
            role.as_str(),
            action
        );
        return Err(FacadeError::NotPermitted {
            actor: actor_id.trim().to_string(),
            role,
            action,
        });
    }
    Ok(())
}
