//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `confhub_core` linkage, logging and database bootstrap.
//! - Schedule one sample event and print its outcome code.
//!
//! Configuration comes from `CONFHUB_LOG_LEVEL`, `CONFHUB_LOG_DIR` and
//! `CONFHUB_DB_PATH`.

use confhub_core::db::{open_db, open_db_in_memory};
use confhub_core::{
    core_version, init_logging, ping, AddEventRequest, CoreConfig, EventType, SchedulingFacade,
    SqliteEventRepository, SqliteRoomDirectory, SqliteUserDirectory, UserRole,
};
use std::error::Error;
use std::process::ExitCode;

const SAMPLE_ROOM: &str = "smoke-room";
const SAMPLE_ORGANIZER: &str = "smoke-organizer";
const SAMPLE_SPEAKER: &str = "smoke-speaker";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("confhub_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env();
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    println!("confhub_core ping={}", ping());
    println!("confhub_core version={}", core_version());

    let conn = match config.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let rooms = SqliteRoomDirectory::new(&conn);
    let users = SqliteUserDirectory::new(&conn);
    rooms.upsert_room(SAMPLE_ROOM, 10)?;
    users.upsert_user(SAMPLE_ORGANIZER, UserRole::Organizer)?;
    users.upsert_user(SAMPLE_SPEAKER, UserRole::Speaker)?;

    let events = SqliteEventRepository::try_new(&conn)?;
    let facade = SchedulingFacade::new(rooms, users);
    let report = facade.restore_from(&events)?;
    println!(
        "confhub_core restored={} rejected={}",
        report.restored,
        report.rejected.len()
    );

    let mut request = AddEventRequest::with_generated_id(
        EventType::SingleSpeaker,
        5,
        0,
        60 * 60 * 1000,
        SAMPLE_ROOM,
    );
    request.speaker_ids.push(SAMPLE_SPEAKER.to_string());
    let outcome = facade.schedule_event(SAMPLE_ORGANIZER, &request)?;
    println!("confhub_core sample_event outcome={outcome}");

    let saved = facade.persist_to(&events)?;
    println!("confhub_core persisted={saved}");
    Ok(())
}
