use confhub_core::db::{open_db, open_db_in_memory};
use confhub_core::{
    AddEventRequest, EventRepository, EventSnapshot, EventType, Outcome, RepoError,
    RoomDirectory, SchedulingFacade, SqliteEventRepository, SqliteRoomDirectory,
    SqliteUserDirectory, UserDirectory, UserRole,
};
use rusqlite::Connection;

fn seed(conn: &Connection) {
    let rooms = SqliteRoomDirectory::new(conn);
    rooms.upsert_room("R1", 40).unwrap();
    rooms.upsert_room("R2", 10).unwrap();

    let users = SqliteUserDirectory::new(conn);
    users.upsert_user("org", UserRole::Organizer).unwrap();
    users.upsert_user("sA", UserRole::Speaker).unwrap();
    users.upsert_user("sB", UserRole::Speaker).unwrap();
    users.upsert_user("a1", UserRole::Attendee).unwrap();
    users.upsert_user("a2", UserRole::Attendee).unwrap();
}

fn panel() -> AddEventRequest {
    AddEventRequest {
        event_type: EventType::MultiSpeaker,
        event_capacity: 8,
        event_id: "panel".to_string(),
        start_time: 10_000,
        end_time: 20_000,
        room_id: "R2".to_string(),
        speaker_ids: vec!["sB".to_string(), "sA".to_string()],
        attendee_ids: vec!["a2".to_string()],
    }
}

fn social() -> AddEventRequest {
    AddEventRequest {
        event_type: EventType::NoSpeaker,
        event_capacity: 40,
        event_id: "social".to_string(),
        start_time: 20_000,
        end_time: 30_000,
        room_id: "R1".to_string(),
        speaker_ids: Vec::new(),
        attendee_ids: Vec::new(),
    }
}

#[test]
fn sqlite_directories_serve_lookups() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);

    let rooms = SqliteRoomDirectory::new(&conn);
    assert_eq!(rooms.capacity_of("R1").unwrap(), Some(40));
    assert!(!rooms.room_exists("R9").unwrap());
    rooms.upsert_room("R1", 45).unwrap();
    assert_eq!(rooms.capacity_of("R1").unwrap(), Some(45));

    let users = SqliteUserDirectory::new(&conn);
    assert_eq!(users.ids_by_role(UserRole::Speaker).unwrap(), vec!["sA", "sB"]);
    assert_eq!(users.role_of("org").unwrap(), Some(UserRole::Organizer));
    assert_eq!(users.role_of("ghost").unwrap(), None);
}

#[test]
fn malformed_role_rows_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;")
        .unwrap();
    conn.execute(
        "INSERT INTO users (user_id, role) VALUES ('x', 'wizard');",
        [],
    )
    .unwrap();

    let users = SqliteUserDirectory::new(&conn);
    assert!(matches!(
        users.role_of("x"),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn event_repository_preserves_order_and_participants() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let snapshots: Vec<EventSnapshot> = vec![
        snapshot_of(social()),
        snapshot_of(panel()),
    ];
    repo.replace_all(&snapshots).unwrap();
    assert_eq!(repo.load_all().unwrap(), snapshots);

    repo.replace_all(&snapshots[1..]).unwrap();
    assert_eq!(repo.load_all().unwrap(), snapshots[1..].to_vec());
}

#[test]
fn persist_then_restore_reproduces_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("confhub.sqlite3");

    let saved = {
        let conn = open_db(&path).unwrap();
        seed(&conn);
        let facade =
            SchedulingFacade::new(SqliteRoomDirectory::new(&conn), SqliteUserDirectory::new(&conn));
        assert_eq!(facade.schedule_event("org", &panel()).unwrap(), Outcome::EventAdded);
        assert_eq!(facade.schedule_event("org", &social()).unwrap(), Outcome::EventAdded);
        assert_eq!(facade.sign_up("a1", "social").unwrap(), Outcome::SignupSuccess);

        let repo = SqliteEventRepository::try_new(&conn).unwrap();
        assert_eq!(facade.persist_to(&repo).unwrap(), 2);
        facade.list_events().unwrap()
    };

    let conn = open_db(&path).unwrap();
    let facade =
        SchedulingFacade::new(SqliteRoomDirectory::new(&conn), SqliteUserDirectory::new(&conn));
    let repo = SqliteEventRepository::try_new(&conn).unwrap();
    let report = facade.restore_from(&repo).unwrap();

    assert_eq!(report.restored, 2);
    assert!(report.rejected.is_empty());
    assert_eq!(facade.list_events().unwrap(), saved);
}

#[test]
fn restore_skips_snapshots_that_break_current_rules() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let repo = SqliteEventRepository::try_new(&conn).unwrap();

    let mut clash = snapshot_of(social());
    clash.event_id = "clash".to_string();
    repo.replace_all(&[snapshot_of(social()), clash]).unwrap();

    let facade =
        SchedulingFacade::new(SqliteRoomDirectory::new(&conn), SqliteUserDirectory::new(&conn));
    let report = facade.restore_from(&repo).unwrap();

    assert_eq!(report.restored, 1);
    assert_eq!(
        report.rejected,
        vec![("clash".to_string(), Outcome::DoubleBookRoom)]
    );
}

fn snapshot_of(request: AddEventRequest) -> EventSnapshot {
    EventSnapshot {
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
