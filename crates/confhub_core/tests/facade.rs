use confhub_core::{
    AddEventRequest, EventType, FacadeError, InMemoryRoomDirectory, InMemoryUserDirectory,
    Outcome, SchedulingFacade, UserRole,
};
use std::sync::Arc;
use std::thread;

type Facade = SchedulingFacade<InMemoryRoomDirectory, InMemoryUserDirectory>;

fn facade() -> Facade {
    let rooms = InMemoryRoomDirectory::new().with_room("R1", 30);
    let mut users = InMemoryUserDirectory::new()
        .with_user("org", UserRole::Organizer)
        .with_user("root", UserRole::Admin)
        .with_user("sA", UserRole::Speaker);
    for index in 0..16 {
        users.insert_user(format!("a{index}"), UserRole::Attendee);
    }
    SchedulingFacade::new(rooms, users)
}

fn workshop(capacity: u32) -> AddEventRequest {
    let mut request = AddEventRequest::with_generated_id(
        EventType::SingleSpeaker,
        capacity,
        1_000,
        5_000,
        "R1",
    );
    request.event_id = "workshop".to_string();
    request.speaker_ids.push("sA".to_string());
    request
}

#[test]
fn only_managers_can_schedule_and_cancel() {
    let facade = facade();

    let err = facade.schedule_event("a1", &workshop(5)).unwrap_err();
    assert!(matches!(
        err,
        FacadeError::NotPermitted {
            role: UserRole::Attendee,
            ..
        }
    ));
    let err = facade.schedule_event("nobody", &workshop(5)).unwrap_err();
    assert!(matches!(err, FacadeError::UnknownActor(ref id) if id == "nobody"));

    assert_eq!(
        facade.schedule_event("org", &workshop(5)).unwrap(),
        Outcome::EventAdded
    );
    assert!(facade.cancel_event("sA", "workshop").is_err());
    assert!(facade.cancel_event("root", "workshop").unwrap());
    assert!(facade.list_events().unwrap().is_empty());
}

#[test]
fn unknown_room_is_reported_before_engine_checks() {
    let facade = facade();
    let mut request = workshop(5);
    request.room_id = "basement".to_string();
    request.start_time = 9_000;

    assert_eq!(
        facade.schedule_event("org", &request).unwrap(),
        Outcome::RoomDne
    );
}

#[test]
fn sign_up_uses_explicit_actor() {
    let facade = facade();
    facade.schedule_event("org", &workshop(5)).unwrap();

    assert_eq!(
        facade.sign_up("a1", "workshop").unwrap(),
        Outcome::SignupSuccess
    );
    assert!(matches!(
        facade.sign_up("stranger", "workshop"),
        Err(FacadeError::UnknownActor(_))
    ));
    assert_eq!(
        facade.sign_up("org", "workshop").unwrap(),
        Outcome::AttendeeDne
    );

    assert_eq!(facade.my_schedule("a1").unwrap().len(), 1);
    assert_eq!(facade.my_schedule("sA").unwrap().len(), 1);
    assert!(facade.my_schedule("a2").unwrap().is_empty());
    assert_eq!(facade.available_events("a2").unwrap().len(), 1);

    assert_eq!(
        facade.cancel_sign_up("a1", "workshop").unwrap(),
        Outcome::CancelSuccess
    );
    assert!(facade.my_schedule("a1").unwrap().is_empty());
}

#[test]
fn capacity_change_uses_the_event_room() {
    let facade = facade();
    facade.schedule_event("org", &workshop(5)).unwrap();

    assert!(facade.change_event_capacity("org", "workshop", 30).unwrap());
    assert!(!facade.change_event_capacity("org", "workshop", 31).unwrap());
    assert!(!facade.change_event_capacity("org", "missing", 10).unwrap());
    assert!(facade
        .change_event_capacity("a1", "workshop", 10)
        .is_err());
    assert_eq!(facade.list_events().unwrap()[0].event_capacity, 30);
}

#[test]
fn bulk_cancellation_requires_manager() {
    let facade = facade();
    facade.schedule_event("org", &workshop(5)).unwrap();

    assert!(facade.cancel_events_by_size("a1", 0, true).is_err());
    assert!(!facade
        .cancel_events_by_type("org", EventType::NoSpeaker)
        .unwrap());
    assert!(facade.cancel_events_by_size("org", 0, true).unwrap());
    assert!(facade.list_events().unwrap().is_empty());
}

#[test]
fn concurrent_sign_ups_never_overfill_an_event() {
    let facade = Arc::new(facade());
    // One speaker plus one free seat.
    facade.schedule_event("org", &workshop(2)).unwrap();

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let facade = Arc::clone(&facade);
            thread::spawn(move || facade.sign_up(&format!("a{index}"), "workshop").unwrap())
        })
        .collect();
    let outcomes: Vec<Outcome> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let successes = outcomes
        .iter()
        .filter(|outcome| **outcome == Outcome::SignupSuccess)
        .count();
    assert_eq!(successes, 1);
    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, Outcome::SignupSuccess | Outcome::EventFull)));

    let event = &facade.list_events().unwrap()[0];
    assert_eq!(event.attendee_ids.len(), 1);
    assert!(event.event_capacity as usize >= event.attendee_ids.len() + event.speaker_ids.len());
}

#[test]
fn snapshots_serialize_with_external_field_names() {
    let facade = facade();
    facade.schedule_event("org", &workshop(5)).unwrap();

    let snapshot = &facade.list_events().unwrap()[0];
    let json = serde_json::to_value(snapshot).unwrap();
    assert_eq!(json["type"], "single_speaker");
    assert_eq!(json["event_id"], "workshop");
    assert_eq!(json["speaker_ids"][0], "sA");

    let code = serde_json::to_value(Outcome::EventAlreadyExist).unwrap();
    assert_eq!(code, "EVENT_ALREADY_EXIST");
    assert_eq!(Outcome::EventAlreadyExist.code(), "EVENT_ALREADY_EXIST");
}
