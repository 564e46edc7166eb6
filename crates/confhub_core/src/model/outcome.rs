//! Outcome codes returned by scheduling operations.
//!
//! Every predictable business-rule result is an `Outcome` variant. Only
//! infrastructure failures travel as `Err`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Result of an add-event, sign-up or cancel-sign-up call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    EventAdded,
    EventAlreadyExist,
    RoomDne,
    DoubleBookRoom,
    DoubleBookSpeaker,
    SpeakerDne,
    AttendeeDne,
    AttendeeOverload,
    ExceedsRoomCapacity,
    InvalidEventCapacity,
    InvalidTimeSelection,
    NumSpeakersMismatch,
    SameSpeakerAdded,
    SignupSuccess,
    UserDoubleSignup,
    EventFull,
    EventDne,
    CancelSuccess,
    AttendeeNotInEvent,
}

impl Outcome {
    /// Stable machine-readable code, identical to the serde name.
    pub fn code(self) -> &'static str {
        match self {
            Self::EventAdded => "EVENT_ADDED",
            Self::EventAlreadyExist => "EVENT_ALREADY_EXIST",
            Self::RoomDne => "ROOM_DNE",
            Self::DoubleBookRoom => "DOUBLE_BOOK_ROOM",
            Self::DoubleBookSpeaker => "DOUBLE_BOOK_SPEAKER",
            Self::SpeakerDne => "SPEAKER_DNE",
            Self::AttendeeDne => "ATTENDEE_DNE",
            Self::AttendeeOverload => "ATTENDEE_OVERLOAD",
            Self::ExceedsRoomCapacity => "EXCEEDS_ROOM_CAPACITY",
            Self::InvalidEventCapacity => "INVALID_EVENT_CAPACITY",
            Self::InvalidTimeSelection => "INVALID_TIME_SELECTION",
            Self::NumSpeakersMismatch => "NUM_SPEAKERS_MISMATCH",
            Self::SameSpeakerAdded => "SAME_SPEAKER_ADDED",
            Self::SignupSuccess => "SIGNUP_SUCCESS",
            Self::UserDoubleSignup => "USER_DOUBLE_SIGNUP",
            Self::EventFull => "EVENT_FULL",
            Self::EventDne => "EVENT_DNE",
            Self::CancelSuccess => "CANCEL_SUCCESS",
            Self::AttendeeNotInEvent => "ATTENDEE_NOT_IN_EVENT",
        }
    }

    /// Whether the operation mutated the event store.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::EventAdded | Self::SignupSuccess | Self::CancelSuccess
        )
    }

    /// User-facing prompt text for UI layers.
    pub fn message(self) -> &'static str {
        match self {
            Self::EventAdded => "Event created successfully.",
            Self::EventAlreadyExist => "An event with this ID already exists.",
            Self::RoomDne => "The selected room does not exist.",
            Self::DoubleBookRoom => "The room is already booked for an overlapping time.",
            Self::DoubleBookSpeaker => "A speaker is already booked for an overlapping time.",
            Self::SpeakerDne => "One or more speakers do not exist.",
            Self::AttendeeDne => "The attendee does not exist.",
            Self::AttendeeOverload => "Speakers and attendees exceed the room capacity.",
            Self::ExceedsRoomCapacity => "Attendees exceed the room capacity.",
            Self::InvalidEventCapacity => "The event capacity is not valid for this room.",
            Self::InvalidTimeSelection => "The event must end after it starts.",
            Self::NumSpeakersMismatch => "The number of speakers does not match the event type.",
            Self::SameSpeakerAdded => "The same speaker was added more than once.",
            Self::SignupSuccess => "Signed up successfully.",
            Self::UserDoubleSignup => "You are already signed up for this event.",
            Self::EventFull => "This event is full.",
            Self::EventDne => "The event does not exist.",
            Self::CancelSuccess => "Sign-up cancelled successfully.",
            Self::AttendeeNotInEvent => "You are not signed up for this event.",
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;

    #[test]
    fn only_mutating_outcomes_are_success() {
        assert!(Outcome::EventAdded.is_success());
        assert!(Outcome::SignupSuccess.is_success());
        assert!(Outcome::CancelSuccess.is_success());
        assert!(!Outcome::EventFull.is_success());
        assert!(!Outcome::DoubleBookRoom.is_success());
    }

    #[test]
    fn display_uses_stable_code() {
        assert_eq!(Outcome::AttendeeNotInEvent.to_string(), "ATTENDEE_NOT_IN_EVENT");
        assert_eq!(Outcome::RoomDne.to_string(), "ROOM_DNE");
    }
}
