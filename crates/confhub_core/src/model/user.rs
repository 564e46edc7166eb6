//! User roles known to the user directory.

use serde::{Deserialize, Serialize};

/// Stable user identifier as issued by the account system.
pub type UserId = String;

/// Role a user holds in the conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// May sign up for events.
    Attendee,
    /// May be booked to speak at events.
    Speaker,
    /// May create and cancel events.
    Organizer,
    /// Full administrative access.
    Admin,
}

impl UserRole {
    /// Returns the storage/wire name of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attendee => "attendee",
            Self::Speaker => "speaker",
            Self::Organizer => "organizer",
            Self::Admin => "admin",
        }
    }

    /// Parses a storage/wire name back into a role.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "attendee" => Some(Self::Attendee),
            "speaker" => Some(Self::Speaker),
            "organizer" => Some(Self::Organizer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Whether this role may create or cancel events.
    pub fn can_manage_events(self) -> bool {
        matches!(self, Self::Organizer | Self::Admin)
    }
}
