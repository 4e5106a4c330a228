use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identifier of an event, e.g. `tech-conference-2025`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub String);

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The resolved event an attendee is registering for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub venue: String,
    pub capacity: u32,
    pub available_seats: u32,
}

/// Display fields of the signed-in attendee.
///
/// Handed to the workflow explicitly instead of being read from a global session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeContext {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
}

/// Everything a registration needs to know about who is registering for what.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationContext {
    pub event: EventRecord,
    pub attendee: AttendeeContext,
}
