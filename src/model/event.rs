use chrono::{DateTime, Utc};

/// A game translated for the calendar; built per aggregation pass and dropped after rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub uid: String,
    pub location: Option<String>,
    pub description: Option<String>,
}
