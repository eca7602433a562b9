use chrono::{DateTime, Duration, NaiveDate, Utc};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::dates;
use crate::error::SkipReason;
use crate::league::League;
use crate::model::event::CalendarEvent;
use crate::model::game::GameRecord;

pub const DAYS_BACK: i64 = 30;
pub const DAYS_AHEAD: i64 = 365;

/// Inclusive range of UTC calendar dates whose games make it into the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn around(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DAYS_BACK),
            end: today + Duration::days(DAYS_AHEAD),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let date = instant.date_naive();
        self.start <= date && date <= self.end
    }
}

/// Length of a league game as a chrono duration; fractional hours round to the minute.
pub fn game_duration(league: League) -> Duration {
    Duration::minutes((league.default_hours() * 60.0).round() as i64)
}

/// Translate one upstream record into a calendar event, or say why it was skipped.
pub fn translate(record: &GameRecord, league: League, window: DateWindow) -> Result<CalendarEvent, SkipReason> {
    let id = record.id.as_deref().filter(|id| !id.is_empty()).ok_or(SkipReason::MissingId)?;

    let start = dates::normalize(record.date.as_deref().unwrap_or(""))?;
    if !window.contains(start) {
        return Err(SkipReason::OutsideWindow);
    }

    let home = record.competitor_name("home").ok_or(SkipReason::MissingCompetitor)?;
    let away = record.competitor_name("away").ok_or(SkipReason::MissingCompetitor)?;

    Ok(CalendarEvent {
        summary: format!("{} @ {}", away, home),
        start,
        end: start + game_duration(league),
        uid: format!("{}-{}@sports", league.uid_prefix(), id),
        location: record.venue_name().map(str::to_string),
        description: record.status_description().map(str::to_string),
    })
}

/// Build the VCALENDAR for a league from already translated events.
pub fn build_calendar<'a>(league: League, events: impl IntoIterator<Item = &'a CalendarEvent>) -> Calendar {
    let mut calendar = Calendar::empty();
    calendar.append_property(("PRODID", league.prodid()));
    calendar.append_property(("VERSION", "2.0"));

    for ev in events {
        let mut event = Event::new();
        event
            .summary(&ev.summary)
            .starts(ev.start)
            .ends(ev.end)
            .uid(&ev.uid);
        if let Some(location) = &ev.location {
            event.location(location);
        }
        if let Some(description) = &ev.description {
            event.description(description);
        }
        calendar.push(event.done());
    }

    calendar
}

/// Serialize a calendar to the bytes served on the feed.
pub fn to_bytes(calendar: &Calendar) -> Vec<u8> {
    calendar.to_string().into_bytes()
}
