use std::collections::HashMap;

use chrono::NaiveDate;
use icalendar::Calendar;
use tracing::{debug, info, instrument, warn};

use crate::error::{FeedError, SkipReason};
use crate::espn::ScheduleSource;
use crate::ical::{self, DateWindow};
use crate::league::League;
use crate::model::game::GameRecord;

/// Fetch every team's schedule and merge the games by id.
///
/// Only a failed team listing is fatal. A team whose schedule cannot be fetched is logged
/// and left out. When two schedules carry the same game id, the one processed last wins.
#[instrument(level = "info", skip(source))]
pub fn collect_games(source: &dyn ScheduleSource, league: League) -> Result<HashMap<String, GameRecord>, FeedError> {
    let teams = source.teams(league)?;
    info!(%league, team_count = teams.len(), "Found teams");

    let mut games_by_id: HashMap<String, GameRecord> = HashMap::new();
    for team in teams {
        let Some(team_id) = team.id.as_deref().filter(|id| !id.is_empty()) else {
            continue;
        };
        let team_name = team.display_name.as_deref().unwrap_or("Unknown Team");
        info!(%league, team_id, team_name, "Fetching team schedule");

        let games = match source.schedule(league, team_id) {
            Ok(games) => games,
            Err(e) => {
                warn!(%league, team_id, team_name, error = %e, "Failed to fetch team schedule, skipping team");
                continue;
            }
        };

        for game in games {
            if let Some(id) = game.id.clone().filter(|id| !id.is_empty()) {
                games_by_id.insert(id, game);
            }
        }
    }

    info!(%league, unique_games = games_by_id.len(), "Collected unique games");
    Ok(games_by_id)
}

/// Translate deduplicated games into a calendar, skipping records that cannot become events.
pub fn games_to_calendar<'a>(
    league: League,
    games: impl IntoIterator<Item = &'a GameRecord>,
    today: NaiveDate,
) -> Calendar {
    let window = DateWindow::around(today);
    let mut events = Vec::new();

    for game in games {
        match ical::translate(game, league, window) {
            Ok(event) => events.push(event),
            Err(SkipReason::OutsideWindow) => {}
            Err(reason @ SkipReason::BadDate(_)) => {
                warn!(%league, game_id = game.id.as_deref().unwrap_or(""), reason = %reason, "Skipping game");
            }
            Err(reason) => {
                debug!(%league, game_id = game.id.as_deref().unwrap_or(""), reason = %reason, "Skipping game");
            }
        }
    }

    info!(%league, event_count = events.len(), "Built calendar");
    ical::build_calendar(league, &events)
}

/// Full pipeline for one league: list, fetch, dedupe, translate, serialize.
pub fn build_league_calendar(source: &dyn ScheduleSource, league: League, today: NaiveDate) -> Result<Vec<u8>, FeedError> {
    let games = collect_games(source, league)?;
    let calendar = games_to_calendar(league, games.values(), today);
    Ok(ical::to_bytes(&calendar))
}
