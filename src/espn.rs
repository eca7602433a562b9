use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{error, info, info_span, instrument, warn};

use crate::error::FeedError;
use crate::league::League;
use crate::model::game::{GameRecord, ScheduleDocument};
use crate::model::team::{Team, TeamsDocument};

pub const DEFAULT_BASE_URL: &str = "https://site.api.espn.com/apis/site/v2/sports";

/// Where team lists and team schedules come from. `EspnClient` in production, fakes in tests.
pub trait ScheduleSource: Send + Sync {
    /// List the league's teams. Fails if the request fails or the document has no team list.
    fn teams(&self, league: League) -> Result<Vec<Team>, FeedError>;

    /// Fetch one team's scheduled games.
    fn schedule(&self, league: League, team_id: &str) -> Result<Vec<GameRecord>, FeedError>;
}

/// Blocking client for the ESPN site API with a per-request timeout.
#[derive(Debug, Clone)]
pub struct EspnClient {
    base_url: String,
    agent: ureq::Agent,
}

impl EspnClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn teams_url(&self, league: League) -> String {
        format!("{}/{}/{}/teams", self.base_url, league.sport_path(), league.code())
    }

    pub fn schedule_url(&self, league: League, team_id: &str) -> String {
        format!("{}/{}/{}/teams/{}/schedule", self.base_url, league.sport_path(), league.code(), team_id)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let response_result = {
            let _span = info_span!("espn_fetch", url = %url).entered();
            self.agent.get(url).call()
        };
        let mut response = response_result.map_err(|e| {
            error!(error = %e, url = %url, "Request failed");
            FeedError::from_ureq(url, e)
        })?;
        response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| FeedError::from_ureq(url, e))
    }
}

impl ScheduleSource for EspnClient {
    #[instrument(level = "info", skip(self))]
    fn teams(&self, league: League) -> Result<Vec<Team>, FeedError> {
        let url = self.teams_url(league);
        info!(%league, url = %url, "Fetching team list");
        let doc: TeamsDocument = self.get_json(&url)?;
        doc.into_teams().ok_or_else(|| FeedError::Malformed {
            url,
            reason: "missing sports[0].leagues[0].teams".to_string(),
        })
    }

    fn schedule(&self, league: League, team_id: &str) -> Result<Vec<GameRecord>, FeedError> {
        let url = self.schedule_url(league, team_id);
        let doc: ScheduleDocument = self.get_json(&url)?;

        let mut games = Vec::with_capacity(doc.events.len());
        for (index, record) in doc.into_records().enumerate() {
            match record {
                Ok(game) => games.push(game),
                Err(e) => warn!(%league, team_id, index, error = %e, "Skipping undecodable schedule record"),
            }
        }
        Ok(games)
    }
}
