use serde::{Deserialize, Serialize};

/// ESPN `/teams` listing. Teams sit at `sports[0].leagues[0].teams[*].team`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsDocument {
    pub sports: Vec<Sport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Sport {
    pub leagues: Vec<LeagueListing>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeagueListing {
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamEntry {
    #[serde(default)]
    pub team: Option<Team>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl TeamsDocument {
    /// Flatten to the team list, or None when the first sport/league is absent.
    pub fn into_teams(self) -> Option<Vec<Team>> {
        let sport = self.sports.into_iter().next()?;
        let league = sport.leagues.into_iter().next()?;
        Some(league.teams.into_iter().filter_map(|e| e.team).collect())
    }
}
