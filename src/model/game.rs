use serde::{Deserialize, Deserializer, Serialize};

/// ESPN `/teams/{id}/schedule` document. Events stay raw so one bad record only costs itself.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

impl ScheduleDocument {
    /// Decode each event on its own.
    pub fn into_records(self) -> impl Iterator<Item = Result<GameRecord, serde_json::Error>> {
        self.events.into_iter().map(serde_json::from_value::<GameRecord>)
    }
}

/// One scheduled game as ESPN reports it. The same id shows up in both teams' schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub competitions: Vec<Competition>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub venue: Option<Venue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(default)]
    pub home_away: Option<String>,
    #[serde(default)]
    pub team: Option<CompetitorTeam>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorTeam {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    #[serde(rename = "type", default)]
    pub status_type: Option<StatusType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusType {
    #[serde(default)]
    pub description: Option<String>,
}

impl GameRecord {
    pub fn first_competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }

    /// Display name of the competitor tagged `role` ("home" or "away") in the first competition.
    pub fn competitor_name(&self, role: &str) -> Option<&str> {
        self.first_competition()?
            .competitors
            .iter()
            .find(|c| c.home_away.as_deref().is_some_and(|r| r.eq_ignore_ascii_case(role)))?
            .team
            .as_ref()?
            .display_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.first_competition()?
            .venue
            .as_ref()?
            .full_name
            .as_deref()
            .filter(|v| !v.is_empty())
    }

    pub fn status_description(&self) -> Option<&str> {
        self.status
            .as_ref()?
            .status_type
            .as_ref()?
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
    }
}

/// ESPN ids are strings, but some feeds send them as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}
