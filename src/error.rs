use thiserror::Error;

use crate::league::League;

/// Errors that leave the upstream fetch or the cache. These propagate to the caller.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("upstream request to {url} timed out")]
    Timeout { url: String },

    #[error("upstream request to {url} failed: {reason}")]
    Upstream { url: String, reason: String },

    #[error("unexpected response from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("no cached {league} calendar and refresh failed: {source}")]
    CacheMiss {
        league: League,
        #[source]
        source: Box<FeedError>,
    },
}

impl FeedError {
    /// Classify a ureq failure for `url`.
    pub fn from_ureq(url: &str, err: ureq::Error) -> Self {
        let url = url.to_string();
        match err {
            ureq::Error::Timeout(_) => FeedError::Timeout { url },
            ureq::Error::StatusCode(code) => FeedError::Upstream {
                url,
                reason: format!("status {}", code),
            },
            ureq::Error::Json(e) => FeedError::Malformed {
                url,
                reason: e.to_string(),
            },
            other => FeedError::Upstream {
                url,
                reason: other.to_string(),
            },
        }
    }
}

/// An upstream date string that is not a valid date-time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date-time: {input:?}")]
pub struct DateParseError {
    pub input: String,
}

/// Why a single game record produced no calendar event. Never propagated past the aggregator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("record has no id")]
    MissingId,

    #[error(transparent)]
    BadDate(#[from] DateParseError),

    #[error("start date outside calendar window")]
    OutsideWindow,

    #[error("home or away competitor missing")]
    MissingCompetitor,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}
