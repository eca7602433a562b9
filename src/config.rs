use std::time::Duration;

use crate::cache::DEFAULT_REFRESH_HOURS;
use crate::error::ConfigError;
use crate::espn::DEFAULT_BASE_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Process settings, read from environment variables with defaults for everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub espn_base_url: String,
    pub refresh_interval: chrono::Duration,
    pub upstream_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            espn_base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: chrono::Duration::hours(DEFAULT_REFRESH_HOURS),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(host) = get("SPORTS_ICS_HOST") {
            config.host = host;
        }
        if let Some(port) = get("SPORTS_ICS_PORT") {
            config.port = parse_var("SPORTS_ICS_PORT", port)?;
        }
        if let Some(url) = get("ESPN_BASE_URL") {
            config.espn_base_url = url;
        }
        if let Some(hours) = get("SPORTS_ICS_REFRESH_HOURS") {
            let hours: u32 = parse_var("SPORTS_ICS_REFRESH_HOURS", hours)?;
            config.refresh_interval = chrono::Duration::hours(i64::from(hours));
        }
        if let Some(secs) = get("SPORTS_ICS_UPSTREAM_TIMEOUT_SECS") {
            let secs: u64 = parse_var("SPORTS_ICS_UPSTREAM_TIMEOUT_SECS", secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid { var: "SPORTS_ICS_UPSTREAM_TIMEOUT_SECS", value: "0".to_string() });
            }
            config.upstream_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// `host:port` for the listener; hostnames are resolved at bind time.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { var, value })
}
