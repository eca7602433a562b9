use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, instrument, warn};

use crate::aggregate;
use crate::error::FeedError;
use crate::espn::ScheduleSource;
use crate::league::League;

pub const DEFAULT_REFRESH_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Fresh,
    Stale,
}

/// Last good calendar for one league. A failed refresh leaves it untouched.
#[derive(Debug, Default, Clone)]
pub struct CacheEntry {
    pub last_fetch: Option<DateTime<Utc>>,
    pub document: Option<Vec<u8>>,
}

impl CacheEntry {
    pub fn state(&self, now: DateTime<Utc>, refresh_interval: Duration) -> CacheState {
        match (self.last_fetch, &self.document) {
            (Some(at), Some(_)) if now - at <= refresh_interval => CacheState::Fresh,
            (Some(_), Some(_)) => CacheState::Stale,
            _ => CacheState::Empty,
        }
    }
}

/// Per-league calendar cache with lazy refresh and stale fallback.
///
/// Each league has its own lock, held for the whole refresh, so one league never
/// refreshes twice at once and callers arriving mid-refresh get its result.
pub struct FeedCache<S> {
    source: S,
    refresh_interval: Duration,
    entries: HashMap<League, Mutex<CacheEntry>>,
}

impl<S: ScheduleSource> FeedCache<S> {
    pub fn new(source: S, refresh_interval: Duration) -> Self {
        let entries = League::ALL
            .into_iter()
            .map(|league| (league, Mutex::new(CacheEntry::default())))
            .collect();
        Self { source, refresh_interval, entries }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn get(&self, league: League) -> Result<Vec<u8>, FeedError> {
        self.get_at(league, Utc::now())
    }

    /// Calendar bytes for `league` as of `now`, refreshing from upstream when empty or stale.
    /// Errors only when nothing has ever been cached and the refresh fails.
    #[instrument(level = "info", skip(self))]
    pub fn get_at(&self, league: League, now: DateTime<Utc>) -> Result<Vec<u8>, FeedError> {
        let mut entry = self.lock(league);

        match entry.state(now, self.refresh_interval) {
            CacheState::Fresh => {
                if let Some(doc) = &entry.document {
                    return Ok(doc.clone());
                }
            }
            CacheState::Stale => info!(%league, "Cache is stale, refreshing"),
            CacheState::Empty => info!(%league, "No cache, fetching initial data"),
        }

        match aggregate::build_league_calendar(&self.source, league, now.date_naive()) {
            Ok(bytes) => {
                entry.document = Some(bytes.clone());
                entry.last_fetch = Some(now);
                info!(%league, at = %now.to_rfc3339(), bytes = bytes.len(), "Updated calendar cache");
                Ok(bytes)
            }
            Err(e) => {
                error!(%league, error = %e, "Error refreshing schedule");
                match &entry.document {
                    Some(stale) => {
                        warn!(%league, "Serving stale calendar due to error");
                        Ok(stale.clone())
                    }
                    None => Err(FeedError::CacheMiss { league, source: Box::new(e) }),
                }
            }
        }
    }

    pub fn last_fetch(&self, league: League) -> Option<DateTime<Utc>> {
        self.lock(league).last_fetch
    }

    fn lock(&self, league: League) -> MutexGuard<'_, CacheEntry> {
        // Every league gets an entry in `new`; a poisoned lock still holds valid data.
        self.entries[&league].lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
