//! Per-origin robots.txt cache entries

use crate::robots::ParsedRobots;
use chrono::{DateTime, Duration, Utc};

/// How long a fetched robots.txt stays authoritative
pub const ROBOTS_CACHE_TTL_HOURS: i64 = 24;

/// Rules of one origin and when they were fetched
#[derive(Debug, Clone)]
pub struct CachedRobots {
    pub content: ParsedRobots,
    pub fetched_at: DateTime<Utc>,
}

impl CachedRobots {
    /// Stamps `content` with the current time
    pub fn new(content: ParsedRobots) -> Self {
        Self {
            content,
            fetched_at: Utc::now(),
        }
    }

    /// True once the entry is older than [`ROBOTS_CACHE_TTL_HOURS`]
    pub fn is_stale(&self) -> bool {
        self.age() > Duration::hours(ROBOTS_CACHE_TTL_HOURS)
    }

    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }
}
