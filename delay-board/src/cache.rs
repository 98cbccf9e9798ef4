//! Refresh-on-read cache of delayed trains.
//!
//! The whole network is fetched at most once per cache window. A reader may
//! force an early refresh, but only once per cooldown period. Every decision,
//! the upstream call, and the commit happen under one lock, so at most one
//! fetch is in flight and readers never see a half-replaced snapshot.
//!
//! A fetched vehicle list is only committed if it is plausibly complete
//! (more than `min_vehicle_count` vehicles). A degraded feed otherwise
//! replaces real delays with an empty table.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::classify::{DelayedTrain, process};
use crate::feed::{FeedError, VehicleFeed};

/// Time zone timestamps are displayed in.
pub const DISPLAY_TZ: Tz = chrono_tz::Europe::Budapest;

const MSG_REFRESHED: &str = "Data refreshed.";
const MSG_RATE_LIMITED: &str = "Too many refresh requests. Showing cached data.";
const MSG_FEED_UNAVAILABLE: &str = "No fresh data from the feed. Showing the last known state.";
const MSG_FEED_DEGRADED: &str =
    "The feed returned too little data. Showing the last known state.";

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a committed snapshot is served before the next read refetches.
    pub cache_duration: Duration,

    /// Minimum spacing between forced refreshes.
    pub force_cooldown: Duration,

    /// Fetches with this many vehicles or fewer are never committed.
    pub min_vehicle_count: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_duration: Duration::from_secs(5 * 60),
            force_cooldown: Duration::from_secs(60),
            min_vehicle_count: 100,
        }
    }
}

/// The last committed result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Delayed trains on the line, most delayed first.
    pub records: Vec<DelayedTrain>,

    /// Raw vehicle count of the fetch that produced this snapshot.
    pub vehicle_count: usize,

    /// When this snapshot was committed. `None` until the first commit.
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
        }
    }
}

/// Advisory message shown alongside a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: &'static str,
    pub severity: Severity,
}

impl Notice {
    fn info(message: &'static str) -> Self {
        Self {
            message,
            severity: Severity::Info,
        }
    }

    fn warning(message: &'static str) -> Self {
        Self {
            message,
            severity: Severity::Warning,
        }
    }
}

/// What a reader gets back from [`DelayCache::get_snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotView {
    pub snapshot: Arc<Snapshot>,
    pub notice: Option<Notice>,
    /// Commit time of the snapshot, or the request time if nothing was ever
    /// committed, in [`DISPLAY_TZ`].
    pub update_time: String,
}

/// Result of one refresh attempt.
#[derive(Debug)]
enum RefreshOutcome {
    Committed { vehicle_count: usize, delayed: usize },
    /// Parsed fine but too few vehicles to trust.
    Rejected { vehicle_count: usize },
    Failed(FeedError),
}

struct CacheState {
    snapshot: Arc<Snapshot>,
    last_force_refresh: Option<DateTime<Utc>>,
}

/// Delayed-train cache in front of a vehicle feed.
pub struct DelayCache<F> {
    feed: F,
    config: CacheConfig,
    state: Mutex<CacheState>,
}

impl<F: VehicleFeed> DelayCache<F> {
    /// Create an empty cache. Nothing is fetched until the first read.
    pub fn new(feed: F, config: CacheConfig) -> Self {
        Self {
            feed,
            config,
            state: Mutex::new(CacheState {
                snapshot: Arc::new(Snapshot::default()),
                last_force_refresh: None,
            }),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the current snapshot, refreshing it first if it is due.
    ///
    /// Never fails: if the feed is down or degraded the previous snapshot
    /// is served, with a warning notice when the reader forced the refresh.
    pub async fn get_snapshot(&self, force: bool, now: DateTime<Utc>) -> SnapshotView {
        let mut state = self.state.lock().await;
        let mut notice = None;

        let perform_refresh = if force {
            if has_elapsed(state.last_force_refresh, now, self.config.force_cooldown) {
                state.last_force_refresh = Some(now);
                notice = Some(Notice::info(MSG_REFRESHED));
                true
            } else {
                info!("forced refresh rate limited");
                notice = Some(Notice::warning(MSG_RATE_LIMITED));
                false
            }
        } else {
            has_elapsed(state.snapshot.refreshed_at, now, self.config.cache_duration)
        };

        if perform_refresh {
            match self.refresh(&mut state, now).await {
                RefreshOutcome::Committed {
                    vehicle_count,
                    delayed,
                } => {
                    info!(vehicle_count, delayed, "cache refreshed");
                }
                RefreshOutcome::Rejected { vehicle_count } => {
                    warn!(
                        vehicle_count,
                        min = self.config.min_vehicle_count,
                        "too few vehicles in feed; keeping cached data"
                    );
                    if force {
                        notice = Some(Notice::warning(MSG_FEED_DEGRADED));
                    }
                }
                RefreshOutcome::Failed(e) => {
                    warn!(kind = ?e.kind(), error = %e, "feed fetch failed; keeping cached data");
                    if force {
                        notice = Some(Notice::warning(MSG_FEED_UNAVAILABLE));
                    }
                }
            }
        } else if notice.is_none() {
            debug!("serving cached snapshot");
        }

        let snapshot = Arc::clone(&state.snapshot);
        let update_time = format_update_time(snapshot.refreshed_at.unwrap_or(now));

        SnapshotView {
            snapshot,
            notice,
            update_time,
        }
    }

    /// Fetch, classify, and commit if the result passes the vehicle-count gate.
    async fn refresh(&self, state: &mut CacheState, now: DateTime<Utc>) -> RefreshOutcome {
        info!("refreshing vehicle positions");

        let vehicles = match self.feed.fetch().await {
            Ok(vehicles) => vehicles,
            Err(e) => return RefreshOutcome::Failed(e),
        };

        let classified = process(&vehicles);
        if classified.vehicle_count <= self.config.min_vehicle_count {
            return RefreshOutcome::Rejected {
                vehicle_count: classified.vehicle_count,
            };
        }

        let outcome = RefreshOutcome::Committed {
            vehicle_count: classified.vehicle_count,
            delayed: classified.records.len(),
        };
        state.snapshot = Arc::new(Snapshot {
            records: classified.records,
            vehicle_count: classified.vehicle_count,
            refreshed_at: Some(now),
        });

        outcome
    }
}

/// Whether strictly more than `window` has passed since `since`.
/// An unset `since` counts as elapsed.
fn has_elapsed(since: Option<DateTime<Utc>>, now: DateTime<Utc>, window: Duration) -> bool {
    match since {
        None => true,
        Some(t) => (now - t).to_std().is_ok_and(|elapsed| elapsed > window),
    }
}

/// Format a timestamp for display in [`DISPLAY_TZ`].
pub fn format_update_time(t: DateTime<Utc>) -> String {
    t.with_timezone(&DISPLAY_TZ)
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string()
}
