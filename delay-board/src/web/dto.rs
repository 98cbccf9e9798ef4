//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::cache::{Notice, SnapshotView};
use crate::classify::DelayedTrain;

/// Query string accepted by the snapshot endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    /// `true` requests a forced refresh
    pub force: Option<String>,
}

impl RefreshQuery {
    /// Whether the reader asked to bypass the cache window.
    pub fn is_forced(&self) -> bool {
        self.force.as_deref() == Some("true")
    }
}

/// JSON view of the current snapshot.
#[derive(Debug, Serialize)]
pub struct DelaysResponse {
    /// Delayed trains, most delayed first
    pub trains: Vec<DelayedTrain>,

    /// Raw vehicle count of the last committed fetch
    pub vehicle_count: usize,

    /// Last update time in local time
    pub update_time: String,

    /// Advisory message, if any
    pub notice: Option<Notice>,
}

impl DelaysResponse {
    pub fn from_view(view: &SnapshotView) -> Self {
        Self {
            trains: view.snapshot.records.clone(),
            vehicle_count: view.snapshot.vehicle_count,
            update_time: view.update_time.clone(),
            notice: view.notice.clone(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
