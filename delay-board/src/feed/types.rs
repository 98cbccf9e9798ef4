//! Feed response DTOs.
//!
//! These types map directly to the GraphQL `vehiclePositions` response.
//! Every field is an `Option` because the feed sends `null` for anything it
//! does not know, and some vehicles carry no trip at all.

use serde::{Deserialize, Serialize};

use super::error::FeedError;

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct VehiclePositionsResponse {
    /// Query result; `null` when the query failed server-side.
    pub data: Option<VehiclePositionsData>,
}

/// The `data` object of the response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePositionsData {
    pub vehicle_positions: Option<Vec<VehiclePosition>>,
}

impl VehiclePositionsResponse {
    /// Extract the vehicle list, failing if the expected field is absent.
    pub fn into_vehicles(self) -> Result<Vec<VehiclePosition>, FeedError> {
        self.data
            .and_then(|d| d.vehicle_positions)
            .ok_or(FeedError::MissingData)
    }
}

/// One vehicle as reported by the feed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePosition {
    pub vehicle_id: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,

    /// Speed in km/h.
    pub speed: Option<f64>,

    pub trip: Option<Trip>,
    pub next_stop: Option<NextStop>,
}

/// The trip a vehicle is currently running.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub gtfs_id: Option<String>,

    /// Human-readable destination text.
    pub trip_headsign: Option<String>,

    pub direction_id: Option<String>,
    pub route: Option<Route>,
}

/// Route metadata attached to a trip.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Display code. May contain HTML markup.
    pub short_name: Option<String>,

    pub long_name: Option<String>,

    /// Extended GTFS route type (e.g. 100-199 for rail services).
    #[serde(rename = "type")]
    pub route_type: Option<i64>,
}

/// The next scheduled stop of a vehicle and its delay there.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStop {
    /// Arrival delay in seconds.
    pub arrival_delay: Option<i64>,

    /// Departure delay in seconds.
    pub departure_delay: Option<i64>,

    pub stop: Option<Stop>,
}

/// A stop (station) in the feed.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub gtfs_id: Option<String>,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
