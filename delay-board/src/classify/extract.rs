//! Delay extraction from raw vehicle positions.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, trace};

use super::rules::line_membership;
use crate::feed::VehiclePosition;

/// Placeholder for a missing next stop or speed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing route name or headsign.
pub const UNKNOWN: &str = "unknown";

/// Route types strictly between these bounds are rail services.
const RAIL_ROUTE_TYPE_MIN: i64 = 100;
const RAIL_ROUTE_TYPE_MAX: i64 = 200;

/// Characters in a route long name that mark it as needing its short
/// code appended for display.
const SHORT_NAME_MARKERS: [char; 3] = ['S', 'G', 'Z'];

static HTML_MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>|&.*?;").expect("static regex is valid"));

/// A delayed vehicle on the line, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelayedTrain {
    /// Whole minutes of delay, rounded down.
    pub delay_min: i64,
    pub delay_sec: i64,
    pub name: String,
    pub destination: String,
    pub next_stop: String,
    /// Speed such as "87 km/h", or "N/A".
    pub speed: String,
}

/// Output of [`process`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    /// Delayed vehicles on the line, most delayed first.
    pub records: Vec<DelayedTrain>,
    /// Length of the unfiltered input list.
    pub vehicle_count: usize,
}

/// A vehicle with its optional fields normalized.
///
/// Missing delays become 0 and a missing next stop becomes "N/A" here, so
/// the classification rules never deal with absent data themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    pub route_type: i64,
    pub long_name: Option<&'a str>,
    pub short_name: Option<&'a str>,
    pub headsign: Option<&'a str>,
    pub next_stop_name: &'a str,
    /// Larger of arrival and departure delay at the next stop, 0 if none.
    pub delay_secs: i64,
    pub speed: Option<f64>,
}

impl<'a> Candidate<'a> {
    /// Normalize a raw vehicle.
    ///
    /// Returns `None` if the vehicle has no trip, route, or route type.
    pub fn from_vehicle(vehicle: &'a VehiclePosition) -> Option<Self> {
        let trip = vehicle.trip.as_ref()?;
        let route = trip.route.as_ref()?;
        let route_type = route.route_type?;

        let next_stop = vehicle.next_stop.as_ref();
        let next_stop_name = next_stop
            .and_then(|ns| ns.stop.as_ref())
            .and_then(|stop| stop.name.as_deref())
            .unwrap_or(NOT_AVAILABLE);
        let delay_secs = next_stop
            .map(|ns| {
                ns.arrival_delay
                    .unwrap_or(0)
                    .max(ns.departure_delay.unwrap_or(0))
            })
            .unwrap_or(0);

        Some(Self {
            route_type,
            long_name: route.long_name.as_deref(),
            short_name: route.short_name.as_deref(),
            headsign: trip.trip_headsign.as_deref(),
            next_stop_name,
            delay_secs,
            speed: vehicle.speed,
        })
    }

    /// Whether the route type denotes a rail service.
    pub fn is_rail(&self) -> bool {
        self.route_type > RAIL_ROUTE_TYPE_MIN && self.route_type < RAIL_ROUTE_TYPE_MAX
    }

    /// Build the display record.
    pub fn to_record(&self) -> DelayedTrain {
        let long_name = self.long_name.unwrap_or(UNKNOWN);
        let name = if long_name.contains(SHORT_NAME_MARKERS) {
            let short_name = clean_html(Some(self.short_name.unwrap_or(UNKNOWN)));
            format!("{long_name} ({short_name})")
        } else {
            long_name.to_string()
        };

        let speed = match self.speed {
            Some(kmh) => format!("{} km/h", kmh.trunc() as i64),
            None => NOT_AVAILABLE.to_string(),
        };

        DelayedTrain {
            delay_min: self.delay_secs.div_euclid(60),
            delay_sec: self.delay_secs,
            name,
            destination: self.headsign.unwrap_or(UNKNOWN).to_string(),
            next_stop: self.next_stop_name.to_string(),
            speed,
        }
    }
}

/// Strip HTML tags and entities from a feed string.
pub fn clean_html(raw: Option<&str>) -> String {
    match raw {
        Some(s) if !s.is_empty() => HTML_MARKUP.replace_all(s, "").into_owned(),
        _ => String::new(),
    }
}

/// Reduce the raw vehicle list to delayed vehicles on the line.
///
/// Records are sorted by delay, most delayed first; vehicles with equal
/// delay keep their input order.
pub fn process(vehicles: &[VehiclePosition]) -> Classified {
    let mut records: Vec<DelayedTrain> = vehicles
        .iter()
        .filter_map(|vehicle| {
            let candidate = Candidate::from_vehicle(vehicle)?;
            if !candidate.is_rail() {
                return None;
            }
            let rule = line_membership(&candidate)?;
            if candidate.delay_secs <= 0 {
                return None;
            }

            trace!(
                vehicle = vehicle.vehicle_id.as_deref().unwrap_or(UNKNOWN),
                ?rule,
                delay_secs = candidate.delay_secs,
                "delayed vehicle on line"
            );
            Some(candidate.to_record())
        })
        .collect();

    records.sort_by(|a, b| b.delay_sec.cmp(&a.delay_sec));

    debug!(
        vehicles = vehicles.len(),
        delayed = records.len(),
        "classified vehicle positions"
    );

    Classified {
        records,
        vehicle_count: vehicles.len(),
    }
}
