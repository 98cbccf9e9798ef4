//! Vehicle-position feed client.
//!
//! This module provides an HTTP client for the public OTP2 GraphQL index,
//! which reports live positions for every vehicle inside a bounding box.
//!
//! Key characteristics of the feed:
//! - There is no line identifier; vehicles only carry route metadata
//!   (short name, long name, route type) and their next stop
//! - Nearly every field may be missing or `null`
//! - One request returns the whole network, typically several hundred vehicles

mod client;
mod error;
mod mock;
mod types;

use std::future::Future;

pub use client::{BoundingBox, FeedClient, FeedConfig};
pub use error::{FailureKind, FeedError};
pub use mock::MockFeed;
pub use types::{
    NextStop, Route, Stop, Trip, VehiclePosition, VehiclePositionsData, VehiclePositionsResponse,
};

/// Source of raw vehicle positions.
///
/// One call is one upstream request. Implementations never retry; the
/// cache controller re-invokes on a later read instead.
pub trait VehicleFeed: Send + Sync + 'static {
    /// Fetch every vehicle position currently reported.
    fn fetch(&self) -> impl Future<Output = Result<Vec<VehiclePosition>, FeedError>> + Send;
}
