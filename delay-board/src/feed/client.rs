//! GraphQL vehicle-position HTTP client.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN, REFERER};
use serde_json::json;
use tracing::debug;

use super::VehicleFeed;
use super::error::FeedError;
use super::types::{VehiclePosition, VehiclePositionsResponse};

/// Default GraphQL endpoint.
const DEFAULT_ENDPOINT: &str = "https://emma.mav.hu/otp2-backend/otp/routers/default/index/graphql";

/// Origin the feed expects requests to come from.
const DEFAULT_ORIGIN: &str = "https://emma.mav.hu";

/// Geographic rectangle the vehicle query is restricted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub sw_lat: f64,
    pub sw_lon: f64,
    pub ne_lat: f64,
    pub ne_lon: f64,
}

impl Default for BoundingBox {
    /// Covers all of Hungary.
    fn default() -> Self {
        Self {
            sw_lat: 45.7,
            sw_lon: 16.1,
            ne_lat: 48.6,
            ne_lon: 22.9,
        }
    }
}

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// Value sent as `Origin`; `Referer` is derived from it
    pub origin: String,
    /// Area to request vehicles for
    pub bounding_box: BoundingBox,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedConfig {
    /// Create a config pointing at the production feed.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            bounding_box: BoundingBox::default(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Restrict the query to a different area.
    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = bbox;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the `vehiclePositions` GraphQL query for an area.
fn vehicle_positions_query(bbox: &BoundingBox) -> String {
    format!(
        r#"{{
  vehiclePositions(swLat: {}, swLon: {}, neLat: {}, neLon: {}) {{
    vehicleId
    lat
    lon
    speed
    trip {{
      gtfsId
      tripHeadsign
      directionId
      route {{
        shortName
        longName
        type
      }}
    }}
    nextStop {{
      arrivalDelay
      departureDelay
      stop {{
        gtfsId
        name
        lat
        lon
      }}
    }}
  }}
}}"#,
        bbox.sw_lat, bbox.sw_lon, bbox.ne_lat, bbox.ne_lon
    )
}

/// Live vehicle-position client.
///
/// Issues exactly one POST per [`fetch`](VehicleFeed::fetch) and does not
/// retry.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    endpoint: String,
    query: String,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let origin =
            HeaderValue::from_str(&config.origin).map_err(|_| FeedError::InvalidHeader("Origin"))?;
        let referer = HeaderValue::from_str(&format!("{}/", config.origin))
            .map_err(|_| FeedError::InvalidHeader("Referer"))?;
        headers.insert(ORIGIN, origin);
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            query: vehicle_positions_query(&config.bounding_box),
        })
    }

    async fn fetch_vehicles(&self) -> Result<Vec<VehiclePosition>, FeedError> {
        debug!(endpoint = %self.endpoint, "requesting vehicle positions");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "query": self.query }))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        let parsed: VehiclePositionsResponse =
            serde_json::from_str(&body).map_err(|e| FeedError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        parsed.into_vehicles()
    }
}

impl VehicleFeed for FeedClient {
    async fn fetch(&self) -> Result<Vec<VehiclePosition>, FeedError> {
        self.fetch_vehicles().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let bbox = BoundingBox {
            sw_lat: 47.0,
            sw_lon: 17.0,
            ne_lat: 48.0,
            ne_lon: 19.0,
        };
        let config = FeedConfig::new()
            .with_endpoint("http://localhost:8080/graphql")
            .with_bounding_box(bbox)
            .with_timeout(5);

        assert_eq!(config.endpoint, "http://localhost:8080/graphql");
        assert_eq!(config.bounding_box, bbox);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = FeedConfig::default();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.bounding_box, BoundingBox::default());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        assert!(FeedClient::new(FeedConfig::new()).is_ok());
    }

    #[test]
    fn invalid_origin_is_rejected() {
        let mut config = FeedConfig::new();
        config.origin = "bad\norigin".to_string();

        assert!(matches!(
            FeedClient::new(config),
            Err(FeedError::InvalidHeader("Origin"))
        ));
    }

    #[test]
    fn query_embeds_bounding_box() {
        let query = vehicle_positions_query(&BoundingBox::default());

        assert!(query.contains("vehiclePositions(swLat: 45.7, swLon: 16.1, neLat: 48.6, neLon: 22.9)"));
        assert!(query.contains("arrivalDelay"));
        assert!(query.contains("tripHeadsign"));
    }

    // Fetch tests against the live feed would go here; they hit the public
    // endpoint and belong behind #[ignore].
}
