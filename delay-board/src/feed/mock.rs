//! Mock feed for running without network access.
//!
//! Serves a saved `vehiclePositions` response body as if it were live.

use std::path::Path;
use std::sync::Arc;

use super::VehicleFeed;
use super::error::FeedError;
use super::types::{VehiclePosition, VehiclePositionsResponse};

/// Feed that always returns the same vehicle list.
#[derive(Debug, Clone)]
pub struct MockFeed {
    vehicles: Arc<Vec<VehiclePosition>>,
}

impl MockFeed {
    /// Create a mock serving the given vehicles.
    pub fn new(vehicles: Vec<VehiclePosition>) -> Self {
        Self {
            vehicles: Arc::new(vehicles),
        }
    }

    /// Load a saved GraphQL response body from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;

        let response: VehiclePositionsResponse =
            serde_json::from_str(&json).map_err(|e| FeedError::Json {
                message: format!("failed to parse {}: {}", path.display(), e),
                body: None,
            })?;

        Ok(Self::new(response.into_vehicles()?))
    }

    /// Number of vehicles this mock serves.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl VehicleFeed for MockFeed {
    async fn fetch(&self) -> Result<Vec<VehiclePosition>, FeedError> {
        Ok(self.vehicles.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_mock_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vehicles.json");
        std::fs::write(
            &path,
            r#"{"data": {"vehiclePositions": [
                {"vehicleId": "a", "speed": 40.0},
                {"vehicleId": "b"}
            ]}}"#,
        )
        .unwrap();

        let feed = MockFeed::from_file(&path).unwrap();
        assert_eq!(feed.len(), 2);

        let vehicles = feed.fetch().await.unwrap();
        assert_eq!(vehicles[0].vehicle_id.as_deref(), Some("a"));
        assert_eq!(vehicles[1].speed, None);
    }

    #[test]
    fn missing_file_returns_error() {
        let result = MockFeed::from_file("/nonexistent/vehicles.json");
        assert!(matches!(result, Err(FeedError::Io(_))));
    }

    #[test]
    fn file_without_data_returns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"data": null}"#).unwrap();

        assert!(matches!(
            MockFeed::from_file(&path),
            Err(FeedError::MissingData)
        ));
    }
}
