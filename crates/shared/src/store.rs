use crate::error::LoadError;
use crate::geojson;
use crate::models::VelocityPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// The loaded velocity points. Empty until the data source resolves, and
/// left empty if it fails.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    points: Vec<VelocityPoint>,
    status: StoreStatus,
}

impl FeatureStore {
    /// Decode a GeoJSON document into a ready store.
    pub fn load(source: &str) -> Result<Self, LoadError> {
        let points = geojson::decode_velocity_points(source)?;
        tracing::info!(points = points.len(), "Loaded velocity features");
        Ok(Self::from_points(points))
    }

    pub fn from_points(points: Vec<VelocityPoint>) -> Self {
        FeatureStore {
            points,
            status: StoreStatus::Ready,
        }
    }

    /// Drop any points and mark the load as failed.
    pub fn mark_failed(&mut self) {
        self.points.clear();
        self.status = StoreStatus::Failed;
    }

    pub fn points(&self) -> &[VelocityPoint] {
        &self.points
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == StoreStatus::Ready
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading_and_empty() {
        let store = FeatureStore::default();
        assert_eq!(store.status(), StoreStatus::Loading);
        assert!(store.is_empty());
        assert!(!store.is_ready());
    }

    #[test]
    fn test_load_valid_source() {
        let text = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{"vx":3,"vy":4}}
        ]}"#;
        let store = FeatureStore::load(text).unwrap();
        assert!(store.is_ready());
        assert_eq!(store.len(), 1);
        assert_eq!(store.points()[0], VelocityPoint::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_load_malformed_source() {
        assert!(FeatureStore::load("not json").is_err());
    }

    #[test]
    fn test_mark_failed_clears_points() {
        let mut store = FeatureStore::from_points(vec![VelocityPoint::new(0.0, 0.0, 1.0, 1.0)]);
        store.mark_failed();
        assert_eq!(store.status(), StoreStatus::Failed);
        assert!(store.is_empty());
    }
}
