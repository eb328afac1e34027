/// Failure to populate the Feature Store from the data source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch velocity data: {0}")]
    Fetch(String),
    #[error("velocity data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, found {0:?}")]
    NotFeatureCollection(String),
    #[error("feature {index} does not have a usable Point geometry")]
    InvalidGeometry { index: usize },
    #[error("feature {index} is missing numeric property {name:?}")]
    MissingAttribute { index: usize, name: &'static str },
}

/// A drawn shape that cannot be turned into a polygon.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("shape contains a non-finite coordinate")]
    NonFiniteCoordinate,
    #[error("circle radius must be a finite, non-negative number of meters, got {0}")]
    InvalidRadius(f64),
    #[error("unsupported shape geometry {0:?}")]
    UnsupportedGeometry(String),
    #[error("malformed coordinate array")]
    MalformedCoordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_messages() {
        let err = LoadError::MissingAttribute { index: 3, name: "vx" };
        assert_eq!(err.to_string(), "feature 3 is missing numeric property \"vx\"");

        let err = LoadError::NotFeatureCollection("Feature".to_string());
        assert_eq!(err.to_string(), "expected a FeatureCollection, found \"Feature\"");
    }

    #[test]
    fn test_parse_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: LoadError = json_err.into();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_geometry_error_messages() {
        assert_eq!(
            GeometryError::UnsupportedGeometry("LineString".to_string()).to_string(),
            "unsupported shape geometry \"LineString\""
        );
        assert!(GeometryError::InvalidRadius(-5.0).to_string().contains("-5"));
    }
}
