use std::path::{Path, PathBuf};

use velmap_shared::error::LoadError;
use velmap_shared::store::FeatureStore;

/// File name the page fetches under `/data`.
pub const VELOCITY_FILE: &str = "velocity.geojson";

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Decode the served dataset once so a broken file shows up in the server log
/// instead of only as an empty map in the browser.
pub fn check(data_dir: &Path) -> Result<usize, DatasetError> {
    let path = data_dir.join(VELOCITY_FILE);
    let text = std::fs::read_to_string(&path).map_err(|source| DatasetError::Read {
        path: path.clone(),
        source,
    })?;
    let store = FeatureStore::load(&text)?;
    tracing::info!(points = store.len(), path = %path.display(), "Velocity dataset is valid");
    Ok(store.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_valid_dataset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(VELOCITY_FILE),
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Point","coordinates":[75,40]},"properties":{"vx":1,"vy":2}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[76,41]},"properties":{"vx":3,"vy":4}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(check(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_check_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = check(dir.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Read { .. }));
        assert!(err.to_string().contains(VELOCITY_FILE));
    }

    #[test]
    fn test_check_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(VELOCITY_FILE), r#"{"type":"Topology"}"#).unwrap();
        let err = check(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Load(LoadError::NotFeatureCollection(_))
        ));
    }
}
