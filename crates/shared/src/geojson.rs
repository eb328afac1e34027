//! Minimal GeoJSON decoding for the velocity data file and for drawn shapes.
//!
//! Only the members the pipeline reads are modelled; everything else in the
//! document (`crs`, `bbox`, extra properties) is ignored.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::models::{Position, VelocityPoint};

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Read a finite numeric property.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.properties
            .as_ref()?
            .get(name)?
            .as_f64()
            .filter(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Parse a GeoJSON position `[lon, lat, ...]`. Extra members (altitude) are ignored.
pub fn parse_position(value: &Value) -> Option<Position> {
    let arr = value.as_array()?;
    if arr.len() < 2 {
        return None;
    }
    let lon = arr[0].as_f64()?;
    let lat = arr[1].as_f64()?;
    let pos = Position { lon, lat };
    pos.is_finite().then_some(pos)
}

/// Decode a FeatureCollection of velocity points.
///
/// Any feature without a Point geometry or without numeric `vx`/`vy`
/// makes the whole document malformed.
pub fn decode_velocity_points(text: &str) -> Result<Vec<VelocityPoint>, LoadError> {
    let collection: FeatureCollection = serde_json::from_str(text)?;
    if collection.kind != "FeatureCollection" {
        return Err(LoadError::NotFeatureCollection(collection.kind));
    }
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| decode_feature(index, feature))
        .collect()
}

fn decode_feature(index: usize, feature: &Feature) -> Result<VelocityPoint, LoadError> {
    let position = feature
        .geometry
        .as_ref()
        .filter(|g| g.kind == "Point")
        .and_then(|g| parse_position(&g.coordinates))
        .ok_or(LoadError::InvalidGeometry { index })?;
    let vx = feature
        .number("vx")
        .ok_or(LoadError::MissingAttribute { index, name: "vx" })?;
    let vy = feature
        .number("vy")
        .ok_or(LoadError::MissingAttribute { index, name: "vy" })?;
    Ok(VelocityPoint { position, vx, vy })
}
