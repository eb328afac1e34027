use geo::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Area, Coord, Intersects, Line, LineString, Polygon};

use crate::error::GeometryError;
use crate::geojson::{parse_position, Feature, Geometry};
use crate::models::Position;

/// Vertices used to approximate a drawn circle.
pub const CIRCLE_SEGMENTS: usize = 64;

/// Meters per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Floor for cos(latitude) so circles near the poles stay finite.
const MIN_LON_SCALE: f64 = 1e-6;

/// Areas below this (in squared degrees) count as zero.
const AREA_EPSILON: f64 = 1e-12;

/// A shape produced by one drawing action.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    /// Exterior ring vertices, open or closed.
    Polygon { vertices: Vec<Position> },
    /// Any two opposite corners.
    Rectangle { a: Position, b: Position },
    Circle { center: Position, radius_m: f64 },
}

impl Region {
    /// Normalize to a planar polygon.
    ///
    /// Degenerate shapes (too few vertices, zero area, crossing edges) are
    /// not errors; they produce a polygon that contains nothing.
    pub fn to_polygon(&self) -> Result<RegionPolygon, GeometryError> {
        let ring = match self {
            Region::Polygon { vertices } => {
                ensure_finite(vertices)?;
                vertices.clone()
            }
            Region::Rectangle { a, b } => {
                ensure_finite(&[*a, *b])?;
                rectangle_ring(*a, *b)
            }
            Region::Circle { center, radius_m } => {
                ensure_finite(&[*center])?;
                if !radius_m.is_finite() || *radius_m < 0.0 {
                    return Err(GeometryError::InvalidRadius(*radius_m));
                }
                circle_ring(*center, *radius_m)
            }
        };
        Ok(RegionPolygon::from_ring(ring))
    }

    /// Convert a drawing-tool GeoJSON geometry. Circles arrive as a `Point`
    /// plus a radius in meters carried alongside the geometry.
    pub fn from_geojson(geometry: &Geometry, radius_m: Option<f64>) -> Result<Self, GeometryError> {
        match geometry.kind.as_str() {
            "Polygon" => {
                let rings = geometry
                    .coordinates
                    .as_array()
                    .ok_or(GeometryError::MalformedCoordinates)?;
                let Some(exterior) = rings.first() else {
                    return Ok(Region::Polygon { vertices: Vec::new() });
                };
                let vertices = exterior
                    .as_array()
                    .ok_or(GeometryError::MalformedCoordinates)?
                    .iter()
                    .map(|v| parse_position(v).ok_or(GeometryError::MalformedCoordinates))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Region::Polygon { vertices })
            }
            "Point" => {
                let center = parse_position(&geometry.coordinates)
                    .ok_or(GeometryError::MalformedCoordinates)?;
                let radius_m =
                    radius_m.ok_or_else(|| GeometryError::UnsupportedGeometry("Point".to_string()))?;
                Ok(Region::Circle { center, radius_m })
            }
            other => Err(GeometryError::UnsupportedGeometry(other.to_string())),
        }
    }

    /// Convert a drawn feature, reading a circle radius from its `radius` property.
    pub fn from_feature(feature: &Feature) -> Result<Self, GeometryError> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| GeometryError::UnsupportedGeometry("null".to_string()))?;
        Region::from_geojson(geometry, feature.number("radius"))
    }
}

fn ensure_finite(positions: &[Position]) -> Result<(), GeometryError> {
    if positions.iter().all(Position::is_finite) {
        Ok(())
    } else {
        Err(GeometryError::NonFiniteCoordinate)
    }
}

fn rectangle_ring(a: Position, b: Position) -> Vec<Position> {
    let (min_lon, max_lon) = (a.lon.min(b.lon), a.lon.max(b.lon));
    let (min_lat, max_lat) = (a.lat.min(b.lat), a.lat.max(b.lat));
    vec![
        Position::new(min_lon, min_lat),
        Position::new(max_lon, min_lat),
        Position::new(max_lon, max_lat),
        Position::new(min_lon, max_lat),
    ]
}

fn circle_ring(center: Position, radius_m: f64) -> Vec<Position> {
    let lon_scale = center.lat.to_radians().cos().abs().max(MIN_LON_SCALE);
    let r_lat = radius_m / METERS_PER_DEGREE;
    let r_lon = r_lat / lon_scale;
    (0..CIRCLE_SEGMENTS)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / CIRCLE_SEGMENTS as f64;
            Position::new(center.lon + r_lon * theta.cos(), center.lat + r_lat * theta.sin())
        })
        .collect()
}

/// Approximate ground distance in meters between two nearby positions,
/// using an equirectangular projection at their mean latitude.
pub fn planar_distance_m(a: Position, b: Position) -> f64 {
    let mean_lat = ((a.lat + b.lat) / 2.0).to_radians();
    let dx = (b.lon - a.lon) * METERS_PER_DEGREE * mean_lat.cos();
    let dy = (b.lat - a.lat) * METERS_PER_DEGREE;
    dx.hypot(dy)
}

/// A region normalized to a single exterior ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionPolygon {
    polygon: Polygon<f64>,
    degenerate: bool,
}

impl RegionPolygon {
    fn from_ring(mut ring: Vec<Position>) -> Self {
        ring.dedup();
        if ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        let distinct = ring.len();
        let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();
        let polygon = Polygon::new(LineString::new(coords), vec![]);
        let degenerate = distinct < 3
            || polygon.unsigned_area() < AREA_EPSILON
            || is_self_intersecting(polygon.exterior());
        RegionPolygon {
            polygon,
            degenerate,
        }
    }

    /// Inside-or-on-boundary test. Always false for a degenerate region.
    pub fn contains(&self, position: Position) -> bool {
        if self.degenerate {
            return false;
        }
        let coord = Coord {
            x: position.lon,
            y: position.lat,
        };
        matches!(
            self.polygon.coordinate_position(&coord),
            CoordPos::Inside | CoordPos::OnBoundary
        )
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Ring vertices without the closing duplicate.
    pub fn vertices(&self) -> Vec<Position> {
        let mut coords = self.polygon.exterior().0.clone();
        if coords.len() > 1 && coords.first() == coords.last() {
            coords.pop();
        }
        coords.iter().map(|c| Position::new(c.x, c.y)).collect()
    }
}

fn is_self_intersecting(ring: &LineString<f64>) -> bool {
    let segments: Vec<Line<f64>> = ring.lines().collect();
    let n = segments.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if !adjacent && segments[i].intersects(&segments[j]) {
                return true;
            }
        }
    }
    false
}
