use crate::models::{Position, VelocityPoint};

/// Marker glyph width and height in screen units.
pub const ICON_SIZE: f64 = 20.0;

/// What the map needs to draw one velocity arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: Position,
    /// `atan2(vy, vx)` in degrees.
    pub rotation_degrees: f64,
    pub magnitude: f64,
}

impl From<&VelocityPoint> for Marker {
    fn from(p: &VelocityPoint) -> Self {
        Marker {
            position: p.position,
            rotation_degrees: p.heading_degrees(),
            magnitude: p.magnitude(),
        }
    }
}

pub fn markers(points: &[VelocityPoint]) -> Vec<Marker> {
    points.iter().map(Marker::from).collect()
}
