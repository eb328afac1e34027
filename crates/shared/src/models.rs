use serde::{Deserialize, Serialize};

/// A geographic position in GeoJSON axis order (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Position { lon, lat }
    }

    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

impl From<(f64, f64)> for Position {
    fn from((lon, lat): (f64, f64)) -> Self {
        Position { lon, lat }
    }
}

/// A station position with its horizontal velocity in mm/yr.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityPoint {
    pub position: Position,
    pub vx: f64,
    pub vy: f64,
}

impl VelocityPoint {
    pub fn new(lon: f64, lat: f64, vx: f64, vy: f64) -> Self {
        VelocityPoint {
            position: Position { lon, lat },
            vx,
            vy,
        }
    }

    /// Length of the velocity vector in mm/yr.
    pub fn magnitude(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Direction of the velocity vector, `atan2(vy, vx)` in degrees (-180, 180].
    pub fn heading_degrees(&self) -> f64 {
        self.vy.atan2(self.vx).to_degrees()
    }
}
