use serde::Serialize;

use crate::models::VelocityPoint;
use crate::selection;

pub const CHART_TITLE: &str = "Selected Velocity Vectors";
pub const X_AXIS_LABEL: &str = "Vx (mm/yr)";
pub const Y_AXIS_LABEL: &str = "Vy (mm/yr)";

/// Scatter plot handed to the chart renderer: x = vx, y = vy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl ScatterChart {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        ScatterChart {
            title: CHART_TITLE.to_string(),
            x_label: X_AXIS_LABEL.to_string(),
            y_label: Y_AXIS_LABEL.to_string(),
            x,
            y,
        }
    }

    pub fn from_points(points: &[VelocityPoint]) -> Self {
        let (x, y) = selection::project(points);
        Self::new(x, y)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// (x, y) pairs in index order.
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
