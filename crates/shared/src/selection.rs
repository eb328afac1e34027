use crate::models::VelocityPoint;
use crate::region::RegionPolygon;

/// Points inside or on the boundary of `region`, in input order.
pub fn filter(region: &RegionPolygon, points: &[VelocityPoint]) -> Vec<VelocityPoint> {
    points
        .iter()
        .filter(|p| region.contains(p.position))
        .copied()
        .collect()
}

/// Split points into parallel vx and vy sequences.
pub fn project(points: &[VelocityPoint]) -> (Vec<f64>, Vec<f64>) {
    points.iter().map(|p| (p.vx, p.vy)).unzip()
}
