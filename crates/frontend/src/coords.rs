use velmap_shared::models::Position;

/// Logical size of the map SVG; the element is scaled to its container.
pub const VIEW_WIDTH: f64 = 960.0;
pub const VIEW_HEIGHT: f64 = 600.0;

/// Pixels spanned by 360° of longitude at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

pub const INITIAL_CENTER: Position = Position { lon: 75.0, lat: 40.0 };
pub const INITIAL_ZOOM: f64 = 4.0;

pub const ZOOM_MIN: f64 = 2.0;
pub const ZOOM_MAX: f64 = 12.0;

/// Equirectangular view onto lon/lat space, y growing southward on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Position,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
        }
    }
}

impl Viewport {
    pub fn px_per_degree(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom) / 360.0
    }

    /// Position to logical view pixels.
    pub fn to_view(&self, p: Position) -> (f64, f64) {
        let s = self.px_per_degree();
        (
            VIEW_WIDTH / 2.0 + (p.lon - self.center.lon) * s,
            VIEW_HEIGHT / 2.0 - (p.lat - self.center.lat) * s,
        )
    }

    /// Logical view pixels to position.
    pub fn to_position(&self, x: f64, y: f64) -> Position {
        let s = self.px_per_degree();
        Position::new(
            self.center.lon + (x - VIEW_WIDTH / 2.0) / s,
            self.center.lat - (y - VIEW_HEIGHT / 2.0) / s,
        )
    }

    /// Move the content by a screen-space drag of (dx, dy) view pixels.
    pub fn panned(&self, dx: f64, dy: f64) -> Viewport {
        let s = self.px_per_degree();
        Viewport {
            center: Position::new(
                self.center.lon - dx / s,
                (self.center.lat + dy / s).clamp(-90.0, 90.0),
            ),
            zoom: self.zoom,
        }
    }

    /// Change zoom keeping the position under (x, y) fixed on screen.
    pub fn zoomed_at(&self, x: f64, y: f64, zoom: f64) -> Viewport {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let anchor = self.to_position(x, y);
        let s = TILE_SIZE * 2f64.powf(zoom) / 360.0;
        Viewport {
            center: Position::new(
                anchor.lon - (x - VIEW_WIDTH / 2.0) / s,
                anchor.lat + (y - VIEW_HEIGHT / 2.0) / s,
            ),
            zoom,
        }
    }

    /// Whether a view pixel lies within the view extended by `margin`.
    pub fn is_visible(x: f64, y: f64, margin: f64) -> bool {
        x >= -margin && x <= VIEW_WIDTH + margin && y >= -margin && y <= VIEW_HEIGHT + margin
    }
}

/// Pure function: convert container-relative coordinates to logical view pixels.
/// Usable in unit tests (no web_sys dependency).
pub fn container_to_view(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    container_h: f64,
) -> Option<(f64, f64)> {
    if container_w <= 0.0 || container_h <= 0.0 {
        return None;
    }
    Some((
        container_x * VIEW_WIDTH / container_w,
        container_y * VIEW_HEIGHT / container_h,
    ))
}

/// Get container-relative pointer coordinates using web_sys, then convert to
/// logical view pixels.
pub fn client_to_view(client_x: f64, client_y: f64, container_id: &str) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    let rect = element.get_bounding_client_rect();
    container_to_view(
        client_x - rect.left(),
        client_y - rect.top(),
        rect.width(),
        rect.height(),
    )
}

/// Convert a screen-space distance in client pixels to view pixels.
pub fn client_delta_to_view(dx: f64, dy: f64, container_id: &str) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let rect = document.get_element_by_id(container_id)?.get_bounding_client_rect();
    container_to_view(dx, dy, rect.width(), rect.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_center_maps_to_middle() {
        let v = Viewport::default();
        let (x, y) = v.to_view(INITIAL_CENTER);
        assert!(approx(x, VIEW_WIDTH / 2.0));
        assert!(approx(y, VIEW_HEIGHT / 2.0));
    }

    #[test]
    fn test_px_per_degree_at_zoom_4() {
        // 256 * 16 pixels per 360 degrees
        let v = Viewport::default();
        assert!(approx(v.px_per_degree(), 4096.0 / 360.0));
    }

    #[test]
    fn test_north_is_up() {
        let v = Viewport::default();
        let (_, y_north) = v.to_view(Position::new(75.0, 41.0));
        let (x_east, _) = v.to_view(Position::new(76.0, 40.0));
        assert!(y_north < VIEW_HEIGHT / 2.0);
        assert!(x_east > VIEW_WIDTH / 2.0);
    }

    #[test]
    fn test_view_roundtrip() {
        let v = Viewport {
            center: Position::new(10.0, -20.0),
            zoom: 6.5,
        };
        let p = Position::new(11.25, -19.5);
        let (x, y) = v.to_view(p);
        let back = v.to_position(x, y);
        assert!(approx(back.lon, p.lon));
        assert!(approx(back.lat, p.lat));
    }

    #[test]
    fn test_pan_moves_content_with_drag() {
        let v = Viewport::default();
        let p = Position::new(76.0, 41.0);
        let (x0, y0) = v.to_view(p);
        let panned = v.panned(30.0, -12.0);
        let (x1, y1) = panned.to_view(p);
        assert!(approx(x1 - x0, 30.0));
        assert!(approx(y1 - y0, -12.0));
    }

    #[test]
    fn test_pan_clamps_latitude() {
        let v = Viewport::default();
        let panned = v.panned(0.0, 1e9);
        assert!(approx(panned.center.lat, 90.0));
    }

    #[test]
    fn test_zoom_keeps_cursor_anchor() {
        let v = Viewport::default();
        let (cx, cy) = (200.0, 450.0);
        let anchor = v.to_position(cx, cy);
        let zoomed = v.zoomed_at(cx, cy, 6.0);
        let (x, y) = zoomed.to_view(anchor);
        assert!(approx(x, cx));
        assert!(approx(y, cy));
        assert!(approx(zoomed.zoom, 6.0));
    }

    #[test]
    fn test_zoom_clamps() {
        let v = Viewport::default();
        assert!(approx(v.zoomed_at(0.0, 0.0, 100.0).zoom, ZOOM_MAX));
        assert!(approx(v.zoomed_at(0.0, 0.0, -3.0).zoom, ZOOM_MIN));
    }

    #[test]
    fn test_is_visible() {
        assert!(Viewport::is_visible(0.0, 0.0, 0.0));
        assert!(Viewport::is_visible(-5.0, 300.0, 10.0));
        assert!(!Viewport::is_visible(-15.0, 300.0, 10.0));
        assert!(!Viewport::is_visible(100.0, VIEW_HEIGHT + 11.0, 10.0));
    }

    #[test]
    fn test_container_to_view_scales() {
        let (x, y) = container_to_view(240.0, 150.0, 480.0, 300.0).unwrap();
        assert!(approx(x, VIEW_WIDTH / 2.0));
        assert!(approx(y, VIEW_HEIGHT / 2.0));
    }

    #[test]
    fn test_container_to_view_invalid_container() {
        assert!(container_to_view(10.0, 10.0, 0.0, 300.0).is_none());
        assert!(container_to_view(10.0, 10.0, 300.0, -1.0).is_none());
    }
}
