//! Drawing-tool state: turns pointer input into finished [`Region`]s.

use velmap_shared::models::Position;
use velmap_shared::region::{planar_distance_m, Region};

use crate::coords::Viewport;

/// Clicking within this many view pixels of the first vertex closes a polygon.
pub const CLOSE_THRESHOLD_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTool {
    Pan,
    Polygon,
    Rectangle,
    Circle,
}

impl DrawTool {
    pub const ALL: [DrawTool; 4] = [
        DrawTool::Pan,
        DrawTool::Polygon,
        DrawTool::Rectangle,
        DrawTool::Circle,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DrawTool::Pan => "Pan",
            DrawTool::Polygon => "Polygon",
            DrawTool::Rectangle => "Rectangle",
            DrawTool::Circle => "Circle",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            DrawTool::Pan => "Drag to pan, scroll to zoom.",
            DrawTool::Polygon => "Click to add vertices, double-click or click the first vertex to finish.",
            DrawTool::Rectangle => "Drag from one corner to the opposite corner.",
            DrawTool::Circle => "Drag from the center outwards.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragShape {
    Rectangle,
    Circle,
}

/// A shape being drawn.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Draft {
    #[default]
    Empty,
    Polygon {
        vertices: Vec<Position>,
        hover: Option<Position>,
    },
    Drag {
        shape: DragShape,
        start: Position,
        current: Position,
    },
    /// A polygon was just closed on its first vertex. The repeated click of
    /// a double-click lands here and is swallowed.
    Closed { at: Position },
}

impl Draft {
    pub fn is_active(&self) -> bool {
        !matches!(self, Draft::Empty | Draft::Closed { .. })
    }

    pub fn cancel(&mut self) {
        *self = Draft::Empty;
    }

    /// Primary button pressed. Starts rectangle and circle drags.
    pub fn press(&mut self, tool: DrawTool, at: Position) {
        let shape = match tool {
            DrawTool::Rectangle => DragShape::Rectangle,
            DrawTool::Circle => DragShape::Circle,
            DrawTool::Pan | DrawTool::Polygon => return,
        };
        *self = Draft::Drag {
            shape,
            start: at,
            current: at,
        };
    }

    pub fn move_to(&mut self, at: Position) {
        match self {
            Draft::Polygon { hover, .. } => *hover = Some(at),
            Draft::Drag { current, .. } => *current = at,
            Draft::Empty | Draft::Closed { .. } => {}
        }
    }

    /// Primary button released. Completes a drag shape; a release without a
    /// drag (within `CLOSE_THRESHOLD_PX` of the press) drops it.
    pub fn release(&mut self, at: Position, viewport: &Viewport) -> Option<Region> {
        let Draft::Drag { shape, start, .. } = *self else {
            return None;
        };
        *self = Draft::Empty;
        if near(viewport, start, at) {
            return None;
        }
        Some(drag_region(shape, start, at))
    }

    /// Polygon tool click: add a vertex, or close the ring when the click lands
    /// on the first vertex of a polygon that already has three.
    pub fn click(&mut self, at: Position, viewport: &Viewport) -> Option<Region> {
        let closes = matches!(
            self,
            Draft::Polygon { vertices, .. } if vertices.len() >= 3 && near(viewport, vertices[0], at)
        );
        if closes {
            let region = self.finish();
            if region.is_some() {
                *self = Draft::Closed { at };
            }
            return region;
        }
        match self {
            Draft::Closed { at: closed_at } if near(viewport, *closed_at, at) => {
                *self = Draft::Empty;
                None
            }
            Draft::Polygon { vertices, hover } => {
                vertices.push(at);
                *hover = Some(at);
                None
            }
            _ => {
                *self = Draft::Polygon {
                    vertices: vec![at],
                    hover: Some(at),
                };
                None
            }
        }
    }

    /// Double-click: finish the polygon with the vertices placed so far.
    ///
    /// With fewer than three distinct vertices nothing is emitted and the
    /// polygon stays open for more clicks. A pending close is cleared.
    pub fn finish(&mut self) -> Option<Region> {
        match std::mem::take(self) {
            Draft::Polygon { vertices, hover } => {
                let mut distinct = vertices.clone();
                distinct.dedup();
                if distinct.len() < 3 {
                    *self = Draft::Polygon { vertices, hover };
                    return None;
                }
                Some(Region::Polygon { vertices })
            }
            Draft::Closed { .. } => None,
            other => {
                *self = other;
                None
            }
        }
    }

    /// Outline to show while drawing, as an open path.
    pub fn preview_path(&self) -> Vec<Position> {
        match self {
            Draft::Empty | Draft::Closed { .. } => Vec::new(),
            Draft::Polygon { vertices, hover } => {
                let mut path = vertices.clone();
                path.extend(*hover);
                path
            }
            Draft::Drag {
                shape,
                start,
                current,
            } => match drag_region(*shape, *start, *current).to_polygon() {
                Ok(polygon) => {
                    let mut path = polygon.vertices();
                    if let Some(first) = path.first().copied() {
                        path.push(first);
                    }
                    path
                }
                Err(_) => Vec::new(),
            },
        }
    }
}

fn drag_region(shape: DragShape, start: Position, end: Position) -> Region {
    match shape {
        DragShape::Rectangle => Region::Rectangle { a: start, b: end },
        DragShape::Circle => Region::Circle {
            center: start,
            radius_m: planar_distance_m(start, end),
        },
    }
}

fn near(viewport: &Viewport, a: Position, b: Position) -> bool {
    let (ax, ay) = viewport.to_view(a);
    let (bx, by) = viewport.to_view(b);
    (ax - bx).hypot(ay - by) <= CLOSE_THRESHOLD_PX
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lon: f64, lat: f64) -> Position {
        Position::new(lon, lat)
    }

    #[test]
    fn test_rectangle_drag() {
        let mut draft = Draft::default();
        draft.press(DrawTool::Rectangle, p(70.0, 38.0));
        draft.move_to(p(72.0, 39.0));
        assert!(draft.is_active());
        let region = draft.release(p(74.0, 41.0), &Viewport::default()).unwrap();
        assert_eq!(
            region,
            Region::Rectangle {
                a: p(70.0, 38.0),
                b: p(74.0, 41.0)
            }
        );
        assert_eq!(draft, Draft::Empty);
    }

    #[test]
    fn test_circle_drag_radius_in_meters() {
        let mut draft = Draft::default();
        draft.press(DrawTool::Circle, p(0.0, 0.0));
        let region = draft.release(p(0.0, 2.0), &Viewport::default()).unwrap();
        match region {
            Region::Circle { center, radius_m } => {
                assert_eq!(center, p(0.0, 0.0));
                assert!((radius_m - 222_640.0).abs() < 1e-6);
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_press_ignored_for_pan_and_polygon() {
        let mut draft = Draft::default();
        draft.press(DrawTool::Pan, p(0.0, 0.0));
        assert_eq!(draft, Draft::Empty);
        draft.press(DrawTool::Polygon, p(0.0, 0.0));
        assert_eq!(draft, Draft::Empty);
        assert!(draft.release(p(1.0, 1.0), &Viewport::default()).is_none());
    }

    #[test]
    fn test_polygon_double_click_finish() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        assert!(draft.click(p(70.0, 38.0), &v).is_none());
        assert!(draft.click(p(74.0, 38.0), &v).is_none());
        assert!(draft.click(p(74.0, 42.0), &v).is_none());
        let region = draft.finish().unwrap();
        assert_eq!(
            region,
            Region::Polygon {
                vertices: vec![p(70.0, 38.0), p(74.0, 38.0), p(74.0, 42.0)]
            }
        );
        assert!(!draft.is_active());
    }

    #[test]
    fn test_polygon_closes_on_first_vertex() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        draft.click(p(70.0, 38.0), &v);
        draft.click(p(74.0, 38.0), &v);
        draft.click(p(74.0, 42.0), &v);
        // Within a pixel of the first vertex at zoom 4
        let region = draft.click(p(70.01, 38.01), &v).unwrap();
        match region {
            Region::Polygon { vertices } => assert_eq!(vertices.len(), 3),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_does_not_close_with_two_vertices() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        draft.click(p(70.0, 38.0), &v);
        draft.click(p(74.0, 38.0), &v);
        assert!(draft.click(p(70.0, 38.0), &v).is_none());
        match &draft {
            Draft::Polygon { vertices, .. } => assert_eq!(vertices.len(), 3),
            other => panic!("expected polygon draft, got {:?}", other),
        }
    }

    #[test]
    fn test_click_without_drag_emits_nothing() {
        let v = Viewport::default();
        for tool in [DrawTool::Rectangle, DrawTool::Circle] {
            let mut draft = Draft::default();
            draft.press(tool, p(72.0, 39.0));
            assert!(draft.release(p(72.0, 39.0), &v).is_none());
            assert_eq!(draft, Draft::Empty);

            // Jitter of a few pixels is still a click
            draft.press(tool, p(72.0, 39.0));
            assert!(draft.release(p(72.2, 39.1), &v).is_none());
            assert_eq!(draft, Draft::Empty);
        }
    }

    #[test]
    fn test_double_click_on_first_vertex_emits_one_polygon() {
        let v = Viewport::default();
        let (a, b, c) = (p(70.0, 38.0), p(74.0, 38.0), p(74.0, 42.0));
        let mut draft = Draft::default();
        let mut emitted = Vec::new();
        // Browser order for a double-click: mouseup, mouseup, dblclick
        for at in [a, b, c, a, a] {
            emitted.extend(draft.click(at, &v));
        }
        emitted.extend(draft.finish());

        assert_eq!(
            emitted,
            vec![Region::Polygon {
                vertices: vec![a, b, c]
            }]
        );
        assert!(!draft.is_active());
    }

    #[test]
    fn test_click_after_close_elsewhere_starts_new_polygon() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        for at in [p(70.0, 38.0), p(74.0, 38.0), p(74.0, 42.0)] {
            draft.click(at, &v);
        }
        assert!(draft.click(p(70.0, 38.0), &v).is_some());
        assert!(draft.click(p(60.0, 30.0), &v).is_none());
        match &draft {
            Draft::Polygon { vertices, .. } => assert_eq!(vertices, &vec![p(60.0, 30.0)]),
            other => panic!("expected polygon draft, got {:?}", other),
        }
    }

    #[test]
    fn test_finish_with_too_few_vertices_keeps_polygon_open() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        draft.click(p(70.0, 38.0), &v);
        // Double-click on the second vertex repeats it
        draft.click(p(74.0, 38.0), &v);
        draft.click(p(74.0, 38.0), &v);
        assert!(draft.finish().is_none());
        assert!(draft.is_active());

        draft.click(p(74.0, 42.0), &v);
        let region = draft.finish().unwrap();
        match region {
            Region::Polygon { vertices } => assert_eq!(vertices.len(), 4),
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_finish_without_polygon_keeps_drag() {
        let mut draft = Draft::default();
        draft.press(DrawTool::Rectangle, p(0.0, 0.0));
        assert!(draft.finish().is_none());
        assert!(matches!(draft, Draft::Drag { .. }));
    }

    #[test]
    fn test_cancel() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        draft.click(p(70.0, 38.0), &v);
        draft.cancel();
        assert_eq!(draft, Draft::Empty);
        assert!(draft.finish().is_none());
    }

    #[test]
    fn test_preview_path_polygon_includes_hover() {
        let v = Viewport::default();
        let mut draft = Draft::default();
        draft.click(p(70.0, 38.0), &v);
        draft.move_to(p(71.0, 39.0));
        assert_eq!(draft.preview_path(), vec![p(70.0, 38.0), p(71.0, 39.0)]);
    }

    #[test]
    fn test_preview_path_rectangle_is_closed() {
        let mut draft = Draft::default();
        draft.press(DrawTool::Rectangle, p(0.0, 0.0));
        draft.move_to(p(2.0, 1.0));
        let path = draft.preview_path();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), path.last());
    }

    #[test]
    fn test_tool_labels() {
        let labels: Vec<&str> = DrawTool::ALL.iter().map(DrawTool::label).collect();
        assert_eq!(labels, vec!["Pan", "Polygon", "Rectangle", "Circle"]);
    }
}
