use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use velmap_shared::marker::{self, Marker, ICON_SIZE};
use velmap_shared::models::Position;
use velmap_shared::orchestrator::AppState;
use velmap_shared::region::Region;

use crate::components::draw_toolbar::DrawToolbar;
use crate::coords::{self, Viewport, VIEW_HEIGHT, VIEW_WIDTH};
use crate::drawing::{Draft, DrawTool};

const MAP_CONTAINER_ID: &str = "velocity-map-container";

/// Drag threshold in view pixels. Movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

const ZOOM_STEP: f64 = 0.25;

/// Graticule spacings in degrees, coarsest first.
const GRATICULE_STEPS: [f64; 8] = [30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.25, 0.1];

/// Minimum on-screen spacing between graticule lines.
const GRATICULE_MIN_PX: f64 = 70.0;

// ---------------------------------------------------------------------------
// Graticule math (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Finest graticule step whose lines stay at least `GRATICULE_MIN_PX` apart.
fn graticule_step(px_per_degree: f64) -> f64 {
    GRATICULE_STEPS
        .iter()
        .copied()
        .filter(|step| step * px_per_degree >= GRATICULE_MIN_PX)
        .last()
        .unwrap_or(GRATICULE_STEPS[0])
}

/// Multiples of `step` within [lo, hi].
fn graticule_values(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

/// Build the full SVG content as a string for reliable rendering.
/// Coordinates are logical view pixels (`VIEW_WIDTH` × `VIEW_HEIGHT`).
fn build_svg_content(
    viewport: &Viewport,
    markers: &[Marker],
    region: Option<&[Position]>,
    draft_path: &[Position],
) -> String {
    let mut svg = String::with_capacity(16384);
    build_graticule(&mut svg, viewport);
    if let Some(vertices) = region {
        build_region(&mut svg, viewport, vertices);
    }
    build_markers(&mut svg, viewport, markers);
    build_draft(&mut svg, viewport, draft_path);
    svg
}

fn build_graticule(svg: &mut String, viewport: &Viewport) {
    let top_left = viewport.to_position(0.0, 0.0);
    let bottom_right = viewport.to_position(VIEW_WIDTH, VIEW_HEIGHT);
    let step = graticule_step(viewport.px_per_degree());

    for lon in graticule_values(top_left.lon, bottom_right.lon, step) {
        let (x, _) = viewport.to_view(Position::new(lon, 0.0));
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{VIEW_HEIGHT}" class="graticule"/>"#
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="14" class="graticule-label">{lon}°</text>"#,
            x + 3.0
        ));
    }
    let lat_lo = bottom_right.lat.max(-90.0);
    let lat_hi = top_left.lat.min(90.0);
    for lat in graticule_values(lat_lo, lat_hi, step) {
        let (_, y) = viewport.to_view(Position::new(0.0, lat));
        svg.push_str(&format!(
            r#"<line x1="0" y1="{y}" x2="{VIEW_WIDTH}" y2="{y}" class="graticule"/>"#
        ));
        svg.push_str(&format!(
            r#"<text x="4" y="{}" class="graticule-label">{lat}°</text>"#,
            y - 3.0
        ));
    }
}

fn points_attr(viewport: &Viewport, path: &[Position]) -> String {
    path.iter()
        .map(|p| {
            let (x, y) = viewport.to_view(*p);
            format!("{x},{y}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_region(svg: &mut String, viewport: &Viewport, vertices: &[Position]) {
    if vertices.is_empty() {
        return;
    }
    let points = points_attr(viewport, vertices);
    svg.push_str(&format!(r#"<polygon points="{points}" class="region"/>"#));
}

fn build_markers(svg: &mut String, viewport: &Viewport, markers: &[Marker]) {
    let half = ICON_SIZE / 2.0;
    // East-pointing arrow in an ICON_SIZE box centered on the origin
    let glyph = format!(
        "M{half} 0 L{} {} L{} {} L{} {} L{} {} L{} {} L{} {} Z",
        half * 0.1,
        -half * 0.6,
        half * 0.1,
        -half * 0.18,
        -half,
        -half * 0.18,
        -half,
        half * 0.18,
        half * 0.1,
        half * 0.18,
        half * 0.1,
        half * 0.6,
    );
    for m in markers {
        let (x, y) = viewport.to_view(m.position);
        if !Viewport::is_visible(x, y, ICON_SIZE) {
            continue;
        }
        let rot = m.rotation_degrees;
        // scale(1 -1) flips to north-up so the angle turns counter-clockwise on screen
        svg.push_str(&format!(
            r#"<g transform="translate({x} {y}) scale(1 -1) rotate({rot})" class="velocity-marker"><path d="{glyph}"/><title>{:.2} mm/yr</title></g>"#,
            m.magnitude
        ));
    }
}

fn build_draft(svg: &mut String, viewport: &Viewport, path: &[Position]) {
    if path.is_empty() {
        return;
    }
    let points = points_attr(viewport, path);
    svg.push_str(&format!(r#"<polyline points="{points}" class="draft"/>"#));
    for p in path {
        let (x, y) = viewport.to_view(*p);
        svg.push_str(&format!(r#"<circle cx="{x}" cy="{y}" r="3" class="draft-vertex"/>"#));
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    app: Signal<AppState>,
    tool: Signal<DrawTool>,
    on_shape_drawn: EventHandler<Region>,
) -> Element {
    let mut viewport = use_signal(Viewport::default);
    let mut draft = use_signal(Draft::default);

    // Pan drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start = use_signal(|| (0.0_f64, 0.0_f64));
    let mut drag_start_view = use_signal(Viewport::default);

    // Markers only change when the store is replaced
    let markers = use_memo(move || marker::markers(app.read().store().points()));

    let svg_html = use_memo(move || {
        let state = app.read();
        let region_vertices = state
            .current_region()
            .and_then(|r| r.to_polygon().ok())
            .map(|p| p.vertices());
        let draft_path = draft.read().preview_path();
        let svg_content = build_svg_content(
            &viewport.read(),
            &markers.read(),
            region_vertices.as_deref(),
            &draft_path,
        );
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {VIEW_WIDTH} {VIEW_HEIGHT}" preserveAspectRatio="none" style="position:absolute;top:0;left:0;width:100%;height:100%;pointer-events:none;">{svg_content}</svg>"#
        )
    });

    let cur_tool = *tool.read();
    let hint = cur_tool.hint();
    let drafting = draft.read().is_active();
    let container_class = if *is_dragging.read() && cur_tool == DrawTool::Pan {
        "map-container dragging"
    } else if cur_tool == DrawTool::Pan {
        "map-container"
    } else {
        "map-container drawing"
    };

    rsx! {
        div { class: "map-panel",
            DrawToolbar {
                tool: tool,
                drafting: drafting,
                on_cancel: move |_| draft.write().cancel(),
            }
            div {
                id: MAP_CONTAINER_ID,
                class: "{container_class}",

                onwheel: move |evt: Event<WheelData>| {
                    evt.prevent_default();
                    let delta_y = wheel_delta_y(evt.data().delta());
                    let step = if delta_y < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
                    let client = evt.data().client_coordinates();
                    let Some((x, y)) = coords::client_to_view(client.x, client.y, MAP_CONTAINER_ID) else {
                        return;
                    };
                    let cur = *viewport.read();
                    viewport.set(cur.zoomed_at(x, y, cur.zoom + step));
                },

                onmousedown: move |evt: Event<MouseData>| {
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    let client = evt.client_coordinates();
                    is_dragging.set(true);
                    did_drag.set(false);
                    drag_start.set((client.x, client.y));
                    drag_start_view.set(*viewport.read());

                    if let Some((x, y)) = coords::client_to_view(client.x, client.y, MAP_CONTAINER_ID) {
                        let at = viewport.read().to_position(x, y);
                        draft.write().press(*tool.read(), at);
                    }
                },

                onmousemove: move |evt: Event<MouseData>| {
                    let client = evt.client_coordinates();

                    if *is_dragging.read() && *tool.read() == DrawTool::Pan {
                        let (sx, sy) = *drag_start.read();
                        let Some((dx, dy)) = coords::client_delta_to_view(
                            client.x - sx, client.y - sy, MAP_CONTAINER_ID,
                        ) else {
                            return;
                        };
                        if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                            did_drag.set(true);
                        }
                        if *did_drag.read() {
                            let start_view = *drag_start_view.read();
                            viewport.set(start_view.panned(dx, dy));
                        }
                        return;
                    }

                    if draft.read().is_active() {
                        if let Some((x, y)) = coords::client_to_view(client.x, client.y, MAP_CONTAINER_ID) {
                            let at = viewport.read().to_position(x, y);
                            draft.write().move_to(at);
                        }
                    }
                },

                onmouseup: move |evt: Event<MouseData>| {
                    let was_dragging = *is_dragging.read();
                    is_dragging.set(false);
                    if !was_dragging {
                        return;
                    }

                    let client = evt.client_coordinates();
                    let Some((x, y)) = coords::client_to_view(client.x, client.y, MAP_CONTAINER_ID) else {
                        return;
                    };
                    let cur_view = *viewport.read();
                    let at = cur_view.to_position(x, y);

                    let finished = match *tool.read() {
                        DrawTool::Pan => None,
                        DrawTool::Polygon => draft.write().click(at, &cur_view),
                        DrawTool::Rectangle | DrawTool::Circle => draft.write().release(at, &cur_view),
                    };
                    if let Some(region) = finished {
                        on_shape_drawn.call(region);
                    }
                },

                onmouseleave: move |_| {
                    is_dragging.set(false);
                },

                ondoubleclick: move |evt: Event<MouseData>| {
                    evt.prevent_default();
                    if *tool.read() != DrawTool::Polygon {
                        return;
                    }
                    let finished = draft.write().finish();
                    if let Some(region) = finished {
                        on_shape_drawn.call(region);
                    }
                },

                div {
                    class: "map-layer",
                    dangerous_inner_html: "{svg_html}",
                }
            }
            p { class: "hint", "{hint}" }
        }
    }
}
