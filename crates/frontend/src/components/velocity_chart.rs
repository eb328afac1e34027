use dioxus::prelude::*;
use velmap_shared::chart::{ScatterChart, CHART_TITLE};

const CHART_WIDTH: f64 = 420.0;
const CHART_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 58.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 36.0;
const MARGIN_BOTTOM: f64 = 46.0;

/// Tick intervals per axis.
const TICK_COUNT: usize = 4;

const POINT_RADIUS: f64 = 4.0;

// ---------------------------------------------------------------------------
// Axis math (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Padded (min, max) of the finite values. Falls back to (-1, 1) when there
/// is nothing to show, and widens a single value to ±1.
pub fn axis_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (-1.0, 1.0);
    }
    if max - min < f64::EPSILON {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.1;
    (min - pad, max + pad)
}

/// Linear map of `v` from `range` onto [out_lo, out_hi].
pub fn scale(v: f64, range: (f64, f64), out_lo: f64, out_hi: f64) -> f64 {
    let (lo, hi) = range;
    out_lo + (v - lo) / (hi - lo) * (out_hi - out_lo)
}

/// Evenly spaced tick values including both ends.
pub fn ticks(range: (f64, f64), count: usize) -> Vec<f64> {
    let (lo, hi) = range;
    (0..=count)
        .map(|i| lo + (hi - lo) * i as f64 / count as f64)
        .collect()
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

fn build_chart_svg(chart: &ScatterChart) -> String {
    let mut svg = String::with_capacity(4096);
    let plot_left = MARGIN_LEFT;
    let plot_right = CHART_WIDTH - MARGIN_RIGHT;
    let plot_top = MARGIN_TOP;
    let plot_bottom = CHART_HEIGHT - MARGIN_BOTTOM;

    let x_range = axis_range(&chart.x);
    let y_range = axis_range(&chart.y);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}" class="chart-svg">"#
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="22" class="chart-title" text-anchor="middle">{}</text>"#,
        CHART_WIDTH / 2.0,
        chart.title
    ));

    for t in ticks(x_range, TICK_COUNT) {
        let x = scale(t, x_range, plot_left, plot_right);
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="{plot_top}" x2="{x}" y2="{plot_bottom}" class="chart-grid"/>"#
        ));
        svg.push_str(&format!(
            r#"<text x="{x}" y="{}" class="chart-tick" text-anchor="middle">{t:.1}</text>"#,
            plot_bottom + 16.0
        ));
    }
    for t in ticks(y_range, TICK_COUNT) {
        let y = scale(t, y_range, plot_bottom, plot_top);
        svg.push_str(&format!(
            r#"<line x1="{plot_left}" y1="{y}" x2="{plot_right}" y2="{y}" class="chart-grid"/>"#
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{y}" class="chart-tick" text-anchor="end" dominant-baseline="central">{t:.1}</text>"#,
            plot_left - 6.0
        ));
    }

    // Zero lines when the origin is in view
    if x_range.0 < 0.0 && x_range.1 > 0.0 {
        let x = scale(0.0, x_range, plot_left, plot_right);
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="{plot_top}" x2="{x}" y2="{plot_bottom}" class="chart-zero"/>"#
        ));
    }
    if y_range.0 < 0.0 && y_range.1 > 0.0 {
        let y = scale(0.0, y_range, plot_bottom, plot_top);
        svg.push_str(&format!(
            r#"<line x1="{plot_left}" y1="{y}" x2="{plot_right}" y2="{y}" class="chart-zero"/>"#
        ));
    }

    svg.push_str(&format!(
        r#"<rect x="{plot_left}" y="{plot_top}" width="{}" height="{}" class="chart-frame"/>"#,
        plot_right - plot_left,
        plot_bottom - plot_top
    ));

    for (vx, vy) in chart.pairs() {
        if !vx.is_finite() || !vy.is_finite() {
            continue;
        }
        let cx = scale(vx, x_range, plot_left, plot_right);
        let cy = scale(vy, y_range, plot_bottom, plot_top);
        svg.push_str(&format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{POINT_RADIUS}" class="chart-point"><title>vx {vx:.2}, vy {vy:.2}</title></circle>"#
        ));
    }

    if chart.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="chart-empty" text-anchor="middle">No points in selection</text>"#,
            (plot_left + plot_right) / 2.0,
            (plot_top + plot_bottom) / 2.0
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="chart-label" text-anchor="middle">{}</text>"#,
        (plot_left + plot_right) / 2.0,
        CHART_HEIGHT - 8.0,
        chart.x_label
    ));
    let label_y = (plot_top + plot_bottom) / 2.0;
    svg.push_str(&format!(
        r#"<text x="14" y="{label_y}" class="chart-label" text-anchor="middle" transform="rotate(-90 14 {label_y})">{}</text>"#,
        chart.y_label
    ));

    svg.push_str("</svg>");
    svg
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn VelocityChart(chart: Option<ScatterChart>) -> Element {
    let svg_html = chart.as_ref().map(build_chart_svg);
    let count = chart.as_ref().map(ScatterChart::len).unwrap_or(0);

    rsx! {
        div { class: "panel chart-panel",
            if let Some(svg_html) = svg_html {
                div { class: "chart", dangerous_inner_html: "{svg_html}" }
                p { class: "hint", "{count} point(s) selected" }
            } else {
                h3 { "{CHART_TITLE}" }
                p { class: "hint", "Draw a polygon, rectangle or circle on the map to plot velocities." }
            }
        }
    }
}
