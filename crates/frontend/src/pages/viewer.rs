use dioxus::logger::tracing;
use dioxus::prelude::*;
use velmap_shared::chart::ScatterChart;
use velmap_shared::orchestrator::{AppState, Event};
use velmap_shared::region::Region;

use crate::api;
use crate::components::map_view::MapView;
use crate::components::velocity_chart::VelocityChart;
use crate::drawing::DrawTool;

#[component]
pub fn Viewer() -> Element {
    // All selection state goes through AppState::handle
    let mut app = use_signal(AppState::new);
    let mut chart = use_signal(|| None::<ScatterChart>);
    let tool = use_signal(|| DrawTool::Pan);

    // Load the dataset once; a drawing made before it resolves sees an empty store
    let _loader = use_resource(move || async move {
        let event = match api::fetch_velocity_points().await {
            Ok(points) => Event::DataLoaded(points),
            Err(e) => {
                tracing::error!("Failed to load velocity data: {}", e);
                Event::LoadFailed(e)
            }
        };
        app.write().handle(event);
    });

    let on_shape_drawn = move |region: Region| {
        let update = app.write().handle(Event::ShapeDrawn(region));
        // None means the shape was rejected; keep the previous chart
        if let Some(c) = update {
            chart.set(Some(c));
        }
    };

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Velocity Map" }
            }
            div { class: "content",
                MapView {
                    app: app,
                    tool: tool,
                    on_shape_drawn: on_shape_drawn,
                }
                div { class: "sidebar",
                    VelocityChart { chart: chart.read().clone() }
                }
            }
        }
    }
}
