//! Selection state machine.
//!
//! All page state lives in [`AppState`] and changes only through
//! [`AppState::handle`], so a whole session can be replayed as a list of
//! [`Event`]s without a browser.

use crate::chart::ScatterChart;
use crate::error::LoadError;
use crate::models::VelocityPoint;
use crate::region::Region;
use crate::selection;
use crate::store::FeatureStore;

#[derive(Debug)]
pub enum Event {
    /// The data source resolved.
    DataLoaded(Vec<VelocityPoint>),
    /// The data source was unreachable or malformed.
    LoadFailed(LoadError),
    /// The user finished drawing a shape.
    ShapeDrawn(Region),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Idle,
    HasSelection {
        region: Region,
        result: Vec<VelocityPoint>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    store: FeatureStore,
    selection: Selection,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn current_region(&self) -> Option<&Region> {
        match &self.selection {
            Selection::Idle => None,
            Selection::HasSelection { region, .. } => Some(region),
        }
    }

    pub fn selected_points(&self) -> &[VelocityPoint] {
        match &self.selection {
            Selection::Idle => &[],
            Selection::HasSelection { result, .. } => result,
        }
    }

    /// Apply one event. Returns the chart to render when the selection changed.
    pub fn handle(&mut self, event: Event) -> Option<ScatterChart> {
        match event {
            Event::DataLoaded(points) => {
                tracing::info!(points = points.len(), "Feature store ready");
                self.store = FeatureStore::from_points(points);
                None
            }
            Event::LoadFailed(err) => {
                tracing::warn!(error = %err, "Velocity data unavailable, selections will be empty");
                self.store.mark_failed();
                None
            }
            Event::ShapeDrawn(region) => self.select(region),
        }
    }

    fn select(&mut self, region: Region) -> Option<ScatterChart> {
        let polygon = match region.to_polygon() {
            Ok(polygon) => polygon,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring drawn shape");
                return None;
            }
        };

        let result = selection::filter(&polygon, self.store.points());
        tracing::debug!(
            selected = result.len(),
            total = self.store.len(),
            degenerate = polygon.is_degenerate(),
            "Selection updated"
        );

        let chart = ScatterChart::from_points(&result);
        self.selection = Selection::HasSelection { region, result };
        Some(chart)
    }
}
