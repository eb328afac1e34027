pub mod chart;
pub mod error;
pub mod geojson;
pub mod marker;
pub mod models;
pub mod orchestrator;
pub mod region;
pub mod selection;
pub mod store;
