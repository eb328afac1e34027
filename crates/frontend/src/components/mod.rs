pub mod draw_toolbar;
pub mod map_view;
pub mod velocity_chart;
