mod dashboard_service;
pub mod heatmap;
pub mod markers;

pub use dashboard_service::DashboardService;
pub use heatmap::{heat_points, HeatPoint};
pub use markers::{map_view, MapCenter, MapMarker, MapView};
