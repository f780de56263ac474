use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{urgency_color, urgency_label, Report, ReportStatus, Urgency};
use crate::features::reports::services::statistics::UrgencyCounts;
use crate::features::reports::services::{filter_reports, ReportFilter};
use crate::shared::constants::MAP_CENTER;

/// One pin on the live map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapMarker {
    pub id: String,
    pub request_id: String,
    pub category: String,
    pub area: String,
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub urgency_label: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub color: String,
    pub opacity: f64,
}

impl From<&Report> for MapMarker {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            request_id: report.request_id.clone(),
            category: report.category.clone(),
            area: report.area.clone(),
            status: report.status,
            urgency: report.urgency,
            urgency_label: urgency_label(report.urgency).to_string(),
            lat: report.geolocation.lat,
            lng: report.geolocation.lng,
            address: report.geolocation.address.clone(),
            color: urgency_color(report.urgency).to_string(),
            opacity: marker_opacity(report.status),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

impl Default for MapCenter {
    fn default() -> Self {
        Self {
            lat: MAP_CENTER.0,
            lng: MAP_CENTER.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapView {
    pub center: MapCenter,
    pub markers: Vec<MapMarker>,
    pub urgency_counts: UrgencyCounts,
}

/// Completed reports are dimmed on the map
pub fn marker_opacity(status: ReportStatus) -> f64 {
    match status {
        ReportStatus::Completed => 0.6,
        ReportStatus::Pending | ReportStatus::InProcess => 1.0,
    }
}

pub fn map_view(reports: &[Report], filter: &ReportFilter) -> MapView {
    let filtered = filter_reports(reports, filter);
    MapView {
        center: MapCenter::default(),
        markers: filtered.iter().map(MapMarker::from).collect(),
        urgency_counts: UrgencyCounts::of(&filtered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::services::Constraint;
    use crate::shared::test_helpers::seed_reports;

    #[test]
    fn test_unfiltered_map_of_seed() {
        let view = map_view(&seed_reports(), &ReportFilter::default());
        assert_eq!(view.markers.len(), 22);
        assert_eq!(view.center, MapCenter { lat: 23.6102, lng: 85.2799 });
        assert_eq!(view.urgency_counts.critical, 5);

        let completed = view.markers.iter().find(|m| m.id == "2").unwrap();
        assert_eq!(completed.opacity, 0.6);
        let critical = view.markers.iter().find(|m| m.id == "3").unwrap();
        assert_eq!(critical.color, "#ef4444");
        assert_eq!(critical.opacity, 1.0);
    }

    #[test]
    fn test_counts_follow_filter() {
        let filter = ReportFilter {
            status: Constraint::Exactly(ReportStatus::Completed),
            ..ReportFilter::default()
        };
        let view = map_view(&seed_reports(), &filter);

        assert_eq!(view.markers.len(), 5);
        assert!(view.markers.iter().all(|m| m.opacity == 0.6));
        assert_eq!(view.urgency_counts.medium, 3);
        assert_eq!(view.urgency_counts.low, 2);
    }
}
