//! Synthetic heat-map points.
//!
//! Each located report contributes its own point and, depending on urgency, a
//! small cluster of jittered points around it so severe areas glow hotter.
//! Jitter comes from a SHA-256 digest of the report id and point position
//! rather than an RNG, which keeps the layer identical between requests.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::features::reports::models::{Report, Urgency};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Lat,
    Lng,
    Intensity,
}

impl Axis {
    fn tag(self) -> &'static str {
        match self {
            Axis::Lat => "lat",
            Axis::Lng => "lng",
            Axis::Intensity => "intensity",
        }
    }
}

/// Cluster shape for one urgency level
struct Cluster {
    points: usize,
    /// Half-width of the jitter box, in degrees
    spread: f64,
    /// Whether intensity varies per point or stays at `base * 0.6`
    varied: bool,
}

pub fn base_intensity(urgency: Option<Urgency>) -> f64 {
    match urgency {
        Some(Urgency::Critical) => 1.0,
        Some(Urgency::High) => 0.8,
        Some(Urgency::Medium) => 0.6,
        Some(Urgency::Low) => 0.4,
        None => 0.3,
    }
}

fn cluster_for(urgency: Option<Urgency>) -> Option<Cluster> {
    match urgency {
        Some(Urgency::Critical) => Some(Cluster {
            points: 5,
            spread: 0.0015,
            varied: true,
        }),
        Some(Urgency::High) => Some(Cluster {
            points: 3,
            spread: 0.0015,
            varied: true,
        }),
        Some(Urgency::Medium) => Some(Cluster {
            points: 2,
            spread: 0.001,
            varied: false,
        }),
        Some(Urgency::Low) | None => None,
    }
}

/// Deterministic value in [0, 1) for one coordinate of one cluster point
fn unit_jitter(report_id: &str, index: usize, axis: Axis) -> f64 {
    let mut hasher = Sha256::new();
    hasher.update(report_id.as_bytes());
    hasher.update(b":");
    hasher.update(index.to_le_bytes());
    hasher.update(b":");
    hasher.update(axis.tag().as_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    // Top 53 bits fill an f64 mantissa exactly
    (u64::from_be_bytes(head) >> 11) as f64 / (1u64 << 53) as f64
}

/// Number of points a report contributes
pub fn points_per_report(report: &Report) -> usize {
    if !report.geolocation.is_located() {
        return 0;
    }
    1 + cluster_for(report.urgency).map_or(0, |c| c.points)
}

pub fn heat_points(reports: &[Report]) -> Vec<HeatPoint> {
    let mut points = Vec::with_capacity(reports.iter().map(points_per_report).sum());

    for report in reports.iter().filter(|r| r.geolocation.is_located()) {
        let origin = &report.geolocation;
        let base = base_intensity(report.urgency);
        points.push(HeatPoint {
            lat: origin.lat,
            lng: origin.lng,
            intensity: base,
        });

        let Some(cluster) = cluster_for(report.urgency) else {
            continue;
        };
        for index in 0..cluster.points {
            let offset = |axis| (unit_jitter(&report.id, index, axis) - 0.5) * 2.0 * cluster.spread;
            let intensity = if cluster.varied {
                base * (0.5 + unit_jitter(&report.id, index, Axis::Intensity) * 0.5)
            } else {
                base * 0.6
            };
            points.push(HeatPoint {
                lat: origin.lat + offset(Axis::Lat),
                lng: origin.lng + offset(Axis::Lng),
                intensity,
            });
        }
    }
    points
}
