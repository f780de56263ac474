use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

use crate::features::reports::models::timestamp::{self, TimestampError};

/// Raised when a query or seed value names an enum variant that does not exist
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Lifecycle status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Pending,
    InProcess,
    Completed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::InProcess,
        ReportStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::InProcess => "in-process",
            ReportStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::InProcess => "In Process",
            ReportStatus::Completed => "Completed",
        }
    }

    /// Chart color for the status distribution
    pub fn color(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "#F59E0B",
            ReportStatus::InProcess => "#3B82F6",
            ReportStatus::Completed => "#10B981",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_string(),
                expected: "pending, in-process, completed",
            })
    }
}

/// Ordinal severity tag used for prioritisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    /// Most severe first, the order dashboards list the levels in
    pub const ALL: [Urgency; 4] = [
        Urgency::Critical,
        Urgency::High,
        Urgency::Medium,
        Urgency::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
            Urgency::Critical => "Critical",
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            Urgency::Low => 1,
            Urgency::Medium => 2,
            Urgency::High => 3,
            Urgency::Critical => 4,
        }
    }

    /// Marker color on the live map
    pub fn color(&self) -> &'static str {
        match self {
            Urgency::Low => "#22c55e",
            Urgency::Medium => "#eab308",
            Urgency::High => "#f97316",
            Urgency::Critical => "#ef4444",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Urgency::ALL
            .into_iter()
            .find(|urgency| urgency.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "urgency",
                value: s.to_string(),
                expected: "low, medium, high, critical",
            })
    }
}

/// Priority of a possibly unset urgency; unset ranks below every level
pub fn urgency_priority(urgency: Option<Urgency>) -> u8 {
    match urgency {
        Some(level) => level.priority(),
        None => 0,
    }
}

pub fn urgency_label(urgency: Option<Urgency>) -> &'static str {
    match urgency {
        Some(level) => level.label(),
        None => "Not Set",
    }
}

pub fn urgency_color(urgency: Option<Urgency>) -> &'static str {
    match urgency {
        Some(level) => level.color(),
        None => "#6b7280",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Geolocation {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Geolocation {
    /// Zero coordinates mark a report that was submitted without a location fix
    pub fn is_located(&self) -> bool {
        self.lat != 0.0 && self.lng != 0.0
    }
}

/// A citizen-submitted civic issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub id: String,
    pub serial_number: u32,
    pub request_id: String,
    pub category: String,
    pub area: String,
    /// 12-hour clock, e.g. "02:15 PM"
    pub time: String,
    /// Day/month/year, e.g. "15/03/2025"
    pub date: String,
    pub status: ReportStatus,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_note: Option<String>,
    pub geolocation: Geolocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

impl Report {
    /// The instant the report was filed, combining `date` and `time`
    pub fn reported_at(&self) -> Result<NaiveDateTime, TimestampError> {
        timestamp::parse_report_timestamp(&self.date, &self.time)
    }

    pub fn reported_on(&self) -> Result<NaiveDate, TimestampError> {
        timestamp::parse_report_date(&self.date)
    }

    pub fn priority(&self) -> u8 {
        urgency_priority(self.urgency)
    }
}
