//! Aggregate analytics over a report collection.
//!
//! Everything here is a pure function of its inputs. The timeline is anchored
//! on an explicit day rather than the wall clock, so the same collection and
//! options always produce the same numbers.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::{Report, ReportStatus, Urgency};
use crate::shared::constants::DEFAULT_TOP_AREAS;

/// Trailing period covered by the daily timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    /// From the earliest report date through the anchor
    #[serde(rename = "all")]
    AllTime,
}

impl TimeWindow {
    /// Fixed length in days, `None` for the open-ended window
    pub fn days(&self) -> Option<u64> {
        match self {
            TimeWindow::SevenDays => Some(7),
            TimeWindow::ThirtyDays => Some(30),
            TimeWindow::AllTime => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_process: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn of(reports: &[Report]) -> Self {
        let mut counts = Self::default();
        for report in reports {
            match report.status {
                ReportStatus::Pending => counts.pending += 1,
                ReportStatus::InProcess => counts.in_process += 1,
                ReportStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_process + self.completed
    }
}

/// Counts per urgency level; reports without urgency are kept apart in `unset`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UrgencyCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub unset: usize,
}

impl UrgencyCounts {
    pub fn of(reports: &[Report]) -> Self {
        let mut counts = Self::default();
        for report in reports {
            match report.urgency {
                Some(Urgency::Critical) => counts.critical += 1,
                Some(Urgency::High) => counts.high += 1,
                Some(Urgency::Medium) => counts.medium += 1,
                Some(Urgency::Low) => counts.low += 1,
                None => counts.unset += 1,
            }
        }
        counts
    }

    /// Sum over the four levels, excluding `unset`
    pub fn levels_total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AreaCount {
    pub area: String,
    pub count: usize,
}

/// One day of the timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyCount {
    pub date: NaiveDate,
    /// Chart axis label, "MM/dd"
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsOptions {
    pub window: TimeWindow,
    /// Last day of the timeline; defaults to the latest report date
    pub anchor: Option<NaiveDate>,
    pub top_areas: usize,
}

impl Default for StatisticsOptions {
    fn default() -> Self {
        Self {
            window: TimeWindow::default(),
            anchor: None,
            top_areas: DEFAULT_TOP_AREAS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportStatistics {
    pub total: usize,
    pub status: StatusCounts,
    pub urgency: UrgencyCounts,
    pub categories: Vec<CategoryCount>,
    pub areas: Vec<AreaCount>,
    pub window: TimeWindow,
    /// Absent only when there is no dated report to anchor on
    pub window_start: Option<NaiveDate>,
    pub anchor: Option<NaiveDate>,
    pub timeline: Vec<DailyCount>,
}

/// Header card numbers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportSummary {
    pub total: usize,
    pub pending: usize,
    pub in_process: usize,
    pub completed: usize,
    pub critical: usize,
}

pub fn summary(reports: &[Report]) -> ReportSummary {
    let status = StatusCounts::of(reports);
    ReportSummary {
        total: reports.len(),
        pending: status.pending,
        in_process: status.in_process,
        completed: status.completed,
        critical: reports
            .iter()
            .filter(|r| r.urgency == Some(Urgency::Critical))
            .count(),
    }
}

/// Counts per category, in order of first appearance
pub fn category_counts(reports: &[Report]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for report in reports {
        match counts.iter_mut().find(|c| c.category == report.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                category: report.category.clone(),
                count: 1,
            }),
        }
    }
    counts
}

/// Busiest areas first; equal counts keep their first-appearance order
pub fn area_counts(reports: &[Report], limit: usize) -> Vec<AreaCount> {
    let mut counts: Vec<AreaCount> = Vec::new();
    for report in reports {
        match counts.iter_mut().find(|c| c.area == report.area) {
            Some(entry) => entry.count += 1,
            None => counts.push(AreaCount {
                area: report.area.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Latest calendar day any report was filed on
pub fn latest_report_date(reports: &[Report]) -> Option<NaiveDate> {
    reports.iter().filter_map(|r| r.reported_on().ok()).max()
}

fn earliest_report_date(reports: &[Report]) -> Option<NaiveDate> {
    reports.iter().filter_map(|r| r.reported_on().ok()).min()
}

fn window_start(reports: &[Report], window: TimeWindow, anchor: NaiveDate) -> NaiveDate {
    match window.days() {
        Some(days) => anchor
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN),
        None => earliest_report_date(reports)
            .map(|earliest| earliest.min(anchor))
            .unwrap_or(anchor),
    }
}

/// Number of daily buckets `derive_statistics` would build for these options
pub fn timeline_days(reports: &[Report], options: &StatisticsOptions) -> i64 {
    match options.anchor.or_else(|| latest_report_date(reports)) {
        Some(anchor) => (anchor - window_start(reports, options.window, anchor)).num_days() + 1,
        None => 0,
    }
}

/// Zero-filled daily counts from `start` through `anchor`, both inclusive
pub fn daily_timeline(reports: &[Report], start: NaiveDate, anchor: NaiveDate) -> Vec<DailyCount> {
    let mut timeline: Vec<DailyCount> = start
        .iter_days()
        .take_while(|day| *day <= anchor)
        .map(|date| DailyCount {
            date,
            label: date.format("%m/%d").to_string(),
            count: 0,
        })
        .collect();

    for day in reports.iter().filter_map(|r| r.reported_on().ok()) {
        if day < start || day > anchor {
            continue;
        }
        let offset = (day - start).num_days();
        if let Some(bucket) = usize::try_from(offset).ok().and_then(|i| timeline.get_mut(i)) {
            bucket.count += 1;
        }
    }
    timeline
}

pub fn derive_statistics(reports: &[Report], options: &StatisticsOptions) -> ReportStatistics {
    let anchor = options.anchor.or_else(|| latest_report_date(reports));
    let window_start = anchor.map(|anchor| window_start(reports, options.window, anchor));
    let timeline = match (window_start, anchor) {
        (Some(start), Some(anchor)) => daily_timeline(reports, start, anchor),
        _ => Vec::new(),
    };

    ReportStatistics {
        total: reports.len(),
        status: StatusCounts::of(reports),
        urgency: UrgencyCounts::of(reports),
        categories: category_counts(reports),
        areas: area_counts(reports, options.top_areas),
        window: options.window,
        window_start,
        anchor,
        timeline,
    }
}
