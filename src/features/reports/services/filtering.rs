use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::features::reports::models::{Report, ReportStatus, Urgency};

/// A single filter parameter: either unconstrained or an exact value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Constraint<T> {
    #[default]
    All,
    Exactly(T),
}

impl<T: PartialEq> Constraint<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Constraint::All => true,
            Constraint::Exactly(expected) => expected == value,
        }
    }

    /// An exact constraint never admits an absent value
    pub fn admits_optional(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Constraint::All, _) => true,
            (Constraint::Exactly(expected), Some(value)) => expected == value,
            (Constraint::Exactly(_), None) => false,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Constraint::All)
    }
}

impl<T: FromStr> FromStr for Constraint<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Constraint::All)
        } else {
            s.parse().map(Constraint::Exactly)
        }
    }
}

impl<'de, T> Deserialize<'de> for Constraint<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Conjunction of the urgency, category and status constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub urgency: Constraint<Urgency>,
    pub category: Constraint<String>,
    pub status: Constraint<ReportStatus>,
}

impl ReportFilter {
    pub fn matches(&self, report: &Report) -> bool {
        self.urgency.admits_optional(report.urgency.as_ref())
            && self.category.admits(&report.category)
            && self.status.admits(&report.status)
    }

    pub fn is_unconstrained(&self) -> bool {
        self.urgency.is_all() && self.category.is_all() && self.status.is_all()
    }
}

/// Returns the subsequence of `reports` satisfying every active constraint
pub fn filter_reports(reports: &[Report], filter: &ReportFilter) -> Vec<Report> {
    reports
        .iter()
        .filter(|report| filter.matches(report))
        .cloned()
        .collect()
}

/// Distinct categories in order of first appearance
pub fn distinct_categories(reports: &[Report]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for report in reports {
        if !categories.iter().any(|c| c == &report.category) {
            categories.push(report.category.clone());
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report, seed_reports};

    fn ids(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_constraint_parsing() {
        assert_eq!("all".parse::<Constraint<Urgency>>(), Ok(Constraint::All));
        assert_eq!("ALL".parse::<Constraint<Urgency>>(), Ok(Constraint::All));
        assert_eq!("".parse::<Constraint<Urgency>>(), Ok(Constraint::All));
        assert_eq!(
            "critical".parse::<Constraint<Urgency>>(),
            Ok(Constraint::Exactly(Urgency::Critical))
        );
        assert!("severe".parse::<Constraint<Urgency>>().is_err());
        assert_eq!(
            "Water Supply".parse::<Constraint<String>>(),
            Ok(Constraint::Exactly("Water Supply".to_string()))
        );
    }

    #[test]
    fn test_unconstrained_filter_is_identity() {
        let reports = seed_reports();
        let filter = ReportFilter::default();
        assert!(filter.is_unconstrained());
        assert_eq!(filter_reports(&reports, &filter), reports);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let reports = seed_reports();
        let filter = ReportFilter {
            urgency: Constraint::Exactly(Urgency::Critical),
            category: Constraint::Exactly("Water Supply".to_string()),
            status: Constraint::Exactly(ReportStatus::InProcess),
        };

        let filtered = filter_reports(&reports, &filter);
        assert_eq!(ids(&filtered), vec!["3", "7"]);
    }

    #[test]
    fn test_urgency_filter_skips_unset_urgency() {
        let mut unset = report("99", "15/03/2025", "10:00 AM", None);
        unset.category = "Electricity".to_string();
        let reports = vec![unset, report("1", "15/03/2025", "10:00 AM", Some(Urgency::Low))];

        let filter = ReportFilter {
            urgency: Constraint::Exactly(Urgency::Low),
            ..ReportFilter::default()
        };
        assert_eq!(ids(&filter_reports(&reports, &filter)), vec!["1"]);
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let reports = seed_reports();
        let filter = ReportFilter {
            category: Constraint::Exactly("water supply".to_string()),
            ..ReportFilter::default()
        };
        assert!(filter_reports(&reports, &filter).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let reports = seed_reports();
        let filter = ReportFilter {
            status: Constraint::Exactly(ReportStatus::Pending),
            ..ReportFilter::default()
        };

        let once = filter_reports(&reports, &filter);
        let twice = filter_reports(&once, &filter);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| r.status == ReportStatus::Pending));
    }

    #[test]
    fn test_distinct_categories_keep_first_occurrence_order() {
        let categories = distinct_categories(&seed_reports());
        assert_eq!(
            &categories[..5],
            &[
                "Road Maintenance",
                "Street Cleaning",
                "Water Supply",
                "Electricity",
                "Waste Management",
            ]
        );
        assert_eq!(categories.len(), 12);
    }
}
