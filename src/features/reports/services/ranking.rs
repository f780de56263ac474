use chrono::NaiveDateTime;
use serde::Deserialize;
use std::cmp::Ordering;
use utoipa::ToSchema;

use crate::features::reports::models::Report;

/// Field the report table is ordered by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the store order
    #[default]
    None,
    DateTime,
    Urgency,
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Instant used for date-time ordering.
///
/// An unparseable timestamp yields `None`, which orders before every real
/// instant. The store refuses such records, so this only matters for callers
/// handing in their own collections.
fn sort_instant(report: &Report) -> Option<NaiveDateTime> {
    report.reported_at().ok()
}

/// Orders `reports` by `key` in `direction`.
///
/// The sort is stable in both directions: reports that compare equal keep
/// their relative input order.
pub fn sort_reports(mut reports: Vec<Report>, key: SortKey, direction: SortDirection) -> Vec<Report> {
    match key {
        SortKey::None => {}
        SortKey::DateTime => {
            let mut keyed: Vec<(Option<NaiveDateTime>, Report)> =
                reports.into_iter().map(|r| (sort_instant(&r), r)).collect();
            keyed.sort_by(|(a, _), (b, _)| direction.apply(a.cmp(b)));
            reports = keyed.into_iter().map(|(_, r)| r).collect();
        }
        SortKey::Urgency => {
            reports.sort_by(|a, b| direction.apply(a.priority().cmp(&b.priority())));
        }
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{urgency_priority, Urgency};
    use crate::shared::test_helpers::{random_reports, report, seed_reports};

    fn scenario() -> Vec<Report> {
        vec![
            report("a", "15/03/2025", "10:30 AM", Some(Urgency::High)),
            report("b", "16/03/2025", "08:45 AM", Some(Urgency::Critical)),
            report("c", "15/03/2025", "02:15 PM", Some(Urgency::Medium)),
        ]
    }

    fn ids(reports: &[Report]) -> Vec<&str> {
        reports.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_date_time_ascending() {
        let sorted = sort_reports(scenario(), SortKey::DateTime, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_date_time_descending() {
        let sorted = sort_reports(scenario(), SortKey::DateTime, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_urgency_descending() {
        let sorted = sort_reports(scenario(), SortKey::Urgency, SortDirection::Desc);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_none_is_identity() {
        let reports = seed_reports();
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(sort_reports(reports.clone(), SortKey::None, direction), reports);
        }
    }

    #[test]
    fn test_urgency_ties_keep_input_order() {
        let reports = vec![
            report("1", "15/03/2025", "10:00 AM", Some(Urgency::High)),
            report("2", "15/03/2025", "10:00 AM", None),
            report("3", "15/03/2025", "10:00 AM", Some(Urgency::High)),
            report("4", "15/03/2025", "10:00 AM", None),
        ];

        let desc = sort_reports(reports.clone(), SortKey::Urgency, SortDirection::Desc);
        assert_eq!(ids(&desc), vec!["1", "3", "2", "4"]);

        let asc = sort_reports(reports, SortKey::Urgency, SortDirection::Asc);
        assert_eq!(ids(&asc), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_midnight_and_noon_ordering() {
        let reports = vec![
            report("noon", "01/04/2025", "12:00 PM", None),
            report("midnight", "01/04/2025", "12:00 AM", None),
            report("morning", "01/04/2025", "11:59 AM", None),
        ];
        let sorted = sort_reports(reports, SortKey::DateTime, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["midnight", "morning", "noon"]);
    }

    #[test]
    fn test_malformed_timestamp_sorts_first_ascending() {
        let reports = vec![
            report("ok", "15/03/2025", "10:30 AM", None),
            report("broken", "2025-03-15", "10:30", None),
        ];
        let sorted = sort_reports(reports, SortKey::DateTime, SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["broken", "ok"]);
    }

    #[test]
    fn test_seed_urgency_descending_starts_with_critical() {
        let sorted = sort_reports(seed_reports(), SortKey::Urgency, SortDirection::Desc);
        assert_eq!(
            ids(&sorted[..5]),
            vec!["3", "7", "8", "13", "14"],
            "critical reports in store order"
        );
        assert_eq!(sorted.last().map(|r| r.id.as_str()), Some("22"));
    }

    #[test]
    fn test_urgency_descending_is_monotonic_for_random_collections() {
        for _ in 0..50 {
            let sorted = sort_reports(random_reports(30), SortKey::Urgency, SortDirection::Desc);
            for pair in sorted.windows(2) {
                assert!(urgency_priority(pair[0].urgency) >= urgency_priority(pair[1].urgency));
            }
        }
    }

    #[test]
    fn test_date_time_ascending_is_monotonic_for_random_collections() {
        for _ in 0..50 {
            let sorted = sort_reports(random_reports(30), SortKey::DateTime, SortDirection::Asc);
            for pair in sorted.windows(2) {
                assert!(pair[0].reported_at().unwrap() <= pair[1].reported_at().unwrap());
            }
        }
    }

    #[test]
    fn test_sort_is_a_permutation() {
        let reports = random_reports(25);
        let mut sorted_ids: Vec<String> =
            sort_reports(reports.clone(), SortKey::DateTime, SortDirection::Desc)
                .into_iter()
                .map(|r| r.id)
                .collect();
        let mut original_ids: Vec<String> = reports.into_iter().map(|r| r.id).collect();
        sorted_ids.sort();
        original_ids.sort();
        assert_eq!(sorted_ids, original_ids);
    }
}
