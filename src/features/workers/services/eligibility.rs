use crate::features::reports::models::Report;
use crate::features::workers::models::Worker;

pub fn is_eligible(worker: &Worker, report: &Report) -> bool {
    worker.available && worker.category == report.category
}

/// Available workers whose category matches the report's exactly, in input order
pub fn eligible_workers(report: &Report, workers: &[Worker]) -> Vec<Worker> {
    workers
        .iter()
        .filter(|worker| is_eligible(worker, report))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{report, seed_reports, seed_workers, worker};

    fn water_report() -> Report {
        let mut r = report("3", "16/03/2025", "08:45 AM", None);
        r.category = "Water Supply".to_string();
        r
    }

    #[test]
    fn test_only_available_workers_qualify() {
        let workers = vec![
            worker("a", "Water Supply", true),
            worker("b", "Water Supply", false),
        ];

        let eligible = eligible_workers(&water_report(), &workers);
        let ids: Vec<&str> = eligible.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_category_must_match_exactly() {
        let workers = vec![
            worker("a", "water supply", true),
            worker("b", "Water Supply ", true),
            worker("c", "Electricity", true),
        ];
        assert!(eligible_workers(&water_report(), &workers).is_empty());
    }

    #[test]
    fn test_seed_eligibility() {
        let reports = seed_reports();
        let workers = seed_workers();

        let road = reports.iter().find(|r| r.id == "1").unwrap();
        let ids: Vec<String> = eligible_workers(road, &workers)
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["w1", "w2"]);

        // The only street cleaner is off duty
        let cleaning = reports.iter().find(|r| r.id == "2").unwrap();
        assert!(eligible_workers(cleaning, &workers).is_empty());
    }
}
