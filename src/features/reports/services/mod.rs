pub mod filtering;
pub mod ranking;
mod report_service;
pub mod statistics;

pub use filtering::{distinct_categories, filter_reports, Constraint, ReportFilter};
pub use ranking::{sort_reports, SortDirection, SortKey};
pub use report_service::{validate_reports, ReportService};
pub use statistics::{derive_statistics, ReportStatistics, ReportSummary, StatisticsOptions, TimeWindow};
