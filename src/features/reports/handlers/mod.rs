pub mod report_handler;

pub use report_handler::{
    __path_get_report, __path_list_categories, __path_list_reports, get_report, list_categories,
    list_reports,
};
