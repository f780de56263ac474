pub mod dashboard_handler;

pub use dashboard_handler::{
    __path_get_heatmap, __path_get_map, __path_get_statistics, __path_get_summary, get_heatmap,
    get_map, get_statistics, get_summary,
};
