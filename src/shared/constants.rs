/// Number of areas returned by the area analysis when the caller does not ask for a limit
pub const DEFAULT_TOP_AREAS: usize = 10;

/// Upper bound accepted for the `top_areas` query parameter
pub const MAX_TOP_AREAS: usize = 100;

/// Geographic centre of Jharkhand, used as the default map view
pub const MAP_CENTER: (f64, f64) = (23.6102, 85.2799);

/// Display format shared by report timestamps and dispatch timestamps
pub const DISPLAY_DATE_TIME_FORMAT: &str = "%d/%m/%Y %I:%M %p";

/// Progress note attached to freshly dispatched workers
pub const DISPATCH_INITIAL_PROGRESS: &str = "En route to location";

/// Longest daily timeline the statistics endpoint will build
pub const MAX_TIMELINE_DAYS: i64 = 366;
