mod report;
pub mod timestamp;

pub use report::{
    urgency_color, urgency_label, urgency_priority, Geolocation, Report, ReportStatus,
    UnknownVariant, Urgency,
};
pub use timestamp::TimestampError;
