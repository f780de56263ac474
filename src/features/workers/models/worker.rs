use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A field worker who can be dispatched to reports of their category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Worker {
    pub id: String,
    pub name: String,
    /// Must equal a report's category, byte for byte, to be eligible for it
    pub category: String,
    pub contact: String,
    pub area: String,
    pub available: bool,
}
