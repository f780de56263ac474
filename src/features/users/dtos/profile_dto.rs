use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The static administrator profile shipped with the seed data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
    pub designation: String,
    pub department: String,
    pub contact: String,
    pub email: String,
    pub location: String,
}

/// Response DTO for the profile page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileResponseDto {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Session context of the current login
    pub signed_in_at: DateTime<Utc>,
    pub session_expires_at: DateTime<Utc>,
}
