use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UserProfile, UserProfileResponseDto};
use crate::shared::seed::{self, SeedError};

/// Serves the administrator profile
pub struct UserProfileService {
    profile: UserProfile,
}

impl UserProfileService {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    pub fn from_seed() -> Result<Self, SeedError> {
        let profile: UserProfile = seed::parse("profile.json", seed::PROFILE_JSON)?;
        Ok(Self::new(profile))
    }

    /// Static profile enriched with the caller's session
    pub fn get_profile(&self, user: &AuthenticatedUser) -> UserProfileResponseDto {
        UserProfileResponseDto {
            profile: self.profile.clone(),
            signed_in_at: user.signed_in_at,
            session_expires_at: user.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::create_admin_user;

    #[test]
    fn test_profile_carries_session_context() {
        let service = UserProfileService::from_seed().unwrap();
        let user = create_admin_user();

        let response = service.get_profile(&user);
        assert_eq!(response.profile.designation, "District Collector");
        assert_eq!(response.signed_in_at, user.signed_in_at);
    }
}
