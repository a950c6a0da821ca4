//! The session's user profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validate::{self, ValidationError};

/// Membership tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MembershipType {
    #[default]
    Basic,
    Premium,
    Vip,
}

impl MembershipType {
    /// Returns the display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipType::Basic => "Basic Member",
            MembershipType::Premium => "Premium Member",
            MembershipType::Vip => "VIP Member",
        }
    }
}

impl std::fmt::Display for MembershipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The single local user profile.
///
/// Mutable through [`UserProfile::update`]; persisted by the session on
/// every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub membership: MembershipType,
    pub rating: f64,
    pub join_date: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Guest".to_string(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            membership: MembershipType::Basic,
            rating: 0.0,
            join_date: Utc::now(),
        }
    }
}

impl UserProfile {
    /// Replaces the editable contact fields after validating them.
    ///
    /// Either every field is applied or none is.
    pub fn update(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let email = email.into();
        let phone = phone.into();
        validate::email(&email)?;
        validate::phone(&phone)?;

        self.name = name.into();
        self.email = email;
        self.phone = phone;
        self.address = address.into();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_all_fields() {
        let mut profile = UserProfile::default();
        profile
            .update(
                "Jane Doe",
                "jane@example.com",
                "+1 555 123 4567",
                "123 Main St",
            )
            .unwrap();

        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.email, "jane@example.com");
        assert_eq!(profile.address, "123 Main St");
    }

    #[test]
    fn invalid_email_leaves_profile_untouched() {
        let mut profile = UserProfile::default();
        let before = profile.clone();

        let err = profile
            .update("Jane", "not-an-email", "+1 555 123 4567", "addr")
            .unwrap_err();

        assert!(matches!(err, ValidationError::Email(_)));
        assert_eq!(profile, before);
    }

    #[test]
    fn invalid_phone_leaves_profile_untouched() {
        let mut profile = UserProfile::default();
        let before = profile.clone();

        assert!(
            profile
                .update("Jane", "jane@example.com", "12", "addr")
                .is_err()
        );
        assert_eq!(profile, before);
    }

    #[test]
    fn membership_display_names() {
        assert_eq!(MembershipType::Basic.to_string(), "Basic Member");
        assert_eq!(MembershipType::Vip.to_string(), "VIP Member");
    }

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = UserProfile::default();
        let json = serde_json::to_vec(&profile).unwrap();
        let back: UserProfile = serde_json::from_slice(&json).unwrap();
        assert_eq!(profile, back);
    }
}
