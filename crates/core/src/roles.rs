//! User roles and role name constants.
//!
//! These must match the `user_role` enum created in
//! `20260305000001_create_profiles.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_NGO: &str = "ngo";
pub const ROLE_COMMUNITY: &str = "community";
pub const ROLE_PUBLIC: &str = "public";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_NGO, ROLE_COMMUNITY, ROLE_PUBLIC];

/// User capability role, mapped onto the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Ngo,
    Community,
    Public,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Ngo => ROLE_NGO,
            Self::Community => ROLE_COMMUNITY,
            Self::Public => ROLE_PUBLIC,
        }
    }

    /// Parse a wire label.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_NGO => Ok(Self::Ngo),
            ROLE_COMMUNITY => Ok(Self::Community),
            ROLE_PUBLIC => Ok(Self::Public),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_round_trip() {
        for role in [
            UserRole::Admin,
            UserRole::Ngo,
            UserRole::Community,
            UserRole::Public,
        ] {
            assert_eq!(UserRole::from_name(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn constants_cover_every_variant() {
        assert_eq!(VALID_ROLES.len(), 4);
        for role in VALID_ROLES {
            assert!(UserRole::from_name(role).is_ok());
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let result = UserRole::from_name("superuser");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid role"));
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(UserRole::Admin.is_admin());
        for role in [UserRole::Ngo, UserRole::Community, UserRole::Public] {
            assert!(!role.is_admin());
        }
    }
}
