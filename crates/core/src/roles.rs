//! Back-office role hierarchy.
//!
//! Admin roles are totally ordered: `moderator < admin < super_admin`.
//! Every access check is a single [`AdminRole::satisfies`] comparison.
//! The string forms must match the `ck_admin_users_role` check constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// All valid admin role names, lowest privilege first.
pub const VALID_ADMIN_ROLES: &[&str] = &[ROLE_MODERATOR, ROLE_ADMIN, ROLE_SUPER_ADMIN];

/// A back-office privilege level.
///
/// Variant order defines the hierarchy, so the derived `Ord` agrees with
/// [`AdminRole::level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Moderator,
    Admin,
    SuperAdmin,
}

impl AdminRole {
    /// Numeric privilege level (`moderator=1`, `admin=2`, `super_admin=3`).
    pub fn level(self) -> u8 {
        match self {
            AdminRole::Moderator => 1,
            AdminRole::Admin => 2,
            AdminRole::SuperAdmin => 3,
        }
    }

    /// Whether a caller holding `self` may access something that needs `required`.
    pub fn satisfies(self, required: AdminRole) -> bool {
        self.level() >= required.level()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminRole::Moderator => ROLE_MODERATOR,
            AdminRole::Admin => ROLE_ADMIN,
            AdminRole::SuperAdmin => ROLE_SUPER_ADMIN,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_MODERATOR => Ok(AdminRole::Moderator),
            ROLE_ADMIN => Ok(AdminRole::Admin),
            ROLE_SUPER_ADMIN => Ok(AdminRole::SuperAdmin),
            other => Err(CoreError::Validation(format!(
                "Invalid admin role '{other}'. Must be one of: {VALID_ADMIN_ROLES:?}"
            ))),
        }
    }
}
