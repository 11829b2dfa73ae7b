//! Account roles and the role predicates enforced by gated routes.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Role carried by an account row and its identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Role predicate for a gated group of routes.
///
/// Roles are compared exactly; a role string that does not parse into a
/// [`Role`] never satisfies any requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    RequiresRole(Role),
    RequiresAnyOf(&'static [Role]),
}

impl RoleRequirement {
    /// Only administrators.
    pub const ADMIN: Self = Self::RequiresRole(Role::Admin);
    /// Registered customers. Admins may act as customers.
    pub const CUSTOMER: Self = Self::RequiresAnyOf(&[Role::User, Role::Admin]);

    pub fn allows(&self, role: &str) -> bool {
        let Ok(role) = role.parse::<Role>() else {
            return false;
        };
        match self {
            Self::RequiresRole(required) => *required == role,
            Self::RequiresAnyOf(allowed) => allowed.contains(&role),
        }
    }

    /// Message returned to the caller when a valid token carries the wrong role.
    pub fn denial_message(&self) -> &'static str {
        match self {
            Self::RequiresRole(Role::Admin) => {
                "Only Administrator is allowed to perform this action"
            }
            Self::RequiresRole(Role::User) | Self::RequiresAnyOf(_) => {
                "Only registered Customers are allowed to perform this action"
            }
        }
    }
}
