use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Coarse authorization label, fixed at signup and carried in every token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Restaurant,
    Customer,
    User,
}

impl Role {
    /// Derives the role from an email address. First match wins:
    /// `admin` anywhere, then `letseat` anywhere, then a `@gmail.com` suffix.
    pub fn classify(email: &str) -> Self {
        if email.contains("admin") {
            Role::Admin
        } else if email.contains("letseat") {
            Role::Restaurant
        } else if email.ends_with("@gmail.com") {
            Role::Customer
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Restaurant => "restaurant",
            Role::Customer => "customer",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "restaurant" => Ok(Role::Restaurant),
            "customer" => Ok(Role::Customer),
            "user" => Ok(Role::User),
            other => anyhow::bail!("unknown role: {other}"),
        }
    }
}
