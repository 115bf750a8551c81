use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;

use super::role::Role;

/// Row as stored; `role` is plain text in the table.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

/// User record.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,                // unique, compared exactly as stored
    #[serde(skip_serializing)]
    pub password_hash: String,        // never exposed in JSON
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        let role = r.role.parse().unwrap_or_else(|_| {
            warn!(user_id = r.id, role = %r.role, "unknown role in users table; treating as user");
            Role::User
        });
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
            password_hash: r.password_hash,
            role,
            created_at: r.created_at,
        }
    }
}

/// Insert payload for a new account.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
}
