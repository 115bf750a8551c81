use serde::{Deserialize, Serialize};

use super::role::Role;

/// JWT payload. Trusted as of issuance; the user table is not re-read on verify.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub id: i64,       // user ID
    pub name: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}
