use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::{claims::Claims, jwt::JwtKeys, role::Role};
use crate::error::{ApiError, TokenError};

/// Verified claims of the caller. Missing header is 401, a bad token 403.
pub struct AuthUser(pub Claims);

/// [`AuthUser`] whose role is `admin`; anyone else gets 403.
pub struct AdminUser(pub Claims);

// "Bearer " is optional; a bare token is accepted as-is.
fn bearer_token(value: &str) -> &str {
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .filter(|h| !h.is_empty())
            .ok_or(TokenError::Missing)?;

        let value = header.to_str().map_err(|_| {
            warn!("non-ascii Authorization header");
            TokenError::Invalid
        })?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(bearer_token(value)).map_err(|e| {
            warn!(reason = %e, "token rejected");
            e
        })?;

        Ok(AuthUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Admin {
            warn!(user_id = claims.id, role = %claims.role, "admin route denied");
            return Err(ApiError::Forbidden("Access denied! Admins only".into()));
        }
        Ok(AdminUser(claims))
    }
}
