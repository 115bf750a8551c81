use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{
            present, ChangePasswordRequest, ChangePasswordResponse, LoginRequest, LoginResponse,
            SignupRequest, SignupResponse,
        },
        jwt::JwtKeys,
        password::{hash_password_blocking, verify_password_blocking},
        repo::UserStore,
        repo_types::NewUser,
        role::Role,
    },
    error::ApiError,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

// A digest that cannot be parsed counts as a mismatch.
async fn password_matches(plain: &str, hash: &str) -> bool {
    match verify_password_blocking(plain.to_string(), hash.to_string()).await {
        Ok(ok) => ok,
        Err(e) => {
            error!(error = %e, "stored password digest is unusable");
            false
        }
    }
}

/// Classify, check uniqueness, hash, insert, issue. Stops at the first failure.
#[instrument(skip_all)]
pub async fn signup(
    users: &dyn UserStore,
    keys: &JwtKeys,
    req: SignupRequest,
) -> Result<SignupResponse, ApiError> {
    let (Some(name), Some(email), Some(password)) = (
        present(&req.name),
        present(&req.email),
        present(&req.password),
    ) else {
        warn!("signup with missing fields");
        return Err(ApiError::Validation("All fields are required".into()));
    };

    if !is_valid_email(email) {
        warn!(email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let role = Role::classify(email);

    if users.find_by_email(email).await?.is_some() {
        warn!(email, "email already registered");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let hash = hash_password_blocking(password.to_string())
        .await
        .map_err(|e| ApiError::internal("Error hashing password", e))?;

    // A concurrent signup can still win the race; the store reports it as a conflict.
    let user = users
        .create(NewUser {
            name,
            email,
            password_hash: &hash,
            role,
        })
        .await?;

    let token = keys
        .issue(&user)
        .map_err(|e| ApiError::internal("Error issuing token", e))?;

    info!(user_id = user.id, email = %user.email, role = %role, "user registered");
    Ok(SignupResponse {
        message: "User registered successfully",
        token,
        role,
    })
}

/// Unknown email and wrong password are indistinguishable to the caller.
#[instrument(skip_all)]
pub async fn login(
    users: &dyn UserStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (Some(email), Some(password)) = (present(&req.email), present(&req.password)) else {
        warn!("login with missing fields");
        return Err(ApiError::Validation(
            "Both email and password are required".into(),
        ));
    };

    let Some(user) = users.find_by_email(email).await? else {
        warn!(email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    if !password_matches(password, &user.password_hash).await {
        warn!(email, user_id = user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = keys
        .issue(&user)
        .map_err(|e| ApiError::internal("Error issuing token", e))?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(LoginResponse {
        message: "Login successful",
        token,
        user: user.into(),
    })
}

/// Verifies the old password before storing a fresh hash of the new one.
/// Tokens already issued stay valid until they expire.
#[instrument(skip_all)]
pub async fn change_password(
    users: &dyn UserStore,
    req: ChangePasswordRequest,
) -> Result<ChangePasswordResponse, ApiError> {
    let (Some(email), Some(old_password), Some(new_password)) = (
        present(&req.email),
        present(&req.old_password),
        present(&req.new_password),
    ) else {
        warn!("change-password with missing fields");
        return Err(ApiError::Validation(
            "Email, old password and new password are required".into(),
        ));
    };

    let Some(user) = users.find_by_email(email).await? else {
        warn!(email, "change-password unknown email");
        return Err(ApiError::NotFound("User not found".into()));
    };

    if !password_matches(old_password, &user.password_hash).await {
        warn!(email, user_id = user.id, "change-password old password mismatch");
        return Err(ApiError::Unauthorized("Old password is incorrect".into()));
    }

    let hash = hash_password_blocking(new_password.to_string())
        .await
        .map_err(|e| ApiError::internal("Error hashing password", e))?;

    if !users.update_password(email, &hash).await? {
        return Err(ApiError::NotFound("User not found".into()));
    }

    info!(user_id = user.id, "password changed");
    Ok(ChangePasswordResponse {
        success: true,
        message: "Password updated successfully".into(),
    })
}
