use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{
            ChangePasswordRequest, ChangePasswordResponse, GuardedResponse, LoginRequest,
            LoginResponse, SignupRequest, SignupResponse,
        },
        extractors::{AdminUser, AuthUser},
        jwt::JwtKeys,
        repo_types::User,
        services,
    },
    error::ApiError,
    extract::ApiJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/change-password", post(change_password))
}

pub fn guarded_routes() -> Router<AppState> {
    Router::new()
        .route("/protected", get(protected))
        .route("/admin", get(admin))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let res = services::signup(state.users.as_ref(), &keys, payload).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let keys = JwtKeys::from_ref(&state);
    let res = services::login(state.users.as_ref(), &keys, payload).await?;
    Ok(Json(res))
}

/// Every outcome carries `success`, including body rejections; failures also carry a real status code.
#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    payload: Result<ApiJson<ChangePasswordRequest>, ApiError>,
) -> (StatusCode, Json<ChangePasswordResponse>) {
    let outcome = match payload {
        Ok(ApiJson(req)) => services::change_password(state.users.as_ref(), req).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(res) => (StatusCode::OK, Json(res)),
        Err(e) => {
            e.log();
            (
                e.status(),
                Json(ChangePasswordResponse {
                    success: false,
                    message: e.to_string(),
                }),
            )
        }
    }
}

#[instrument(skip_all)]
pub async fn protected(AuthUser(claims): AuthUser) -> Json<GuardedResponse> {
    Json(GuardedResponse {
        message: "Access granted!",
        user: claims,
    })
}

#[instrument(skip_all)]
pub async fn admin(AdminUser(claims): AdminUser) -> Json<GuardedResponse> {
    Json(GuardedResponse {
        message: "Welcome, Admin!",
        user: claims,
    })
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::Method;
    use serde_json::json;

    use crate::app::{
        build_app,
        test_support::{send, send_raw},
    };
    use crate::auth::repo::MemoryUserStore;
    use crate::state::AppState;

    use super::*;

    fn app_with_store() -> (Router, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::default());
        let app = build_app(AppState::fake_with_users(store.clone()));
        (app, store)
    }

    async fn signup_token(app: &Router, email: &str, password: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({ "name": "A", "email": email, "password": password })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn customer_end_to_end() {
        let (app, _) = app_with_store();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({ "name": "A", "email": "a@gmail.com", "password": "p1" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "customer");
        assert_eq!(body["message"], "User registered successfully");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "a@gmail.com", "password": "p1" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "customer");
        assert_eq!(body["user"]["name"], "A");
        assert!(body["user"].get("password_hash").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/api/protected", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Access granted!");
        assert_eq!(body["user"]["email"], "a@gmail.com");

        let (status, body) = send(&app, Method::GET, "/api/admin", None, Some(&token)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Access denied! Admins only");
    }

    #[tokio::test]
    async fn admin_reaches_admin_route() {
        let (app, _) = app_with_store();
        let token = signup_token(&app, "admin@gmail.com", "pw").await;
        let (status, body) = send(&app, Method::GET, "/api/admin", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome, Admin!");
        assert_eq!(body["user"]["role"], "admin");
    }

    #[tokio::test]
    async fn guard_status_codes() {
        let (app, _) = app_with_store();

        let (status, body) = send(&app, Method::GET, "/api/protected", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Access Denied: No Token Provided");

        let (status, body) =
            send(&app, Method::GET, "/api/protected", None, Some("garbage")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Invalid Token");
    }

    #[tokio::test]
    async fn duplicate_signup_is_400_and_single_record() {
        let (app, store) = app_with_store();
        signup_token(&app, "a@gmail.com", "p1").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({ "name": "B", "email": "a@gmail.com", "password": "p2" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already exists");
        assert_eq!(store.count_by_email("a@gmail.com"), 1);
    }

    #[tokio::test]
    async fn signup_missing_fields_is_400() {
        let (app, _) = app_with_store();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/signup",
            Some(json!({ "email": "a@gmail.com" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "All fields are required");
    }

    #[tokio::test]
    async fn login_unknown_email_and_wrong_password_look_the_same() {
        let (app, _) = app_with_store();
        signup_token(&app, "a@gmail.com", "p1").await;

        let wrong = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "a@gmail.com", "password": "bad" })),
            None,
        )
        .await;
        let unknown = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "nobody@gmail.com", "password": "p1" })),
            None,
        )
        .await;
        assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong, unknown);
    }

    #[tokio::test]
    async fn login_missing_fields_is_400() {
        let (app, _) = app_with_store();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "a@gmail.com" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn change_password_always_reports_success_flag() {
        let (app, _) = app_with_store();
        signup_token(&app, "a@gmail.com", "p1").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/change-password",
            Some(json!({ "email": "ghost@gmail.com", "oldPassword": "x", "newPassword": "y" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "User not found");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/change-password",
            Some(json!({ "email": "a@gmail.com", "oldPassword": "nope", "newPassword": "p2" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Old password is incorrect");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/change-password",
            Some(json!({ "email": "a@gmail.com", "oldPassword": "p1", "newPassword": "p2" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            Some(json!({ "email": "a@gmail.com", "password": "p2" })),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn token_survives_password_change_until_expiry() {
        let (app, _) = app_with_store();
        let token = signup_token(&app, "a@gmail.com", "p1").await;
        send(
            &app,
            Method::POST,
            "/api/change-password",
            Some(json!({ "email": "a@gmail.com", "oldPassword": "p1", "newPassword": "p2" })),
            None,
        )
        .await;
        let (status, _) = send(&app, Method::GET, "/api/protected", None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn users_list_hides_hashes() {
        let (app, _) = app_with_store();
        signup_token(&app, "a@gmail.com", "p1").await;
        signup_token(&app, "chef@letseat.io", "p1").await;

        let (status, body) = send(&app, Method::GET, "/api/users", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let users = body.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1]["role"], "restaurant");
        assert!(users.iter().all(|u| u.get("password_hash").is_none()));
    }

    #[tokio::test]
    async fn malformed_bodies_are_400_with_message() {
        let (app, store) = app_with_store();

        let (status, body) = send_raw(
            &app,
            Method::POST,
            "/api/auth/signup",
            r#"{"name":"A","email":123,"password":"p1"}"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
        assert_eq!(store.count_by_email("123"), 0);

        let (status, body) = send_raw(
            &app,
            Method::POST,
            "/api/auth/login",
            r#"{"email":"a@gmail.com","password":"p1"}"#,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, body) = send_raw(
            &app,
            Method::POST,
            "/api/auth/login",
            r#"{"email":"#,
            Some("application/json"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn change_password_bad_body_still_reports_success_flag() {
        let (app, _) = app_with_store();

        for (raw, ct) in [
            (
                r#"{"email":"a@gmail.com","oldPassword":1,"newPassword":"p2"}"#,
                Some("application/json"),
            ),
            (r#"{"email":"a@gmail.com"}"#, None),
        ] {
            let (status, body) =
                send_raw(&app, Method::POST, "/api/change-password", raw, ct).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["success"], false);
            assert!(body["message"].is_string());
        }
    }
}
