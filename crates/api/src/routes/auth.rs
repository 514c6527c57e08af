//! Signup and login routes.
//!
//! Demo-grade: no session or token is issued. In demo mode both routes
//! acknowledge the request without touching a store.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::JsonBody;
use crate::services::{AuthService, LoginOutcome, SignupOutcome};
use crate::state::AppState;

/// Signup request body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User echoed back by a demo-mode signup.
#[derive(Debug, Serialize)]
pub struct DemoUser {
    pub name: String,
    pub email: String,
}

/// Signup response body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SignupResponse {
    Demo {
        ok: bool,
        message: &'static str,
        user: DemoUser,
    },
    Created {
        ok: bool,
        user_id: String,
    },
}

impl From<SignupOutcome> for SignupResponse {
    fn from(outcome: SignupOutcome) -> Self {
        match outcome {
            SignupOutcome::Demo { name, email } => Self::Demo {
                ok: true,
                message: "Signed up (demo mode)",
                user: DemoUser {
                    name,
                    email: email.into_inner(),
                },
            },
            SignupOutcome::Created(user_id) => Self::Created {
                ok: true,
                user_id: user_id.to_string(),
            },
        }
    }
}

/// Login response body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Demo {
        ok: bool,
        message: &'static str,
        email: String,
    },
    Authenticated {
        ok: bool,
        user_id: String,
        name: String,
    },
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        match outcome {
            LoginOutcome::Demo { email } => Self::Demo {
                ok: true,
                message: "Logged in (demo mode)",
                email: email.into_inner(),
            },
            LoginOutcome::Authenticated(user) => Self::Authenticated {
                ok: true,
                user_id: user.id.to_string(),
                name: user.name,
            },
        }
    }
}

/// Register a new user.
///
/// POST /api/auth/signup
///
/// # Errors
///
/// - 400 `Email already registered`
/// - 422 `Invalid email address`, or a body that does not parse
/// - 500 if the store fails
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<SignupRequest>,
) -> Result<Json<SignupResponse>> {
    let outcome = AuthService::new(state.data())
        .signup(&form.name, &form.email, &form.password)
        .await?;
    Ok(Json(outcome.into()))
}

/// Check a user's credentials.
///
/// POST /api/auth/login
///
/// # Errors
///
/// - 401 `Invalid credentials`
/// - 422 `Invalid email address`, or a body that does not parse
/// - 500 if the store fails
pub async fn login(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let outcome = AuthService::new(state.data())
        .login(&form.email, &form.password)
        .await?;

    if let LoginOutcome::Authenticated(user) = &outcome {
        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(user.id.to_string()),
                ..Default::default()
            }));
        });
    }

    Ok(Json(outcome.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::db::MemoryStore;
    use crate::testing::{LostSignupRaceStore, demo_app, post, store_app};

    #[tokio::test]
    async fn test_demo_signup_and_login() {
        let (status, body) = post(
            demo_app(),
            "/api/auth/signup",
            json!({ "name": "Demo", "email": "demo@example.com", "password": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "ok": true,
                "message": "Signed up (demo mode)",
                "user": { "name": "Demo", "email": "demo@example.com" }
            })
        );

        let (status, body) = post(
            demo_app(),
            "/api/auth/login",
            json!({ "email": "demo@example.com", "password": "anything" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "ok": true, "message": "Logged in (demo mode)", "email": "demo@example.com" })
        );
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let app = store_app(MemoryStore::new());
        let payload = json!({ "name": "Ayrton", "email": "ayrton@example.com", "password": "pw" });

        let (status, body) = post(app.clone(), "/api/auth/signup", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["user_id"], "1");

        let (status, body) = post(app, "/api/auth/signup", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Email already registered" }));
    }

    #[tokio::test]
    async fn test_signup_losing_race_is_duplicate() {
        let (status, body) = post(
            store_app(LostSignupRaceStore),
            "/api/auth/signup",
            json!({ "name": "Ayrton", "email": "ayrton@example.com", "password": "pw" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Email already registered" }));
    }

    #[tokio::test]
    async fn test_login_with_store() {
        let app = store_app(MemoryStore::new());
        post(
            app.clone(),
            "/api/auth/signup",
            json!({ "name": "Ayrton", "email": "ayrton@example.com", "password": "correct" }),
        )
        .await;

        let (status, body) = post(
            app.clone(),
            "/api/auth/login",
            json!({ "email": "ayrton@example.com", "password": "wrong" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "detail": "Invalid credentials" }));

        let (status, body) = post(
            app,
            "/api/auth/login",
            json!({ "email": "ayrton@example.com", "password": "correct" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true, "user_id": "1", "name": "Ayrton" }));
    }

    #[tokio::test]
    async fn test_invalid_email_is_unprocessable() {
        let (status, body) = post(
            demo_app(),
            "/api/auth/signup",
            json!({ "name": "X", "email": "not-an-email", "password": "pw" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({ "detail": "Invalid email address" }));
    }

    #[tokio::test]
    async fn test_missing_field_is_json_detail() {
        let (status, body) = post(
            demo_app(),
            "/api/auth/signup",
            json!({ "email": "demo@example.com", "password": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("missing field `name`")
        );
    }

    #[tokio::test]
    async fn test_login_wrong_type_is_json_detail() {
        let (status, body) = post(
            demo_app(),
            "/api/auth/login",
            json!({ "email": "demo@example.com", "password": 42 }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }
}
