use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::auth::reset::ACCEPTED_MESSAGE;
use crate::auth::{
    LoginResult, Registration, ResetConsumeResult, ResetRequestResult, normalize_email,
};
use crate::error::AppError;
use crate::models::UserSummary;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub image: Option<String>,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub new_password: String,
}

/// `{success, message}` as returned by both reset endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetEnvelope {
    pub success: bool,
    pub message: String,
    #[cfg(feature = "dev-reset-token")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<String>,
}

impl ResetEnvelope {
    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            #[cfg(feature = "dev-reset-token")]
            reset_token: None,
        }
    }
}

impl From<ResetRequestResult> for ResetEnvelope {
    fn from(result: ResetRequestResult) -> Self {
        match result {
            #[cfg(feature = "dev-reset-token")]
            ResetRequestResult::Accepted {
                message,
                reset_token,
            } => Self {
                success: true,
                message,
                reset_token,
            },
            #[cfg(not(feature = "dev-reset-token"))]
            ResetRequestResult::Accepted { message } => Self::new(true, message),
            ResetRequestResult::Failure { message } => Self::new(false, message),
        }
    }
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserSummary>, AppError> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    match state.authenticator.login(&email, &req.password).await {
        LoginResult::Success(summary) => Ok(Json(summary)),
        LoginResult::NotFoundOrInvalid => {
            state.login_limiter.record(&email);
            Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ))
        }
    }
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), AppError> {
    let summary = state
        .authenticator
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            image: req.image,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> (StatusCode, Json<ResetEnvelope>) {
    let email = normalize_email(&req.email);
    if email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ResetEnvelope::new(false, "Email is required")),
        );
    }

    // Throttled requests look exactly like accepted ones.
    if state.reset_limiter.check(&email).is_err() {
        tracing::warn!("Password reset requests throttled");
        return (
            StatusCode::OK,
            Json(ResetEnvelope::new(true, ACCEPTED_MESSAGE)),
        );
    }
    state.reset_limiter.record(&email);

    let result = state.resets.request_reset(&email).await;
    let status = match result {
        ResetRequestResult::Accepted { .. } => StatusCode::OK,
        ResetRequestResult::Failure { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(result.into()))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> (StatusCode, Json<ResetEnvelope>) {
    match state
        .resets
        .consume_reset(req.token.trim(), &req.new_password)
        .await
    {
        ResetConsumeResult::Success(message) => {
            (StatusCode::OK, Json(ResetEnvelope::new(true, message)))
        }
        ResetConsumeResult::Failure(message) => (
            StatusCode::BAD_REQUEST,
            Json(ResetEnvelope::new(false, message)),
        ),
    }
}
