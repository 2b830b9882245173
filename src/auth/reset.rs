//! Password reset over the `reset_token` / `reset_token_expiry` pair on a user
//! record.
//!
//! Per user the pair is either absent (no token), set with a future expiry
//! (pending) or set with a past expiry (expired). Expired tokens are never
//! cleaned up; they stay until a new request overwrites them and are simply
//! never matched on consumption.

use std::sync::Arc;

use chrono::Duration;

use crate::auth::{normalize_email, password, token};
use crate::clock::Clock;
use crate::email::ResetNotifier;
use crate::store::UserStore;

pub const ACCEPTED_MESSAGE: &str =
    "If an account with this email exists, you will receive a password reset link.";
pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
pub const REQUEST_FAILED_MESSAGE: &str = "An error occurred. Please try again later.";
pub const FIELDS_REQUIRED_MESSAGE: &str = "Token and new password are required";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired reset token";
pub const RESET_DONE_MESSAGE: &str =
    "Password has been reset successfully. You can now login with your new password.";
pub const RESET_FAILED_MESSAGE: &str =
    "An error occurred while resetting password. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResetRequestResult {
    /// Identical for known and unknown emails.
    Accepted {
        message: String,
        #[cfg(feature = "dev-reset-token")]
        reset_token: Option<String>,
    },
    /// Missing email or a store fault.
    Failure { message: String },
}

impl ResetRequestResult {
    #[cfg_attr(not(feature = "dev-reset-token"), allow(unused_variables))]
    fn accepted(issued: Option<String>) -> Self {
        ResetRequestResult::Accepted {
            message: ACCEPTED_MESSAGE.to_string(),
            #[cfg(feature = "dev-reset-token")]
            reset_token: issued,
        }
    }

    fn failure(message: &str) -> Self {
        ResetRequestResult::Failure {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResetConsumeResult {
    Success(String),
    Failure(String),
}

/// Issues single-use, time-limited reset tokens and redeems them.
#[derive(Clone)]
pub struct ResetTokenIssuer {
    users: Arc<dyn UserStore>,
    notifier: Arc<dyn ResetNotifier>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    base_url: String,
}

impl ResetTokenIssuer {
    pub fn new(
        users: Arc<dyn UserStore>,
        notifier: Arc<dyn ResetNotifier>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            notifier,
            clock,
            ttl,
            base_url: base_url.into(),
        }
    }

    fn reset_url(&self, raw_token: &str) -> String {
        format!("{}/reset-password?token={raw_token}", self.base_url)
    }

    pub async fn request_reset(&self, email: &str) -> ResetRequestResult {
        let email = normalize_email(email);
        if email.is_empty() {
            return ResetRequestResult::failure(EMAIL_REQUIRED_MESSAGE);
        }

        let user = match self.users.find_user_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                tracing::debug!("Password reset requested for unknown email");
                return ResetRequestResult::accepted(None);
            }
            Err(e) => {
                tracing::error!("Password reset lookup failed: {e}");
                return ResetRequestResult::failure(REQUEST_FAILED_MESSAGE);
            }
        };

        let raw_token = token::generate_reset_token();
        let now = self.clock.now();
        let Some(expires_at) = now.checked_add_signed(self.ttl) else {
            tracing::error!(user_id = %user.id, "Reset token expiry out of range");
            return ResetRequestResult::failure(REQUEST_FAILED_MESSAGE);
        };
        if let Err(e) = self
            .users
            .set_reset_token(user.id, &token::hash_token(&raw_token), expires_at, now)
            .await
        {
            tracing::error!(user_id = %user.id, "Failed to store reset token: {e}");
            return ResetRequestResult::failure(REQUEST_FAILED_MESSAGE);
        }

        if let Err(e) = self
            .notifier
            .send_password_reset(&user.email, &self.reset_url(&raw_token))
            .await
        {
            tracing::error!(user_id = %user.id, "Failed to dispatch password reset email: {e}");
        }

        tracing::info!(user_id = %user.id, "Password reset token issued");
        ResetRequestResult::accepted(Some(raw_token))
    }

    pub async fn consume_reset(&self, raw_token: &str, new_password: &str) -> ResetConsumeResult {
        if raw_token.is_empty() || new_password.is_empty() {
            return ResetConsumeResult::Failure(FIELDS_REQUIRED_MESSAGE.to_string());
        }
        if !password::meets_policy(new_password) {
            return ResetConsumeResult::Failure(format!(
                "Password must be at least {} characters long",
                password::MIN_PASSWORD_LEN
            ));
        }

        let token_hash = token::hash_token(raw_token);
        let now = self.clock.now();

        let user = match self.users.find_user_by_reset_token(&token_hash, now).await {
            Ok(Some(user)) => user,
            Ok(None) => return ResetConsumeResult::Failure(INVALID_TOKEN_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!("Reset token lookup failed: {e}");
                return ResetConsumeResult::Failure(RESET_FAILED_MESSAGE.to_string());
            }
        };

        let password_hash = match password::hash(new_password) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::error!(user_id = %user.id, "{e}");
                return ResetConsumeResult::Failure(RESET_FAILED_MESSAGE.to_string());
            }
        };

        match self
            .users
            .complete_reset(user.id, &token_hash, &password_hash, now)
            .await
        {
            Ok(true) => {
                tracing::info!(user_id = %user.id, "Password reset completed");
                ResetConsumeResult::Success(RESET_DONE_MESSAGE.to_string())
            }
            // Consumed or overwritten between the lookup and the update.
            Ok(false) => ResetConsumeResult::Failure(INVALID_TOKEN_MESSAGE.to_string()),
            Err(e) => {
                tracing::error!(user_id = %user.id, "Failed to complete password reset: {e}");
                ResetConsumeResult::Failure(RESET_FAILED_MESSAGE.to_string())
            }
        }
    }
}
