use std::sync::Arc;

use crate::auth::{is_valid_email, normalize_email, password};
use crate::error::{AppError, StoreError};
use crate::models::{NewUser, UserSummary};
use crate::store::UserStore;

#[derive(Debug, Clone, PartialEq)]
pub enum LoginResult {
    Success(UserSummary),
    /// Unknown email, wrong password and store faults all land here.
    NotFoundOrInvalid,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
}

/// Verifies email/password pairs against the user store.
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
}

impl Authenticator {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Read-only. Never distinguishes why a login failed.
    pub async fn login(&self, email: &str, password: &str) -> LoginResult {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return LoginResult::NotFoundOrInvalid;
        }

        let user = match self.users.find_user_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                password::verify_dummy(password);
                tracing::debug!("Login rejected: unknown email");
                return LoginResult::NotFoundOrInvalid;
            }
            Err(e) => {
                tracing::error!("Login lookup failed: {e}");
                return LoginResult::NotFoundOrInvalid;
            }
        };

        match password::verify(password, &user.password_hash) {
            Ok(true) => {
                tracing::info!(user_id = %user.id, "User logged in");
                LoginResult::Success(user.summary())
            }
            Ok(false) => {
                tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
                LoginResult::NotFoundOrInvalid
            }
            Err(e) => {
                tracing::error!(user_id = %user.id, "Stored password hash unreadable: {e}");
                LoginResult::NotFoundOrInvalid
            }
        }
    }

    pub async fn register(&self, registration: Registration) -> Result<UserSummary, AppError> {
        let name = registration.name.trim();
        let email = normalize_email(&registration.email);

        if name.is_empty() || email.is_empty() || registration.password.is_empty() {
            return Err(AppError::BadRequest("All fields are required".to_string()));
        }
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email address".to_string()));
        }
        if !password::meets_policy(&registration.password) {
            return Err(AppError::BadRequest(format!(
                "Password must be at least {} characters long",
                password::MIN_PASSWORD_LEN
            )));
        }

        let password_hash = password::hash(&registration.password).map_err(AppError::Internal)?;

        let user = self
            .users
            .create_user(NewUser {
                email,
                password_hash,
                name: name.to_string(),
                role: None,
                image: registration.image.filter(|url| !url.trim().is_empty()),
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    AppError::Conflict("An account with this email already exists".to_string())
                }
                other => AppError::from(other),
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.summary())
    }
}
