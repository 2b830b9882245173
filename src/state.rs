use std::sync::Arc;

use crate::auth::{Authenticator, ResetTokenIssuer};
use crate::config::Config;
use crate::rate_limit::AttemptLimiter;
use crate::store::Stores;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub stores: Stores,
    pub authenticator: Authenticator,
    pub resets: ResetTokenIssuer,
    pub login_limiter: AttemptLimiter,
    pub reset_limiter: AttemptLimiter,
}
