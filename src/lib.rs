pub mod auth;
pub mod clock;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod rate_limit;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{Authenticator, ResetTokenIssuer};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::email::{LogNotifier, ResetNotifier, SystemMailer};
use crate::rate_limit::AttemptLimiter;
use crate::state::{AppState, SharedState};
use crate::store::Stores;

/// Production wiring: SMTP when configured, otherwise log-only, and the wall clock.
pub fn build_app(stores: Stores, config: Config) -> (Router, SharedState) {
    let notifier: Arc<dyn ResetNotifier> = match config.smtp.as_ref() {
        Some(smtp) => match SystemMailer::new(smtp, config.reset_token_ttl_minutes) {
            Ok(mailer) => {
                tracing::info!("System SMTP configured");
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::warn!("System SMTP not available: {e}");
                Arc::new(LogNotifier)
            }
        },
        None => Arc::new(LogNotifier),
    };

    build_app_with(stores, config, notifier, Arc::new(SystemClock))
}

pub fn build_app_with(
    stores: Stores,
    config: Config,
    notifier: Arc<dyn ResetNotifier>,
    clock: Arc<dyn Clock>,
) -> (Router, SharedState) {
    let resets = ResetTokenIssuer::new(
        stores.users.clone(),
        notifier,
        clock,
        config.reset_token_ttl(),
        config.base_url.clone(),
    );

    let state: SharedState = Arc::new(AppState {
        authenticator: Authenticator::new(stores.users.clone()),
        resets,
        stores,
        login_limiter: AttemptLimiter::login(),
        reset_limiter: AttemptLimiter::reset_requests(),
        config,
    });

    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let app = Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(layers)
        .with_state(state.clone());

    (app, state)
}

/// Periodically drop limiter entries whose window has long passed.
pub fn spawn_limiter_janitor(state: SharedState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(5 * 60));
        loop {
            ticker.tick().await;
            state.login_limiter.cleanup(state.login_limiter.window());
            state.reset_limiter.cleanup(state.reset_limiter.window());
        }
    })
}

async fn health() -> &'static str {
    "ok"
}
