pub mod applications;
pub mod auth;
pub mod colleges;
pub mod reviews;

use axum::Router;
use axum::routing::{get, post};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/forgot-password", post(auth::forgot_password))
        .route("/api/v1/auth/reset-password", post(auth::reset_password))
        // Colleges
        .route("/api/v1/colleges", get(colleges::list))
        .route("/api/v1/colleges/{id}", get(colleges::get))
        .route("/api/v1/colleges/{id}/reviews", get(colleges::reviews))
        // Applications
        .route("/api/v1/applications", post(applications::create))
        .route(
            "/api/v1/users/{user_id}/applications",
            get(applications::list_for_user),
        )
        // Reviews
        .route("/api/v1/reviews", get(reviews::list).post(reviews::create))
}
