use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{NewReview, Review};
use crate::routes::colleges::find_college;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    #[serde(default)]
    pub college_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub rating: i16,
    #[serde(default)]
    pub review: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCreated {
    pub success: bool,
    pub message: String,
    pub review_id: String,
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateReview>,
) -> Result<(StatusCode, Json<ReviewCreated>), AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::BadRequest(
            "Please select a rating between 1 and 5".to_string(),
        ));
    }
    let text = req.review.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("Please write a review".to_string()));
    }
    if req.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("userId is required".to_string()));
    }

    let college = find_college(&state, &req.college_id).await?;

    let review = state
        .stores
        .reviews
        .create_review(NewReview {
            college_id: college.id,
            college_name: college.name,
            user_id: req.user_id.trim().to_string(),
            user_name: req.user_name.trim().to_string(),
            user_email: req.user_email.trim().to_string(),
            rating: req.rating,
            review: text.to_string(),
        })
        .await?;

    tracing::info!(review_id = %review.id, college_id = %review.college_id, "Review submitted");

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreated {
            success: true,
            message: "Review submitted successfully!".to_string(),
            review_id: review.id.to_string(),
        }),
    ))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Review>>, AppError> {
    let reviews = state.stores.reviews.list_reviews().await?;
    Ok(Json(reviews))
}
