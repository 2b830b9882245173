use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{College, Review};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
}

pub async fn list(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<College>>, AppError> {
    let colleges = match params.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => state.stores.colleges.search_colleges(term).await?,
        _ => state.stores.colleges.list_colleges().await?,
    };
    Ok(Json(colleges))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<College>, AppError> {
    let college = find_college(&state, &id).await?;
    Ok(Json(college))
}

pub async fn reviews(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Review>>, AppError> {
    let college = find_college(&state, &id).await?;
    let reviews = state
        .stores
        .reviews
        .list_reviews_for_college(college.id)
        .await?;
    Ok(Json(reviews))
}

/// A malformed id is just another college that does not exist.
pub(crate) async fn find_college(state: &SharedState, id: &str) -> Result<College, AppError> {
    let not_found = || AppError::NotFound("College not found".to_string());
    let id = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;
    state
        .stores
        .colleges
        .find_college(id)
        .await?
        .ok_or_else(not_found)
}
