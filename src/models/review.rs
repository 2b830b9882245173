use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub college_id: Uuid,
    pub college_name: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub rating: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub college_id: Uuid,
    pub college_name: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub rating: i16,
    pub review: String,
}
