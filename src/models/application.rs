use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub college_id: Uuid,
    pub college_name: String,
    /// Session identity of the applicant (id or email, as issued by the session layer).
    pub user_id: String,
    pub candidate_name: String,
    pub subject: String,
    pub candidate_email: String,
    pub candidate_phone: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub image: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub college_id: Uuid,
    pub college_name: String,
    pub user_id: String,
    pub candidate_name: String,
    pub subject: String,
    pub candidate_email: String,
    pub candidate_phone: String,
    pub address: String,
    pub date_of_birth: NaiveDate,
    pub image: Option<String>,
}
