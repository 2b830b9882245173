use sqlx::PgPool;
use uuid::Uuid;

use crate::models::application::STATUS_PENDING;
use crate::models::{Application, NewApplication};

pub async fn create(pool: &PgPool, new: &NewApplication) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "INSERT INTO applications (id, college_id, college_name, user_id, candidate_name, subject,
                                   candidate_email, candidate_phone, address, date_of_birth, image, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(new.college_id)
    .bind(&new.college_name)
    .bind(&new.user_id)
    .bind(&new.candidate_name)
    .bind(&new.subject)
    .bind(&new.candidate_email)
    .bind(&new.candidate_phone)
    .bind(&new.address)
    .bind(new.date_of_birth)
    .bind(&new.image)
    .bind(STATUS_PENDING)
    .fetch_one(pool)
    .await
}

pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "SELECT * FROM applications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
