use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{NewReview, Review};

pub async fn create(pool: &PgPool, new: &NewReview) -> Result<Review, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "INSERT INTO reviews (id, college_id, college_name, user_id, user_name, user_email, rating, review)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(new.college_id)
    .bind(&new.college_name)
    .bind(&new.user_id)
    .bind(&new.user_name)
    .bind(&new.user_email)
    .bind(new.rating)
    .bind(&new.review)
    .fetch_one(pool)
    .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>("SELECT * FROM reviews ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn list_by_college(pool: &PgPool, college_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE college_id = $1 ORDER BY created_at DESC",
    )
    .bind(college_id)
    .fetch_all(pool)
    .await
}
