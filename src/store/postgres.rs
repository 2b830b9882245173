use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::error::StoreError;
use crate::models::{
    Application, College, NewApplication, NewCollege, NewReview, NewUser, Review, User,
};
use crate::store::{ApplicationStore, CollegeStore, ReviewStore, UserStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        Ok(db::users::create(&self.pool, &new).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_email(&self.pool, email).await?)
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        Ok(db::users::set_reset_token(&self.pool, user_id, token_hash, expires_at, now).await?)
    }

    async fn find_user_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        Ok(db::users::find_by_valid_reset_token(&self.pool, token_hash, now).await?)
    }

    async fn complete_reset(
        &self,
        user_id: Uuid,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Ok(db::users::complete_reset(&self.pool, user_id, token_hash, password_hash, now).await?)
    }
}

#[async_trait]
impl CollegeStore for PgStore {
    async fn list_colleges(&self) -> Result<Vec<College>, StoreError> {
        Ok(db::colleges::list(&self.pool).await?)
    }

    async fn find_college(&self, id: Uuid) -> Result<Option<College>, StoreError> {
        Ok(db::colleges::find_by_id(&self.pool, id).await?)
    }

    async fn search_colleges(&self, term: &str) -> Result<Vec<College>, StoreError> {
        Ok(db::colleges::search(&self.pool, term).await?)
    }

    async fn upsert_college(&self, new: NewCollege) -> Result<College, StoreError> {
        Ok(db::colleges::upsert(&self.pool, &new).await?)
    }
}

#[async_trait]
impl ApplicationStore for PgStore {
    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError> {
        Ok(db::applications::create(&self.pool, &new).await?)
    }

    async fn list_applications_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Application>, StoreError> {
        Ok(db::applications::list_by_user(&self.pool, user_id).await?)
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn create_review(&self, new: NewReview) -> Result<Review, StoreError> {
        Ok(db::reviews::create(&self.pool, &new).await?)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        Ok(db::reviews::list(&self.pool).await?)
    }

    async fn list_reviews_for_college(&self, college_id: Uuid) -> Result<Vec<Review>, StoreError> {
        Ok(db::reviews::list_by_college(&self.pool, college_id).await?)
    }
}
