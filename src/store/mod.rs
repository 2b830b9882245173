//! Storage seams. Components receive these as trait objects so the same code
//! runs against Postgres in production and the in-memory store in development
//! and tests.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Application, College, NewApplication, NewCollege, NewReview, NewUser, Review, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `StoreError::Conflict` when the email is taken.
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// Exact match on the stored (already normalized) email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Overwrites any previous token, pending or expired.
    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Only matches a token whose expiry is strictly after `now`.
    async fn find_user_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError>;

    /// Sets the new password hash and clears both reset fields in one step,
    /// provided the token is still pending. Returns whether it was applied.
    async fn complete_reset(
        &self,
        user_id: Uuid,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CollegeStore: Send + Sync {
    async fn list_colleges(&self) -> Result<Vec<College>, StoreError>;
    async fn find_college(&self, id: Uuid) -> Result<Option<College>, StoreError>;
    async fn search_colleges(&self, term: &str) -> Result<Vec<College>, StoreError>;
    async fn upsert_college(&self, new: NewCollege) -> Result<College, StoreError>;
}

#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError>;
    /// Newest first.
    async fn list_applications_for_user(&self, user_id: &str)
    -> Result<Vec<Application>, StoreError>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn create_review(&self, new: NewReview) -> Result<Review, StoreError>;
    /// Newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError>;
    /// Newest first.
    async fn list_reviews_for_college(&self, college_id: Uuid) -> Result<Vec<Review>, StoreError>;
}

/// One handle per collection, all usually backed by the same connection.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub colleges: Arc<dyn CollegeStore>,
    pub applications: Arc<dyn ApplicationStore>,
    pub reviews: Arc<dyn ReviewStore>,
}

impl Stores {
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: UserStore + CollegeStore + ApplicationStore + ReviewStore + 'static,
    {
        Self {
            users: backend.clone(),
            colleges: backend.clone(),
            applications: backend.clone(),
            reviews: backend,
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    pub fn memory() -> Self {
        Self::from_backend(Arc::new(MemoryStore::new()))
    }
}
