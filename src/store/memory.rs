use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use sqlx::types::Json;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::application::STATUS_PENDING;
use crate::models::{
    Application, College, NewApplication, NewCollege, NewReview, NewUser, Review, User,
};
use crate::store::{ApplicationStore, CollegeStore, ReviewStore, UserStore};

/// Process-local store with the same semantics as the Postgres one.
/// Each mutation touches a single map entry, mirroring per-row atomicity.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    /// email -> user id
    user_emails: DashMap<String, Uuid>,
    colleges: DashMap<Uuid, College>,
    /// name -> college id
    college_names: DashMap<String, Uuid>,
    applications: DashMap<Uuid, Application>,
    reviews: DashMap<Uuid, Review>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        match self.user_emails.entry(new.email.clone()) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "email {} already registered",
                new.email
            ))),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::now_v7(),
                    email: new.email,
                    password_hash: new.password_hash,
                    name: new.name,
                    role: new.role,
                    image: new.image,
                    reset_token: None,
                    reset_token_expiry: None,
                    created_at: now,
                    updated_at: now,
                };
                self.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let Some(id) = self.user_emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|user| user.value().clone()))
    }

    async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if let Some(mut user) = self.users.get_mut(&user_id) {
            user.reset_token = Some(token_hash.to_string());
            user.reset_token_expiry = Some(expires_at);
            user.updated_at = now;
        }
        Ok(())
    }

    async fn find_user_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|entry| {
                let user = entry.value();
                user.reset_token.as_deref() == Some(token_hash)
                    && user.reset_token_expiry.is_some_and(|expiry| expiry > now)
            })
            .map(|entry| entry.value().clone()))
    }

    async fn complete_reset(
        &self,
        user_id: Uuid,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let Some(mut user) = self.users.get_mut(&user_id) else {
            return Ok(false);
        };
        let pending = user.reset_token.as_deref() == Some(token_hash)
            && user.reset_token_expiry.is_some_and(|expiry| expiry > now);
        if !pending {
            return Ok(false);
        }
        user.password_hash = password_hash.to_string();
        user.reset_token = None;
        user.reset_token_expiry = None;
        user.updated_at = now;
        Ok(true)
    }
}

#[async_trait]
impl CollegeStore for MemoryStore {
    async fn list_colleges(&self) -> Result<Vec<College>, StoreError> {
        let mut colleges: Vec<College> = self.colleges.iter().map(|e| e.value().clone()).collect();
        colleges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(colleges)
    }

    async fn find_college(&self, id: Uuid) -> Result<Option<College>, StoreError> {
        Ok(self.colleges.get(&id).map(|e| e.value().clone()))
    }

    async fn search_colleges(&self, term: &str) -> Result<Vec<College>, StoreError> {
        let needle = term.to_lowercase();
        let mut colleges: Vec<College> = self
            .colleges
            .iter()
            .filter(|e| e.value().name.to_lowercase().contains(&needle))
            .map(|e| e.value().clone())
            .collect();
        colleges.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(colleges)
    }

    async fn upsert_college(&self, new: NewCollege) -> Result<College, StoreError> {
        let now = Utc::now();
        let id = *self
            .college_names
            .entry(new.name.clone())
            .or_insert_with(Uuid::now_v7)
            .value();
        let created_at = self
            .colleges
            .get(&id)
            .map(|existing| existing.created_at)
            .unwrap_or(now);
        let college = College {
            id,
            name: new.name,
            image: new.image,
            images: new.images,
            rating: new.rating,
            location: new.location,
            admission_date: new.admission_date,
            tuition: new.tuition,
            students_count: new.students_count,
            category: new.category,
            description: new.description,
            admission_process: Json(new.admission_process),
            events: Json(new.events),
            research: Json(new.research),
            sports: Json(new.sports),
            research_count: new.research_count,
            created_at,
            updated_at: now,
        };
        self.colleges.insert(id, college.clone());
        Ok(college)
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn create_application(&self, new: NewApplication) -> Result<Application, StoreError> {
        let now = Utc::now();
        let application = Application {
            id: Uuid::now_v7(),
            college_id: new.college_id,
            college_name: new.college_name,
            user_id: new.user_id,
            candidate_name: new.candidate_name,
            subject: new.subject,
            candidate_email: new.candidate_email,
            candidate_phone: new.candidate_phone,
            address: new.address,
            date_of_birth: new.date_of_birth,
            image: new.image,
            status: STATUS_PENDING.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn list_applications_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Application>, StoreError> {
        let mut applications: Vec<Application> = self
            .applications
            .iter()
            .filter(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
            .collect();
        newest_first(&mut applications, |a| (a.created_at, a.id));
        Ok(applications)
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn create_review(&self, new: NewReview) -> Result<Review, StoreError> {
        let now = Utc::now();
        let review = Review {
            id: Uuid::now_v7(),
            college_id: new.college_id,
            college_name: new.college_name,
            user_id: new.user_id,
            user_name: new.user_name,
            user_email: new.user_email,
            rating: new.rating,
            review: new.review,
            created_at: now,
            updated_at: now,
        };
        self.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<Review> = self.reviews.iter().map(|e| e.value().clone()).collect();
        newest_first(&mut reviews, |r| (r.created_at, r.id));
        Ok(reviews)
    }

    async fn list_reviews_for_college(&self, college_id: Uuid) -> Result<Vec<Review>, StoreError> {
        let mut reviews: Vec<Review> = self
            .reviews
            .iter()
            .filter(|e| e.value().college_id == college_id)
            .map(|e| e.value().clone())
            .collect();
        newest_first(&mut reviews, |r| (r.created_at, r.id));
        Ok(reviews)
    }
}
