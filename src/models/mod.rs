pub mod application;
pub mod college;
pub mod review;
pub mod user;

pub use application::{Application, NewApplication};
pub use college::{College, NewCollege};
pub use review::{NewReview, Review};
pub use user::{NewUser, User, UserSummary};
