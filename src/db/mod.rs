pub mod applications;
pub mod colleges;
pub mod reviews;
pub mod users;
