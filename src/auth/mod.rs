pub mod authenticator;
pub mod password;
pub mod reset;
pub mod token;

use std::sync::LazyLock;

use regex::Regex;

pub use authenticator::{Authenticator, LoginResult, Registration};
pub use reset::{ResetConsumeResult, ResetRequestResult, ResetTokenIssuer};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Emails are stored and looked up trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
