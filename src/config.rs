use std::net::IpAddr;

/// Longest accepted reset window: 7 days.
pub const MAX_RESET_TOKEN_TTL_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub reset_token_ttl_minutes: i64,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let host: IpAddr = env_or("COLLEGEHUB_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid COLLEGEHUB_HOST: {e}"))?;

        let port: u16 = env_or("COLLEGEHUB_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid COLLEGEHUB_PORT: {e}"))?;

        let base_url = env_or("COLLEGEHUB_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let max_body_size: usize = env_or("COLLEGEHUB_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid COLLEGEHUB_MAX_BODY_SIZE: {e}"))?;

        let reset_token_ttl_minutes =
            parse_reset_ttl_minutes(&env_or("COLLEGEHUB_RESET_TOKEN_TTL_MINUTES", "60"))?;

        let log_level = env_or("COLLEGEHUB_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("COLLEGEHUB_SMTP_HOST").ok(),
            std::env::var("COLLEGEHUB_SMTP_PORT").ok(),
            std::env::var("COLLEGEHUB_SMTP_USER").ok(),
            std::env::var("COLLEGEHUB_SMTP_PASS").ok(),
            std::env::var("COLLEGEHUB_SMTP_FROM").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass), Some(from)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid COLLEGEHUB_SMTP_PORT: {e}"))?,
                user,
                pass,
                from,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            base_url,
            max_body_size,
            reset_token_ttl_minutes,
            log_level,
            smtp,
        })
    }

    pub fn reset_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.reset_token_ttl_minutes)
    }
}

fn parse_reset_ttl_minutes(raw: &str) -> Result<i64, String> {
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("Invalid COLLEGEHUB_RESET_TOKEN_TTL_MINUTES: {e}"))?;
    if !(1..=MAX_RESET_TOKEN_TTL_MINUTES).contains(&minutes) {
        return Err(format!(
            "Invalid COLLEGEHUB_RESET_TOKEN_TTL_MINUTES: must be between 1 and {MAX_RESET_TOKEN_TTL_MINUTES}"
        ));
    }
    Ok(minutes)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
