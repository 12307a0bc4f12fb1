use qverify_core::filters::DEFAULT_BATCH_SIZE;
use qverify_core::types::RecordId;

/// Reviewer credited with decisions when a request carries no `x-reviewer-id`.
pub const FALLBACK_REVIEWER_ID: &str = "fe9ffb80-877b-4671-9c35-235a6f220828";

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Reviewer used when a request does not identify one.
    pub default_reviewer_id: RecordId,
    /// Number of verifications fetched per review batch (default: `50`).
    pub review_batch_size: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                |
    /// | `PORT`                 | `3000`                                   |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                                     |
    /// | `DEFAULT_REVIEWER_ID`  | `fe9ffb80-877b-4671-9c35-235a6f220828`   |
    /// | `REVIEW_BATCH_SIZE`    | `50`                                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let default_reviewer_id: RecordId = std::env::var("DEFAULT_REVIEWER_ID")
            .unwrap_or_else(|_| FALLBACK_REVIEWER_ID.into())
            .parse()
            .expect("DEFAULT_REVIEWER_ID must be a valid UUID");

        let review_batch_size: i64 = std::env::var("REVIEW_BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse()
            .expect("REVIEW_BATCH_SIZE must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            default_reviewer_id,
            review_batch_size,
        }
    }
}
