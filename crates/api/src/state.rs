use std::collections::HashMap;
use std::sync::Arc;

use qverify_core::review_session::ReviewSession;
use qverify_core::types::RecordId;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// In-memory review sessions keyed by reviewer id.
pub type ReviewSessions = Arc<RwLock<HashMap<RecordId, ReviewSession>>>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: qverify_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-reviewer navigation state. Lost on restart.
    pub review_sessions: ReviewSessions,
}

impl AppState {
    pub fn new(pool: qverify_db::DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
            review_sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}
