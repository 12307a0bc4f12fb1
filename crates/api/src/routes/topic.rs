//! Route definitions for the `/topics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::topic;
use crate::state::AppState;

/// Routes mounted at `/topics`.
///
/// ```text
/// GET    /                   -> list_topics (?subject_id=, hide_empty=)
/// GET    /question-counts    -> question_counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topic::list_topics))
        .route("/question-counts", get(topic::question_counts))
}
