pub mod health;
pub mod review_session;
pub mod topic;
pub mod verification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /verifications                                   list (?status, difficulty, reference_source,
///                                                  challenge_question, topic_ids, limit)
/// /verifications/{id}                              detail with question and reference
/// /verifications/{id}/approve                      approve (POST)
/// /verifications/{id}/reject                       reject (POST)
/// /verifications/{id}/needs-image                  needs image (POST)
///
/// /topics                                          topic tree (?subject_id, hide_empty)
/// /topics/question-counts                          question count per topic
///
/// /review-session                                  get, select (POST), return to list (DELETE)
/// /review-session/advance                          advance (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/verifications", verification::router())
        .nest("/topics", topic::router())
        .nest("/review-session", review_session::router())
}
