//! Handlers for the topic taxonomy used by the listing's topic filter.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use qverify_core::topics::retain_non_empty;
use qverify_core::types::DbId;
use qverify_db::repositories::TopicRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /topics`.
#[derive(Debug, Deserialize)]
pub struct TopicListParams {
    pub subject_id: Option<DbId>,
    /// Drop top-level topics with no classified questions.
    #[serde(default)]
    pub hide_empty: bool,
}

/// GET /api/v1/topics
///
/// Topics with their nested subtopics, ordered by title.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<impl IntoResponse> {
    let mut tree = TopicRepo::list_tree(&state.pool, params.subject_id).await?;

    if params.hide_empty {
        let counts = TopicRepo::question_count_map(&state.pool).await?;
        tree = retain_non_empty(tree, &counts);
    }

    Ok(Json(DataResponse { data: tree }))
}

/// GET /api/v1/topics/question-counts
///
/// Distinct question count per topic id.
pub async fn question_counts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let counts = TopicRepo::question_count_map(&state.pool).await?;
    Ok(Json(DataResponse { data: counts }))
}
