//! Handlers for a reviewer's walk through a captured batch.
//!
//! Sessions live in [`AppState::review_sessions`] keyed by reviewer. The
//! batch is captured once on selection and never re-fetched, so decisions
//! made while reviewing do not reorder the queue.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use qverify_core::filters::FilterParams;
use qverify_core::review_session::{Advance, ReviewSession, SessionSnapshot};
use qverify_core::types::RecordId;
use qverify_db::repositories::VerificationRepo;

use crate::error::AppResult;
use crate::handlers::verification::parse_filter;
use crate::middleware::reviewer::Reviewer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /review-session`.
#[derive(Debug, Deserialize)]
pub struct SelectForReviewRequest {
    pub verification_id: RecordId,
    /// Ids of the batch being reviewed, in list order. When omitted the
    /// batch is fetched using the listing filters on the query string.
    pub batch: Option<Vec<RecordId>>,
}

/// Response for `POST /review-session/advance`.
#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
    /// False when the session was already on the last item or had no selection.
    pub advanced: bool,
    pub session: SessionSnapshot,
}

/// GET /api/v1/review-session
pub async fn get_session(
    reviewer: Reviewer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sessions = state.review_sessions.read().await;
    let snapshot = sessions
        .get(&reviewer.reviewer_id)
        .map(ReviewSession::snapshot)
        .unwrap_or_else(|| ReviewSession::new().snapshot());

    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/review-session
///
/// Open a verification for review, capturing the batch to walk.
pub async fn select_for_review(
    reviewer: Reviewer,
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
    Json(input): Json<SelectForReviewRequest>,
) -> AppResult<impl IntoResponse> {
    let batch = match input.batch {
        Some(batch) => batch,
        None => {
            let filter = parse_filter(&state, &params);
            VerificationRepo::list(&state.pool, &filter)
                .await?
                .items
                .into_iter()
                .map(|item| item.verification.id)
                .collect()
        }
    };

    let mut sessions = state.review_sessions.write().await;
    let mut session = sessions
        .get(&reviewer.reviewer_id)
        .cloned()
        .unwrap_or_default();
    session.select_for_review(batch, input.verification_id)?;
    let snapshot = session.snapshot();
    sessions.insert(reviewer.reviewer_id, session);

    tracing::info!(
        reviewer_id = %reviewer.reviewer_id,
        verification_id = %input.verification_id,
        index = snapshot.index,
        total = snapshot.total,
        "Review session started"
    );

    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/review-session/advance
///
/// Move to the next verification in the captured batch.
pub async fn advance(
    reviewer: Reviewer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut sessions = state.review_sessions.write().await;
    let Some(session) = sessions.get_mut(&reviewer.reviewer_id) else {
        return Ok(Json(DataResponse {
            data: AdvanceResponse {
                advanced: false,
                session: ReviewSession::new().snapshot(),
            },
        }));
    };

    let advanced = match session.advance() {
        Advance::Moved(next) => {
            tracing::debug!(reviewer_id = %reviewer.reviewer_id, verification_id = %next, "Advanced");
            true
        }
        Advance::BatchEnd => {
            tracing::info!(reviewer_id = %reviewer.reviewer_id, "Reached end of review batch");
            false
        }
        Advance::Idle => false,
    };

    Ok(Json(DataResponse {
        data: AdvanceResponse {
            advanced,
            session: session.snapshot(),
        },
    }))
}

/// DELETE /api/v1/review-session
///
/// Leave detail mode and return to the list.
pub async fn return_to_list(
    reviewer: Reviewer,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let mut sessions = state.review_sessions.write().await;
    if let Some(session) = sessions.get_mut(&reviewer.reviewer_id) {
        session.return_to_list();
    }

    Ok(StatusCode::NO_CONTENT)
}
