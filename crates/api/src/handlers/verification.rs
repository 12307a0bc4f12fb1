//! Handlers for listing, inspecting and deciding question verifications.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use qverify_core::error::CoreError;
use qverify_core::filters::{FilterParams, VerificationFilter, FILTER_ALL};
use qverify_core::types::RecordId;
use qverify_core::verification::{
    Transition, TransitionFailure, TransitionOutcome, AUTO_ADVANCE_DELAY_MS,
};
use qverify_db::models::verification::{QuestionVerification, VerificationPage};
use qverify_db::repositories::VerificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::reviewer::Reviewer;
use crate::response::DataResponse;
use crate::state::AppState;

/// A review batch plus labels for the filters that produced it.
#[derive(Debug, Serialize)]
pub struct VerificationListResponse {
    #[serde(flatten)]
    pub page: VerificationPage,
    pub active_filters: BTreeMap<&'static str, String>,
}

/// The verification after a decision was written.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub verification: QuestionVerification,
    /// How long the client waits before moving to the next item.
    pub auto_advance_delay_ms: u64,
}

/// Parse listing params, using the configured batch size as the default limit.
pub(crate) fn parse_filter(state: &AppState, params: &FilterParams) -> VerificationFilter {
    let filter = VerificationFilter::from_params(params, state.config.review_batch_size);
    log_ignored_filters(params, &filter);
    filter
}

/// GET /api/v1/verifications
///
/// List one review batch. Supports `?status=&difficulty=&reference_source=
/// &challenge_question=&topic_ids=&limit=`. Unrecognized values are ignored.
pub async fn list_verifications(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> AppResult<impl IntoResponse> {
    let filter = parse_filter(&state, &params);
    let page = VerificationRepo::list(&state.pool, &filter).await?;

    Ok(Json(DataResponse {
        data: VerificationListResponse {
            page,
            active_filters: filter.active_labels(),
        },
    }))
}

/// GET /api/v1/verifications/{id}
///
/// Load a verification with its question and optional reference question.
pub async fn get_verification(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    let detail = VerificationRepo::load_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "QuestionVerification",
            id,
        }))?;

    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/verifications/{id}/approve
///
/// Approve a verification and publish its question.
pub async fn approve(
    reviewer: Reviewer,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    apply_transition(&state, id, Transition::Approve, reviewer).await
}

/// POST /api/v1/verifications/{id}/reject
pub async fn reject(
    reviewer: Reviewer,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    apply_transition(&state, id, Transition::Reject, reviewer).await
}

/// POST /api/v1/verifications/{id}/needs-image
///
/// Flag a verification as needing an image. Audit lists are untouched.
pub async fn needs_image(
    reviewer: Reviewer,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<impl IntoResponse> {
    apply_transition(&state, id, Transition::NeedsImage, reviewer).await
}

async fn apply_transition(
    state: &AppState,
    id: RecordId,
    transition: Transition,
    reviewer: Reviewer,
) -> AppResult<Json<DataResponse<TransitionResponse>>> {
    let outcome =
        VerificationRepo::transition(&state.pool, id, transition, reviewer.reviewer_id).await?;

    match outcome {
        TransitionOutcome::Applied(verification) => {
            tracing::info!(
                reviewer_id = %reviewer.reviewer_id,
                verification_id = %id,
                decision = %transition,
                status = %verification.status,
                "Verification decided"
            );
            Ok(Json(DataResponse {
                data: TransitionResponse {
                    verification,
                    auto_advance_delay_ms: AUTO_ADVANCE_DELAY_MS,
                },
            }))
        }
        TransitionOutcome::Failed {
            kind: TransitionFailure::NotFound,
            ..
        } => Err(AppError::Core(CoreError::NotFound {
            entity: "QuestionVerification",
            id,
        })),
        TransitionOutcome::Failed {
            kind: TransitionFailure::StoreUnavailable,
            message,
        } => Err(AppError::TransitionFailed(message)),
    }
}

/// Debug-log raw filter values that did not survive parsing.
fn log_ignored_filters(params: &FilterParams, filter: &VerificationFilter) {
    let given = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .is_some_and(|v| !v.is_empty() && v != FILTER_ALL)
    };

    if given(&params.status) && filter.status.is_none() {
        tracing::debug!(status = ?params.status, "Ignoring unrecognized status filter");
    }
    if given(&params.difficulty) && filter.difficulty.is_none() {
        tracing::debug!(difficulty = ?params.difficulty, "Ignoring unrecognized difficulty filter");
    }
    if given(&params.topic_ids) && filter.topic_ids.is_empty() {
        tracing::debug!(topic_ids = ?params.topic_ids, "Ignoring unrecognized topic filter");
    }
}
