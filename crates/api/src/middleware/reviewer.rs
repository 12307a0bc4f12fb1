//! Reviewer identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use qverify_core::types::RecordId;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the acting reviewer's id.
pub const REVIEWER_HEADER: &str = "x-reviewer-id";

/// The reviewer a request acts on behalf of.
///
/// Read from the `x-reviewer-id` header. Requests without the header act as
/// the configured default reviewer; a header that is not a UUID is rejected.
///
/// ```ignore
/// async fn my_handler(reviewer: Reviewer) -> AppResult<Json<()>> {
///     tracing::info!(reviewer_id = %reviewer.reviewer_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reviewer {
    pub reviewer_id: RecordId,
}

impl FromRequestParts<AppState> for Reviewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(REVIEWER_HEADER) else {
            return Ok(Reviewer {
                reviewer_id: state.config.default_reviewer_id,
            });
        };

        let raw = value.to_str().map_err(|_| {
            AppError::BadRequest(format!("{REVIEWER_HEADER} header must be valid ASCII"))
        })?;

        let reviewer_id = raw.trim().parse::<RecordId>().map_err(|_| {
            AppError::BadRequest(format!(
                "Invalid {REVIEWER_HEADER} header. Expected a UUID, got '{raw}'"
            ))
        })?;

        Ok(Reviewer { reviewer_id })
    }
}
