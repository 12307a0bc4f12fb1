//! Route definitions for the `/review-session` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::review_session;
use crate::state::AppState;

/// Routes mounted at `/review-session`.
///
/// ```text
/// GET    /           -> get_session
/// POST   /           -> select_for_review (?listing filters when no batch is given)
/// DELETE /           -> return_to_list
/// POST   /advance    -> advance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(review_session::get_session)
                .post(review_session::select_for_review)
                .delete(review_session::return_to_list),
        )
        .route("/advance", post(review_session::advance))
}
