//! Route definitions for the `/verifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;

/// Routes mounted at `/verifications`.
///
/// ```text
/// GET    /                      -> list_verifications
/// GET    /{id}                  -> get_verification
/// POST   /{id}/approve          -> approve
/// POST   /{id}/reject           -> reject
/// POST   /{id}/needs-image      -> needs_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(verification::list_verifications))
        .route("/{id}", get(verification::get_verification))
        .route("/{id}/approve", post(verification::approve))
        .route("/{id}/reject", post(verification::reject))
        .route("/{id}/needs-image", post(verification::needs_image))
}
