//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `qverify_db` or to
//! the review session state, and map errors via [`AppError`](crate::error::AppError).

pub mod review_session;
pub mod topic;
pub mod verification;
