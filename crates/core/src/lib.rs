//! Domain logic for the question verification service.
//!
//! Pure types, constants and rules shared by the `db` and `api` crates.
//! Nothing in here performs I/O.

pub mod error;
pub mod filters;
pub mod review_session;
pub mod topics;
pub mod types;
pub mod verification;
