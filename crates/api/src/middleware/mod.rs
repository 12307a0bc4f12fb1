//! Request extractors shared by handlers.
//!
//! - [`reviewer::Reviewer`] -- Resolves the reviewer a decision is credited to.

pub mod reviewer;
