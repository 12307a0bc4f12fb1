//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod question_repo;
pub mod topic_repo;
pub mod verification_repo;

pub use question_repo::QuestionRepo;
pub use topic_repo::TopicRepo;
pub use verification_repo::VerificationRepo;
