/// Taxonomy and revision primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Verifications, questions, parts, options and reviewers are keyed by UUID.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
