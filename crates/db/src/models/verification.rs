//! Question verification models.

use qverify_core::error::CoreError;
use qverify_core::types::{DbId, RecordId, Timestamp};
use qverify_core::verification::{is_challenge_question, VerificationStatus};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::question::QuestionWithContent;

/// A row from the `question_verification` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionVerification {
    pub id: RecordId,
    pub question_id: RecordId,
    pub reference_question_id: Option<RecordId>,
    pub approver_user_ids: Vec<RecordId>,
    pub rejected_user_ids: Vec<RecordId>,
    pub reference_source: Option<String>,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl QuestionVerification {
    /// Parse the stored status column.
    pub fn parsed_status(&self) -> Result<VerificationStatus, CoreError> {
        VerificationStatus::parse(&self.status)
    }

    pub fn is_challenge_question(&self) -> bool {
        is_challenge_question(self.metadata.as_ref())
    }
}

/// A verification joined with display fields from its question and subject.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VerificationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub verification: QuestionVerification,
    pub question_specification: Option<String>,
    pub question_difficulty: Option<i16>,
    pub question_type: Option<String>,
    pub question_level: Option<String>,
    pub question_paper: Option<String>,
    pub question_subject_id: Option<DbId>,
    pub subject_title: Option<String>,
    pub subject_slug: Option<String>,
}

/// One review batch.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationPage {
    pub items: Vec<VerificationSummary>,
    /// Rows matching the filter, independent of the batch size.
    pub total: i64,
    /// Whether more rows matched than fit in the batch.
    pub has_more: bool,
}

/// Everything the comparison view needs for one verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationDetail {
    pub verification: VerificationSummary,
    pub question: QuestionWithContent,
    pub reference_question: Option<QuestionWithContent>,
}
