//! Question content models: the question row and its revision-scoped
//! parts and options.

use qverify_core::types::{DbId, RecordId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `question` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: RecordId,
    pub subject_id: Option<DbId>,
    pub current_revision_id: Option<DbId>,
    pub specification: String,
    pub question_type: Option<String>,
    pub level: Option<String>,
    pub paper: Option<String>,
    pub difficulty: Option<i16>,
    /// True until the question is approved and published.
    pub is_staging: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An open-response sub-question. Missing markschemes read as `""` and
/// missing marks as `0`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionPart {
    pub id: RecordId,
    pub revision_id: DbId,
    pub content: String,
    pub markscheme: String,
    pub marks: i32,
    pub order: i32,
}

/// A multiple-choice answer. A missing markscheme reads as `""`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionOption {
    pub id: RecordId,
    pub revision_id: DbId,
    pub content: String,
    pub correct: bool,
    pub order: i32,
    pub markscheme: String,
}

/// A question with the parts and options of its current revision.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithContent {
    #[serde(flatten)]
    pub question: Question,
    pub parts: Vec<QuestionPart>,
    pub options: Vec<QuestionOption>,
}
