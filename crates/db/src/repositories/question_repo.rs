//! Repository for the `question`, `question_part` and `question_option` tables.

use qverify_core::types::{DbId, RecordId};
use sqlx::PgPool;

use crate::models::question::{Question, QuestionOption, QuestionPart, QuestionWithContent};

/// Column list for `question` queries.
const COLUMNS: &str = "id, subject_id, current_revision_id, specification, question_type, \
    level, paper, difficulty, is_staging, created_at, updated_at";

/// Column list for `question_part` queries. Nullable text and marks are
/// normalized so the view never has to branch on them.
const PART_COLUMNS: &str = "id, revision_id, content, COALESCE(markscheme, '') AS markscheme, \
    COALESCE(marks, 0) AS marks, \"order\"";

/// Column list for `question_option` queries.
const OPTION_COLUMNS: &str =
    "id, revision_id, content, correct, \"order\", COALESCE(markscheme, '') AS markscheme";

/// Provides read operations for questions and their content.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Find a question by its ID.
    pub async fn find_by_id(pool: &PgPool, id: RecordId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the parts of a revision in display order.
    pub async fn list_parts(
        pool: &PgPool,
        revision_id: DbId,
    ) -> Result<Vec<QuestionPart>, sqlx::Error> {
        let query = format!(
            "SELECT {PART_COLUMNS} FROM question_part
             WHERE revision_id = $1
             ORDER BY \"order\" ASC"
        );
        sqlx::query_as::<_, QuestionPart>(&query)
            .bind(revision_id)
            .fetch_all(pool)
            .await
    }

    /// List the options of a revision in display order.
    pub async fn list_options(
        pool: &PgPool,
        revision_id: DbId,
    ) -> Result<Vec<QuestionOption>, sqlx::Error> {
        let query = format!(
            "SELECT {OPTION_COLUMNS} FROM question_option
             WHERE revision_id = $1
             ORDER BY \"order\" ASC"
        );
        sqlx::query_as::<_, QuestionOption>(&query)
            .bind(revision_id)
            .fetch_all(pool)
            .await
    }

    /// Find a question together with the parts and options of its current
    /// revision.
    ///
    /// A question without a current revision has no parts or options.
    pub async fn find_with_content(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<QuestionWithContent>, sqlx::Error> {
        let Some(question) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let (parts, options) = match question.current_revision_id {
            Some(revision_id) => (
                Self::list_parts(pool, revision_id).await?,
                Self::list_options(pool, revision_id).await?,
            ),
            None => (Vec::new(), Vec::new()),
        };

        Ok(Some(QuestionWithContent {
            question,
            parts,
            options,
        }))
    }
}
