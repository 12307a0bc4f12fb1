//! Repository for the `question_verification` table.
//!
//! Listing composes every active filter into one conjunctive WHERE clause
//! shared by the batch query and its count. Decisions run in a single
//! transaction with the verification row locked.

use qverify_core::filters::{substring_pattern, ChallengeFilter, VerificationFilter};
use qverify_core::topics::normalize_selection;
use qverify_core::types::{DbId, RecordId};
use qverify_core::verification::{
    append_reviewer, is_redecision, AuditList, Transition, TransitionOutcome,
    CHALLENGE_QUESTION_KEY,
};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::verification::{
    QuestionVerification, VerificationDetail, VerificationPage, VerificationSummary,
};
use crate::repositories::{QuestionRepo, TopicRepo};

// ---------------------------------------------------------------------------
// Column lists
// ---------------------------------------------------------------------------

/// Column list for plain `question_verification` queries.
const COLUMNS: &str = "id, question_id, reference_question_id, approver_user_ids, \
    rejected_user_ids, reference_source, status, metadata, created_at, updated_at";

/// Column list for summary queries joined with `question` and `subject`.
const SUMMARY_COLUMNS: &str = "\
    qv.id, qv.question_id, qv.reference_question_id, qv.approver_user_ids, \
    qv.rejected_user_ids, qv.reference_source, qv.status, qv.metadata, \
    qv.created_at, qv.updated_at, \
    q.specification AS question_specification, \
    q.difficulty AS question_difficulty, \
    q.question_type, \
    q.level AS question_level, \
    q.paper AS question_paper, \
    q.subject_id AS question_subject_id, \
    s.title AS subject_title, \
    s.slug AS subject_slug";

/// Join shared by listing, counting and summary lookups.
const SUMMARY_FROM: &str = "\
    FROM question_verification qv \
    LEFT JOIN question q ON q.id = qv.question_id \
    LEFT JOIN subject s ON s.id = q.subject_id";

// ---------------------------------------------------------------------------
// VerificationRepo
// ---------------------------------------------------------------------------

/// Provides listing, detail and decision operations for verifications.
pub struct VerificationRepo;

impl VerificationRepo {
    /// Fetch one review batch matching `filter`, newest first.
    ///
    /// `total` counts every matching row; `has_more` is set when more than
    /// `filter.limit` rows matched.
    pub async fn list(
        pool: &PgPool,
        filter: &VerificationFilter,
    ) -> Result<VerificationPage, sqlx::Error> {
        let topic_ids = Self::resolve_topic_ids(pool, filter).await?;
        let (where_clause, bind_values, bind_idx) = build_verification_filter(filter, &topic_ids);

        let query = format!(
            "SELECT {SUMMARY_COLUMNS} {SUMMARY_FROM} {where_clause} \
             ORDER BY qv.created_at DESC, qv.id DESC \
             LIMIT ${bind_idx}"
        );
        let q = bind_verification_values(
            sqlx::query_as::<_, VerificationSummary>(&query),
            &bind_values,
        );
        let mut items = q.bind(filter.limit + 1).fetch_all(pool).await?;

        let has_more = items.len() as i64 > filter.limit;
        items.truncate(filter.limit.max(0) as usize);

        let total = Self::count_matching(pool, &where_clause, &bind_values).await?;

        tracing::debug!(
            predicates = filter.predicate_count(),
            returned = items.len(),
            total,
            has_more,
            "Listed verifications"
        );

        Ok(VerificationPage {
            items,
            total,
            has_more,
        })
    }

    /// Count verifications matching `filter`, ignoring its limit.
    pub async fn count(pool: &PgPool, filter: &VerificationFilter) -> Result<i64, sqlx::Error> {
        let topic_ids = Self::resolve_topic_ids(pool, filter).await?;
        let (where_clause, bind_values, _) = build_verification_filter(filter, &topic_ids);
        Self::count_matching(pool, &where_clause, &bind_values).await
    }

    /// Find a verification row by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<QuestionVerification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM question_verification WHERE id = $1");
        sqlx::query_as::<_, QuestionVerification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a verification with its question and subject display fields.
    pub async fn find_summary_by_id(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<VerificationSummary>, sqlx::Error> {
        let query = format!("SELECT {SUMMARY_COLUMNS} {SUMMARY_FROM} WHERE qv.id = $1");
        sqlx::query_as::<_, VerificationSummary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load a verification, its question and its reference question.
    ///
    /// Returns `None` when the verification or its owning question does
    /// not exist. A reference id that does not resolve yields
    /// `reference_question: None`.
    pub async fn load_detail(
        pool: &PgPool,
        id: RecordId,
    ) -> Result<Option<VerificationDetail>, sqlx::Error> {
        let Some(verification) = Self::find_summary_by_id(pool, id).await? else {
            return Ok(None);
        };

        let Some(question) =
            QuestionRepo::find_with_content(pool, verification.verification.question_id).await?
        else {
            tracing::warn!(
                verification_id = %id,
                question_id = %verification.verification.question_id,
                "Verification references a missing question"
            );
            return Ok(None);
        };

        let reference_question = match verification.verification.reference_question_id {
            Some(reference_id) => QuestionRepo::find_with_content(pool, reference_id).await?,
            None => None,
        };

        Ok(Some(VerificationDetail {
            verification,
            question,
            reference_question,
        }))
    }

    /// Apply a reviewer decision.
    ///
    /// The status change, the audit-list append and (for approvals) the
    /// question's publication happen in one transaction. A missing
    /// verification or a failed update is reported as a failed outcome;
    /// an error while opening the transaction or reading the locked row is
    /// returned as `Err`.
    pub async fn transition(
        pool: &PgPool,
        id: RecordId,
        transition: Transition,
        reviewer_id: RecordId,
    ) -> Result<TransitionOutcome<QuestionVerification>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM question_verification WHERE id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, QuestionVerification>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(current) = current else {
            tracing::info!(verification_id = %id, %transition, "Verification not found");
            return Ok(TransitionOutcome::not_found(id));
        };

        if let Ok(status) = current.parsed_status() {
            if is_redecision(status, transition) {
                tracing::info!(
                    verification_id = %id,
                    previous_status = %status,
                    %transition,
                    "Overriding earlier decision"
                );
            }
        }

        let applied = match Self::apply_locked(&mut tx, current, transition, reviewer_id).await {
            Ok(updated) => tx.commit().await.map(|()| updated),
            Err(err) => Err(err),
        };

        match applied {
            Ok(updated) => Ok(TransitionOutcome::Applied(updated)),
            Err(err) => {
                tracing::error!(
                    verification_id = %id,
                    %transition,
                    error = %err,
                    "Failed to apply decision"
                );
                Ok(TransitionOutcome::store_unavailable(transition))
            }
        }
    }

    /// Write a decision against a row already locked by `tx`.
    async fn apply_locked(
        tx: &mut Transaction<'_, Postgres>,
        current: QuestionVerification,
        transition: Transition,
        reviewer_id: RecordId,
    ) -> Result<QuestionVerification, sqlx::Error> {
        let mut approvers = current.approver_user_ids;
        let mut rejecters = current.rejected_user_ids;

        match transition.audit_list() {
            Some(AuditList::Approvers) => {
                append_reviewer(&mut approvers, reviewer_id);
            }
            Some(AuditList::Rejecters) => {
                append_reviewer(&mut rejecters, reviewer_id);
            }
            None => {}
        }

        let query = format!(
            "UPDATE question_verification SET
                status = $2,
                approver_user_ids = $3,
                rejected_user_ids = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, QuestionVerification>(&query)
            .bind(current.id)
            .bind(transition.target_status().as_str())
            .bind(&approvers)
            .bind(&rejecters)
            .fetch_one(&mut **tx)
            .await?;

        if transition.publishes_question() {
            sqlx::query("UPDATE question SET is_staging = false, updated_at = NOW() WHERE id = $1")
                .bind(current.question_id)
                .execute(&mut **tx)
                .await?;
        }

        Ok(updated)
    }

    /// Expand the filter's topic selection using the taxonomy.
    async fn resolve_topic_ids(
        pool: &PgPool,
        filter: &VerificationFilter,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if filter.topic_ids.is_empty() {
            return Ok(Vec::new());
        }
        let tree = TopicRepo::list_tree(pool, None).await?;
        Ok(normalize_selection(&tree, &filter.topic_ids))
    }

    async fn count_matching(
        pool: &PgPool,
        where_clause: &str,
        bind_values: &[BindValue],
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT {SUMMARY_FROM} {where_clause}");
        let q = bind_verification_values_scalar(sqlx::query_scalar::<_, i64>(&query), bind_values);
        q.fetch_one(pool).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built verification queries.
enum BindValue {
    SmallInt(i16),
    Text(String),
    BigIntArray(Vec<DbId>),
}

/// Build a WHERE clause and bind values from a listing filter.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_verification_filter(
    filter: &VerificationFilter,
    topic_ids: &[DbId],
) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(status) = filter.status {
        conditions.push(format!("qv.status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.as_str().to_string()));
    }

    if let Some(difficulty) = filter.difficulty {
        conditions.push(format!("q.difficulty = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::SmallInt(difficulty));
    }

    if let Some(ref source) = filter.reference_source {
        conditions.push(format!("qv.reference_source ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(substring_pattern(source)));
    }

    match filter.challenge {
        ChallengeFilter::All => {}
        ChallengeFilter::Challenge => {
            conditions.push(format!("qv.metadata->>'{CHALLENGE_QUESTION_KEY}' = 'true'"));
        }
        ChallengeFilter::Regular => {
            conditions.push(format!(
                "(qv.metadata->>'{CHALLENGE_QUESTION_KEY}' IS NULL \
                 OR qv.metadata->>'{CHALLENGE_QUESTION_KEY}' <> 'true')"
            ));
        }
    }

    if !topic_ids.is_empty() {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM question_topic qt \
             WHERE qt.question_id = qv.question_id AND qt.topic_id = ANY(${bind_idx}))"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::BigIntArray(topic_ids.to_vec()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_verification_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::SmallInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::BigIntArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_verification_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::SmallInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::BigIntArray(v) => q = q.bind(v.as_slice()),
        }
    }
    q
}
