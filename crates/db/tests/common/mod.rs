//! Seed helpers shared by the repository integration tests.
//!
//! Rows are inserted with raw SQL since the repository layer is read-only
//! for everything except verification decisions.

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

pub async fn seed_subject(pool: &PgPool, slug: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO subject (title, slug) VALUES ($1, $2) RETURNING id")
        .bind(format!("Subject {slug}"))
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_topic(pool: &PgPool, subject_id: i64, parent: Option<i64>, title: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO topic (subject_id, parent_topic_id, title, slug)
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(subject_id)
    .bind(parent)
    .bind(title)
    .bind(title.to_lowercase().replace(' ', "-"))
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a question with a current revision but no parts or options.
pub async fn seed_question(pool: &PgPool, subject_id: Option<i64>, difficulty: Option<i16>) -> Uuid {
    let question_id: Uuid = sqlx::query_scalar(
        "INSERT INTO question (subject_id, specification, question_type, difficulty)
         VALUES ($1, 'Solve for x', 'short_answer', $2) RETURNING id",
    )
    .bind(subject_id)
    .bind(difficulty)
    .fetch_one(pool)
    .await
    .unwrap();

    let revision_id = seed_revision(pool, question_id).await;
    sqlx::query("UPDATE question SET current_revision_id = $2 WHERE id = $1")
        .bind(question_id)
        .bind(revision_id)
        .execute(pool)
        .await
        .unwrap();

    question_id
}

pub async fn seed_revision(pool: &PgPool, question_id: Uuid) -> i64 {
    sqlx::query_scalar("INSERT INTO question_revision (question_id) VALUES ($1) RETURNING id")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn current_revision(pool: &PgPool, question_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT current_revision_id FROM question WHERE id = $1")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn seed_part(
    pool: &PgPool,
    revision_id: i64,
    order: i32,
    content: &str,
    markscheme: Option<&str>,
    marks: Option<i32>,
) {
    sqlx::query(
        "INSERT INTO question_part (revision_id, content, markscheme, marks, \"order\")
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(revision_id)
    .bind(content)
    .bind(markscheme)
    .bind(marks)
    .bind(order)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn seed_option(pool: &PgPool, revision_id: i64, order: i32, content: &str, correct: bool) {
    sqlx::query(
        "INSERT INTO question_option (revision_id, content, correct, \"order\")
         VALUES ($1, $2, $3, $4)",
    )
    .bind(revision_id)
    .bind(content)
    .bind(correct)
    .bind(order)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn tag_question(pool: &PgPool, question_id: Uuid, topic_id: i64) {
    sqlx::query("INSERT INTO question_topic (question_id, topic_id) VALUES ($1, $2)")
        .bind(question_id)
        .bind(topic_id)
        .execute(pool)
        .await
        .unwrap();
}

/// Optional columns for a seeded verification.
#[derive(Default)]
pub struct VerificationSeed<'a> {
    pub status: Option<&'a str>,
    pub reference_question_id: Option<Uuid>,
    pub reference_source: Option<&'a str>,
    pub metadata: Option<serde_json::Value>,
    /// Minutes before now; larger means older.
    pub age_minutes: i32,
}

pub async fn seed_verification(pool: &PgPool, question_id: Uuid, seed: VerificationSeed<'_>) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO question_verification
            (question_id, reference_question_id, reference_source, status, metadata, created_at)
         VALUES ($1, $2, $3, $4, $5, NOW() - make_interval(mins => $6))
         RETURNING id",
    )
    .bind(question_id)
    .bind(seed.reference_question_id)
    .bind(seed.reference_source)
    .bind(seed.status.unwrap_or("pending"))
    .bind(seed.metadata)
    .bind(seed.age_minutes)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a fresh question and a pending verification for it.
pub async fn seed_pending(pool: &PgPool, age_minutes: i32) -> (Uuid, Uuid) {
    let question_id = seed_question(pool, None, None).await;
    let verification_id = seed_verification(
        pool,
        question_id,
        VerificationSeed {
            age_minutes,
            ..VerificationSeed::default()
        },
    )
    .await;
    (verification_id, question_id)
}

pub async fn is_staging(pool: &PgPool, question_id: Uuid) -> bool {
    sqlx::query_scalar("SELECT is_staging FROM question WHERE id = $1")
        .bind(question_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
