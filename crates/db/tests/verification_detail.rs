//! Integration tests for the verification detail load.

mod common;

use common::{
    current_revision, seed_option, seed_part, seed_question, seed_revision, seed_subject,
    seed_verification, VerificationSeed,
};
use qverify_db::repositories::VerificationRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_without_reference(pool: PgPool) {
    let subject = seed_subject(&pool, "chemistry").await;
    let q = seed_question(&pool, Some(subject), Some(4)).await;
    let v = seed_verification(&pool, q, VerificationSeed::default()).await;

    let detail = VerificationRepo::load_detail(&pool, v).await.unwrap().unwrap();

    assert_eq!(detail.verification.verification.id, v);
    assert_eq!(detail.verification.subject_title.as_deref(), Some("Subject chemistry"));
    assert_eq!(detail.question.question.id, q);
    assert!(detail.reference_question.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_joins_reference_question(pool: PgPool) {
    let q = seed_question(&pool, None, None).await;
    let reference = seed_question(&pool, None, None).await;
    let rev = current_revision(&pool, reference).await;
    seed_option(&pool, rev, 1, "B", false).await;
    seed_option(&pool, rev, 0, "A", true).await;

    let v = seed_verification(
        &pool,
        q,
        VerificationSeed {
            reference_question_id: Some(reference),
            ..Default::default()
        },
    )
    .await;

    let detail = VerificationRepo::load_detail(&pool, v).await.unwrap().unwrap();
    let reference_question = detail.reference_question.unwrap();

    assert_eq!(reference_question.question.id, reference);
    let contents: Vec<&str> = reference_question
        .options
        .iter()
        .map(|o| o.content.as_str())
        .collect();
    assert_eq!(contents, vec!["A", "B"]);
    assert!(reference_question.options[0].correct);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_parts_come_from_current_revision_in_order(pool: PgPool) {
    let q = seed_question(&pool, None, None).await;
    let current = current_revision(&pool, q).await;
    let stale = seed_revision(&pool, q).await;

    seed_part(&pool, current, 2, "(b)", None, None).await;
    seed_part(&pool, current, 1, "(a)", Some("M1 A1"), Some(2)).await;
    seed_part(&pool, stale, 1, "old (a)", None, None).await;

    let v = seed_verification(&pool, q, VerificationSeed::default()).await;
    let detail = VerificationRepo::load_detail(&pool, v).await.unwrap().unwrap();

    let parts = &detail.question.parts;
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].content, "(a)");
    assert_eq!(parts[0].markscheme, "M1 A1");
    assert_eq!(parts[0].marks, 2);
    assert_eq!(parts[1].content, "(b)");
    assert_eq!(parts[1].markscheme, "");
    assert_eq!(parts[1].marks, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_reference_resolves_to_none(pool: PgPool) {
    let q = seed_question(&pool, None, None).await;
    let reference = seed_question(&pool, None, None).await;
    let v = seed_verification(
        &pool,
        q,
        VerificationSeed {
            reference_question_id: Some(reference),
            ..Default::default()
        },
    )
    .await;

    sqlx::query("DELETE FROM question WHERE id = $1")
        .bind(reference)
        .execute(&pool)
        .await
        .unwrap();

    let detail = VerificationRepo::load_detail(&pool, v).await.unwrap().unwrap();
    assert!(detail.reference_question.is_none());
    assert!(detail.verification.verification.reference_question_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_verification_is_none(pool: PgPool) {
    let detail = VerificationRepo::load_detail(&pool, uuid::Uuid::new_v4())
        .await
        .unwrap();
    assert!(detail.is_none());
}
