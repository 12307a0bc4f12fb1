//! Repository for the `topic` and `question_topic` tables.

use std::collections::HashMap;

use qverify_core::topics::{build_topic_tree, TopicNode};
use qverify_core::types::DbId;
use sqlx::PgPool;

use crate::models::topic::{Topic, TopicQuestionCount};

/// Column list for `topic` queries.
const COLUMNS: &str = "id, subject_id, parent_topic_id, title, slug, created_at";

/// Provides read operations for the topic taxonomy.
pub struct TopicRepo;

impl TopicRepo {
    /// List topics, optionally restricted to one subject, ordered by title.
    pub async fn list(pool: &PgPool, subject_id: Option<DbId>) -> Result<Vec<Topic>, sqlx::Error> {
        match subject_id {
            Some(subject_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM topic WHERE subject_id = $1 ORDER BY title ASC, id ASC"
                );
                sqlx::query_as::<_, Topic>(&query)
                    .bind(subject_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM topic ORDER BY title ASC, id ASC");
                sqlx::query_as::<_, Topic>(&query).fetch_all(pool).await
            }
        }
    }

    /// List topics as a two-level tree of topics and subtopics.
    pub async fn list_tree(
        pool: &PgPool,
        subject_id: Option<DbId>,
    ) -> Result<Vec<TopicNode>, sqlx::Error> {
        let topics = Self::list(pool, subject_id).await?;
        Ok(build_topic_tree(topics.into_iter().map(TopicNode::from).collect()))
    }

    /// Count distinct questions per topic.
    ///
    /// A subtopic counts the questions classified under it. A top-level
    /// topic counts those classified under it or any of its subtopics.
    pub async fn question_counts(pool: &PgPool) -> Result<Vec<TopicQuestionCount>, sqlx::Error> {
        sqlx::query_as::<_, TopicQuestionCount>(
            "SELECT
                t.id AS topic_id,
                COUNT(DISTINCT qt.question_id)::BIGINT AS question_count
             FROM topic t
             LEFT JOIN topic child ON child.parent_topic_id = t.id
             LEFT JOIN question_topic qt
                ON qt.topic_id = t.id OR qt.topic_id = child.id
             GROUP BY t.id
             ORDER BY t.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// [`Self::question_counts`] keyed by topic id.
    pub async fn question_count_map(pool: &PgPool) -> Result<HashMap<DbId, i64>, sqlx::Error> {
        let counts = Self::question_counts(pool).await?;
        Ok(counts
            .into_iter()
            .map(|c| (c.topic_id, c.question_count))
            .collect())
    }
}
