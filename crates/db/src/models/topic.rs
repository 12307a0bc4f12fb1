//! Topic taxonomy models.

use qverify_core::topics::TopicNode;
use qverify_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `topic` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub subject_id: DbId,
    pub parent_topic_id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub created_at: Timestamp,
}

impl From<Topic> for TopicNode {
    fn from(topic: Topic) -> Self {
        TopicNode {
            id: topic.id,
            title: topic.title,
            slug: topic.slug,
            subject_id: topic.subject_id,
            parent_topic_id: topic.parent_topic_id,
            child_topics: Vec::new(),
        }
    }
}

/// Number of distinct questions classified under a topic.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopicQuestionCount {
    pub topic_id: DbId,
    pub question_count: i64,
}
