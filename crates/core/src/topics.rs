//! Topic taxonomy helpers.
//!
//! Topics form a two-level tree: top-level topics own zero or more
//! subtopics. Selecting every subtopic of a topic is equivalent to
//! selecting the topic itself.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::types::DbId;

/// A topic with its subtopics attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicNode {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub subject_id: DbId,
    pub parent_topic_id: Option<DbId>,
    pub child_topics: Vec<TopicNode>,
}

impl TopicNode {
    /// Ids of this topic's direct subtopics.
    pub fn subtopic_ids(&self) -> Vec<DbId> {
        self.child_topics.iter().map(|t| t.id).collect()
    }
}

/// Assemble flat topic rows into a two-level tree.
///
/// Input order is preserved at both levels. A subtopic whose parent is not
/// present in `flat` is promoted to the top level so it stays reachable.
pub fn build_topic_tree(flat: Vec<TopicNode>) -> Vec<TopicNode> {
    let top_level_ids: BTreeSet<DbId> = flat
        .iter()
        .filter(|t| t.parent_topic_id.is_none())
        .map(|t| t.id)
        .collect();

    let mut roots: Vec<TopicNode> = Vec::new();
    let mut children: HashMap<DbId, Vec<TopicNode>> = HashMap::new();

    for mut topic in flat {
        topic.child_topics.clear();
        match topic.parent_topic_id {
            Some(parent) if top_level_ids.contains(&parent) => {
                children.entry(parent).or_default().push(topic);
            }
            _ => roots.push(topic),
        }
    }

    for root in &mut roots {
        if let Some(kids) = children.remove(&root.id) {
            root.child_topics = kids;
        }
    }

    roots
}

/// Whether every subtopic of `topic` is in `selected`.
///
/// A topic without subtopics is never "fully selected".
pub fn all_subtopics_selected(topic: &TopicNode, selected: &BTreeSet<DbId>) -> bool {
    !topic.child_topics.is_empty()
        && topic.child_topics.iter().all(|t| selected.contains(&t.id))
}

/// Expand a subtopic selection into the ids a classification predicate
/// should match.
///
/// The result is sorted and de-duplicated. For each topic whose subtopics
/// are all selected, the topic's own id is added so questions classified
/// directly under the topic match too.
pub fn normalize_selection(tree: &[TopicNode], selected: &[DbId]) -> Vec<DbId> {
    let mut ids: BTreeSet<DbId> = selected.iter().copied().collect();

    for topic in tree {
        if all_subtopics_selected(topic, &ids) {
            ids.insert(topic.id);
        }
    }

    ids.into_iter().collect()
}

/// Question count shown for a topic.
///
/// `counts` is expected to hold rolled-up counts, so a topic's own entry
/// already covers its subtopics and is used when present. Without one, the
/// subtopic counts are summed.
pub fn topic_total_count(topic: &TopicNode, counts: &HashMap<DbId, i64>) -> i64 {
    match counts.get(&topic.id) {
        Some(&count) => count,
        None => topic
            .child_topics
            .iter()
            .map(|t| counts.get(&t.id).copied().unwrap_or(0))
            .sum(),
    }
}

/// Drop top-level topics with no questions.
pub fn retain_non_empty(tree: Vec<TopicNode>, counts: &HashMap<DbId, i64>) -> Vec<TopicNode> {
    tree.into_iter()
        .filter(|topic| topic_total_count(topic, counts) > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: DbId, parent: Option<DbId>) -> TopicNode {
        TopicNode {
            id,
            title: format!("Topic {id}"),
            slug: format!("topic-{id}"),
            subject_id: 454,
            parent_topic_id: parent,
            child_topics: Vec::new(),
        }
    }

    fn sample_tree() -> Vec<TopicNode> {
        build_topic_tree(vec![
            topic(1, None),
            topic(11, Some(1)),
            topic(12, Some(1)),
            topic(2, None),
            topic(21, Some(2)),
            topic(22, Some(2)),
            topic(3, None),
        ])
    }

    #[test]
    fn tree_groups_subtopics_under_parents() {
        let tree = sample_tree();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree[0].subtopic_ids(), vec![11, 12]);
        assert_eq!(tree[1].subtopic_ids(), vec![21, 22]);
        assert!(tree[2].child_topics.is_empty());
    }

    #[test]
    fn orphaned_subtopic_is_promoted() {
        let tree = build_topic_tree(vec![topic(1, None), topic(41, Some(4))]);
        let ids: Vec<DbId> = tree.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 41]);
    }

    #[test]
    fn partial_selection_is_not_expanded() {
        assert_eq!(normalize_selection(&sample_tree(), &[11]), vec![11]);
    }

    #[test]
    fn full_subtopic_selection_adds_parent() {
        assert_eq!(
            normalize_selection(&sample_tree(), &[12, 11, 21]),
            vec![1, 11, 12, 21]
        );
    }

    #[test]
    fn leaf_topic_never_counts_as_fully_selected() {
        let tree = sample_tree();
        let selected: BTreeSet<DbId> = [3].into_iter().collect();
        assert!(!all_subtopics_selected(&tree[2], &selected));
    }

    #[test]
    fn total_count_sums_subtopics_without_own_entry() {
        let tree = sample_tree();
        let counts: HashMap<DbId, i64> = [(11, 2), (12, 3), (3, 4)].into_iter().collect();

        assert_eq!(topic_total_count(&tree[0], &counts), 5);
        assert_eq!(topic_total_count(&tree[1], &counts), 0);
        assert_eq!(topic_total_count(&tree[2], &counts), 4);
    }

    #[test]
    fn total_count_prefers_rolled_up_entry() {
        let tree = sample_tree();
        let counts: HashMap<DbId, i64> = [(1, 1), (11, 0), (12, 0)].into_iter().collect();

        assert_eq!(topic_total_count(&tree[0], &counts), 1);
    }

    #[test]
    fn topic_with_direct_questions_stays_visible() {
        let counts: HashMap<DbId, i64> = [(2, 3), (21, 0), (22, 0)].into_iter().collect();
        let visible = retain_non_empty(sample_tree(), &counts);
        let ids: Vec<DbId> = visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn empty_topics_are_hidden() {
        let counts: HashMap<DbId, i64> = [(11, 1)].into_iter().collect();
        let visible = retain_non_empty(sample_tree(), &counts);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }
}
