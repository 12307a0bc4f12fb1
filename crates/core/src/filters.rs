//! Verification listing filters.
//!
//! Raw query-string values are parsed into a [`VerificationFilter`] whose
//! fields are each either an active predicate or absent. Values that cannot
//! be understood (unknown status, out-of-range difficulty, non-numeric topic
//! id) degrade to "no predicate" for that field instead of failing the
//! request. The repository layer composes every active predicate with `AND`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::DbId;
use crate::verification::VerificationStatus;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel value meaning "do not filter on this field".
pub const FILTER_ALL: &str = "all";

/// Default number of verifications fetched per review batch.
pub const DEFAULT_BATCH_SIZE: i64 = 50;

/// Upper bound on a single batch.
pub const MAX_BATCH_SIZE: i64 = 500;

/// Lowest question difficulty.
pub const MIN_DIFFICULTY: i16 = 1;

/// Highest question difficulty.
pub const MAX_DIFFICULTY: i16 = 10;

// ---------------------------------------------------------------------------
// Challenge filter
// ---------------------------------------------------------------------------

/// Filter on the `challengeQuestion` metadata flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChallengeFilter {
    #[default]
    All,
    /// Only verifications flagged as challenge questions.
    Challenge,
    /// Only verifications without the flag (or with it set to anything but true).
    Regular,
}

impl ChallengeFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("challenge") => Self::Challenge,
            Some("regular") => Self::Regular,
            _ => Self::All,
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Challenge => Some("Challenge Questions"),
            Self::Regular => Some("Regular Questions"),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw params
// ---------------------------------------------------------------------------

/// Filter values as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub status: Option<String>,
    pub difficulty: Option<String>,
    pub reference_source: Option<String>,
    pub challenge_question: Option<String>,
    /// Comma-separated topic ids, e.g. `11,12,21`.
    pub topic_ids: Option<String>,
    pub limit: Option<i64>,
}

// ---------------------------------------------------------------------------
// Parsed filter
// ---------------------------------------------------------------------------

/// A fully parsed listing filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFilter {
    pub status: Option<VerificationStatus>,
    pub difficulty: Option<i16>,
    /// Case-insensitive substring of `reference_source`.
    pub reference_source: Option<String>,
    pub challenge: ChallengeFilter,
    /// Sorted, de-duplicated topic ids. Empty means no topic predicate.
    pub topic_ids: Vec<DbId>,
    pub limit: i64,
}

impl Default for VerificationFilter {
    fn default() -> Self {
        Self {
            status: None,
            difficulty: None,
            reference_source: None,
            challenge: ChallengeFilter::All,
            topic_ids: Vec::new(),
            limit: DEFAULT_BATCH_SIZE,
        }
    }
}

impl VerificationFilter {
    /// Parse raw params, using `default_limit` when no limit is given.
    pub fn from_params(params: &FilterParams, default_limit: i64) -> Self {
        Self {
            status: parse_status_filter(params.status.as_deref()),
            difficulty: parse_difficulty_filter(params.difficulty.as_deref()),
            reference_source: parse_reference_source(params.reference_source.as_deref()),
            challenge: ChallengeFilter::parse(params.challenge_question.as_deref()),
            topic_ids: parse_topic_ids(params.topic_ids.as_deref()),
            limit: clamp_batch_size(params.limit, default_limit),
        }
    }

    /// Number of active predicates.
    pub fn predicate_count(&self) -> usize {
        [
            self.status.is_some(),
            self.difficulty.is_some(),
            self.reference_source.is_some(),
            self.challenge != ChallengeFilter::All,
            !self.topic_ids.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Human-readable labels for each active predicate, keyed by filter name.
    pub fn active_labels(&self) -> BTreeMap<&'static str, String> {
        let mut labels = BTreeMap::new();

        if let Some(difficulty) = self.difficulty {
            labels.insert("difficulty", format!("Difficulty {difficulty}"));
        }
        if let Some(status) = self.status {
            labels.insert("status", status.label());
        }
        if let Some(ref source) = self.reference_source {
            labels.insert("reference_source", format!("Source: {source}"));
        }
        if let Some(label) = self.challenge.label() {
            labels.insert("challenge_question", label.to_string());
        }
        if !self.topic_ids.is_empty() {
            let n = self.topic_ids.len();
            let plural = if n == 1 { "" } else { "s" };
            labels.insert("topics", format!("{n} topic{plural} selected"));
        }

        labels
    }
}

// ---------------------------------------------------------------------------
// Field parsers
// ---------------------------------------------------------------------------

/// `all`, empty or unknown values mean no status predicate.
pub fn parse_status_filter(value: Option<&str>) -> Option<VerificationStatus> {
    let value = value.map(str::trim).filter(|v| !v.is_empty() && *v != FILTER_ALL)?;
    VerificationStatus::parse(value).ok()
}

/// `all`, empty, non-numeric or out-of-range values mean no difficulty predicate.
pub fn parse_difficulty_filter(value: Option<&str>) -> Option<i16> {
    let value = value.map(str::trim).filter(|v| !v.is_empty() && *v != FILTER_ALL)?;
    value
        .parse::<i16>()
        .ok()
        .filter(|d| (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(d))
}

/// Blank values mean no reference source predicate.
pub fn parse_reference_source(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a comma-separated id list, skipping tokens that are not integers.
pub fn parse_topic_ids(value: Option<&str>) -> Vec<DbId> {
    let mut ids: Vec<DbId> = value
        .unwrap_or_default()
        .split(',')
        .filter_map(|token| token.trim().parse::<DbId>().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Clamp a requested batch size to `1..=MAX_BATCH_SIZE`.
pub fn clamp_batch_size(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_BATCH_SIZE)
}

/// Build an `ILIKE` pattern matching `needle` as a literal substring.
///
/// `%`, `_` and `\` in the needle are escaped so they match themselves.
pub fn substring_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
