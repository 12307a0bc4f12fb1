//! Verification statuses and decision rules.
//!
//! A verification is moved between statuses by one of three reviewer
//! decisions. Every decision is reachable from every status; the only
//! invalid input is a status string outside [`VerificationStatus::ALL`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::RecordId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Metadata key flagging a verification as a challenge question.
pub const CHALLENGE_QUESTION_KEY: &str = "challengeQuestion";

/// Delay in milliseconds a client waits after a successful decision before
/// advancing to the next verification in its batch.
pub const AUTO_ADVANCE_DELAY_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Review status of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerificationStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Approved; the owning question is published.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Needs an image before it can be judged.
    NeedImage,
}

impl VerificationStatus {
    /// Every status, in display order.
    pub const ALL: [VerificationStatus; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::NeedImage,
    ];

    /// Return the string stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::NeedImage => "needImage",
        }
    }

    /// Parse a stored status string.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid status '{value}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }

    /// Title-cased label shown in filter summaries (`"NeedImage"` stays camel).
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Which audit list a decision appends the reviewer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditList {
    Approvers,
    Rejecters,
}

/// A reviewer decision applied to a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject,
    NeedsImage,
}

impl Transition {
    /// Status the verification ends up in.
    pub fn target_status(&self) -> VerificationStatus {
        match self {
            Self::Approve => VerificationStatus::Approved,
            Self::Reject => VerificationStatus::Rejected,
            Self::NeedsImage => VerificationStatus::NeedImage,
        }
    }

    /// Audit list the reviewer is recorded in, if any.
    pub fn audit_list(&self) -> Option<AuditList> {
        match self {
            Self::Approve => Some(AuditList::Approvers),
            Self::Reject => Some(AuditList::Rejecters),
            Self::NeedsImage => None,
        }
    }

    /// Whether the decision takes the owning question out of staging.
    pub fn publishes_question(&self) -> bool {
        matches!(self, Self::Approve)
    }

    /// Message reported when the decision cannot be stored.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Approve => "Failed to approve question",
            Self::Reject => "Failed to reject question",
            Self::NeedsImage => "Failed to mark question as needs image",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::NeedsImage => "needs_image",
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when a decision overrides an earlier, different decision.
///
/// Re-deciding is allowed; callers only use this for logging.
pub fn is_redecision(current: VerificationStatus, transition: Transition) -> bool {
    current != VerificationStatus::Pending && current != transition.target_status()
}

/// Append `reviewer` to an audit list unless it is already present.
///
/// Returns `true` when the list changed.
pub fn append_reviewer(list: &mut Vec<RecordId>, reviewer: RecordId) -> bool {
    if list.contains(&reviewer) {
        false
    } else {
        list.push(reviewer);
        true
    }
}

/// Whether verification metadata marks a challenge question.
///
/// Mirrors the `metadata->>'challengeQuestion' = 'true'` SQL predicate: a
/// JSON `true` or the string `"true"` counts, anything else is regular.
pub fn is_challenge_question(metadata: Option<&serde_json::Value>) -> bool {
    match metadata.and_then(|m| m.get(CHALLENGE_QUESTION_KEY)) {
        Some(serde_json::Value::Bool(flag)) => *flag,
        Some(serde_json::Value::String(text)) => text == "true",
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a decision could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionFailure {
    /// The verification id does not resolve.
    NotFound,
    /// The store rejected or could not complete the update.
    StoreUnavailable,
}

/// Result of applying a decision. Ordinary failures are values, not errors,
/// so callers can revert optimistic state and offer a retry.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome<T> {
    Applied(T),
    Failed {
        kind: TransitionFailure,
        message: String,
    },
}

impl<T> TransitionOutcome<T> {
    pub fn not_found(id: RecordId) -> Self {
        Self::Failed {
            kind: TransitionFailure::NotFound,
            message: format!("Verification {id} not found"),
        }
    }

    pub fn store_unavailable(transition: Transition) -> Self {
        Self::Failed {
            kind: TransitionFailure::StoreUnavailable,
            message: transition.failure_message().to_string(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}
