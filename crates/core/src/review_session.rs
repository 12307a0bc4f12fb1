//! Review queue navigation.
//!
//! A [`ReviewSession`] walks the batch captured when the reviewer opened a
//! verification. It never re-fetches, so a decision that changes an item's
//! status does not reshuffle the order mid-review.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::RecordId;

/// Result of [`ReviewSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given verification.
    Moved(RecordId),
    /// The current verification is the last in the batch.
    BatchEnd,
    /// No selection or empty batch; nothing happened.
    Idle,
}

/// Serializable view of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub current_id: Option<RecordId>,
    /// 1-based position of `current_id`, or 0 when unset.
    pub index: usize,
    pub total: usize,
    pub batch_exhausted: bool,
}

/// Navigation state for one reviewer.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    batch: Vec<RecordId>,
    current_id: Option<RecordId>,
    batch_exhausted: bool,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter detail mode on `id`, capturing `batch` as the queue.
    ///
    /// `id` must be a member of `batch`.
    pub fn select_for_review(
        &mut self,
        batch: Vec<RecordId>,
        id: RecordId,
    ) -> Result<(), CoreError> {
        if !batch.contains(&id) {
            return Err(CoreError::Validation(format!(
                "Verification {id} is not part of the selected batch"
            )));
        }

        self.batch = batch;
        self.current_id = Some(id);
        self.batch_exhausted = false;
        Ok(())
    }

    /// Move to the next verification in the batch.
    pub fn advance(&mut self) -> Advance {
        let Some(current) = self.current_id else {
            return Advance::Idle;
        };
        let Some(index) = self.batch.iter().position(|id| *id == current) else {
            return Advance::Idle;
        };

        match self.batch.get(index + 1) {
            Some(&next) => {
                self.current_id = Some(next);
                self.batch_exhausted = false;
                Advance::Moved(next)
            }
            None => {
                self.batch_exhausted = true;
                Advance::BatchEnd
            }
        }
    }

    /// 1-based `(index, total)` of the current selection, `(0, 0)` if unset.
    pub fn position(&self) -> (usize, usize) {
        let Some(current) = self.current_id else {
            return (0, 0);
        };
        match self.batch.iter().position(|id| *id == current) {
            Some(index) => (index + 1, self.batch.len()),
            None => (0, 0),
        }
    }

    /// Leave detail mode.
    ///
    /// The batch itself is kept only until the next selection.
    pub fn return_to_list(&mut self) {
        self.current_id = None;
        self.batch_exhausted = false;
    }

    pub fn current_id(&self) -> Option<RecordId> {
        self.current_id
    }

    pub fn batch_exhausted(&self) -> bool {
        self.batch_exhausted
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (index, total) = self.position();
        SessionSnapshot {
            current_id: self.current_id,
            index,
            total,
            batch_exhausted: self.batch_exhausted,
        }
    }
}
