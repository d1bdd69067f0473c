//! Playback cursor for tour preview and standalone playback
//!
//! The cursor owns a snapshot of a tour's steps and a bounded index over
//! them. Both the in-editor preview and a standalone player navigate through
//! this type; the only difference between the two is what they render at the
//! last step (the editor simply runs out of forward actions, a player shows
//! an explicit "End Tour" affordance), which callers derive from
//! [`Advance::Completed`] / [`PlaybackCursor::is_last`].

use thiserror::Error;

use crate::data::Step;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerError {
    /// Playback over zero steps would leave the cursor without a valid
    /// position, so construction refuses it up front.
    #[error("cannot play a tour with no steps")]
    EmptyTour,
}

/// Outcome of a forward navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to the next step
    Moved,
    /// Already at the last step; the tour is complete and the index did not
    /// change
    Completed,
}

/// Bounded position tracker over a fixed snapshot of steps.
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    steps: Vec<Step>,
    index: usize,
}

impl PlaybackCursor {
    /// Start playback at the first step.
    pub fn over(steps: Vec<Step>) -> Result<Self, PlayerError> {
        if steps.is_empty() {
            return Err(PlayerError::EmptyTour);
        }
        Ok(Self { steps, index: 0 })
    }

    /// Advance one step, or signal completion at the last step.
    pub fn next(&mut self) -> Advance {
        if self.index < self.steps.len() - 1 {
            self.index += 1;
            Advance::Moved
        } else {
            Advance::Completed
        }
    }

    /// Step back one step; a no-op at the first step.
    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// The step under the cursor. Always valid: construction rejects empty
    /// tours and navigation never leaves the bounds.
    pub fn current(&self) -> &Step {
        &self.steps[self.index]
    }

    /// Zero-based position of the cursor
    pub fn position(&self) -> usize {
        self.index
    }

    /// Number of steps in the snapshot
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index == self.steps.len() - 1
    }
}
