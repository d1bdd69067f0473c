//! Editor session: the mutation surface over one tour's working copy.
//!
//! A session is ephemeral. It seeds a working copy from an existing tour (or
//! starts blank for creation), takes edits against that copy, runs the
//! simulated screen-recording flow, and finally produces a tour aggregate on
//! save or is discarded on cancel. The catalog's copy of the tour is never
//! touched until the saved aggregate is handed back.

use std::sync::{Arc, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::data::{Analytics, Step, Tour, TourId};
use crate::identity::UserId;
use crate::player::PlaybackCursor;

/// Annotation given to manually added steps
const MANUAL_STEP_TEXT: &str = "Add your text here.";
/// Annotation given to steps produced by the simulated recording
const RECORDED_STEP_TEXT: &str = "This is a recorded step.";

fn placeholder_image(position: usize) -> String {
    format!(
        "https://placehold.co/800x600/2563EB/ffffff?text=Screenshot+{}",
        position
    )
}

/// Recoverable editor-local failures, surfaced as user-facing messages.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    /// Previewing a tour with zero steps would leave the playback cursor
    /// without a valid position.
    #[error("cannot preview a tour with no steps")]
    EmptyTour,

    /// A recording is already in flight and cannot be interrupted.
    #[error("a recording is already in progress")]
    RecordingInProgress,

    /// The requested action is not available while the preview overlay is
    /// open.
    #[error("close the preview before continuing")]
    PreviewActive,
}

/// Editor state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Recording,
    Previewing,
}

/// Tunables for an editor session.
#[derive(Debug, Clone)]
pub struct EditorOptions {
    /// How long the simulated screen capture runs before its step lands
    pub recording_delay: Duration,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            recording_delay: Duration::from_secs(2),
        }
    }
}

/// The session's private working copy, shared with the recording task.
struct WorkingCopy {
    tour_id: Option<TourId>,
    title: String,
    steps: Vec<Step>,
    analytics: Analytics,
    is_public: bool,
    created_at: Option<DateTime<Utc>>,
    owner_id: Option<UserId>,
    mode: EditorMode,
}

/// One editing session over a single tour.
pub struct EditorSession {
    copy: Arc<Mutex<WorkingCopy>>,
    /// In-flight recording timer; aborted whenever the session ends
    recording_task: Option<JoinHandle<()>>,
    options: EditorOptions,
}

impl EditorSession {
    /// Open a session over an existing tour, or a blank one for creation.
    pub fn open(tour: Option<Tour>, options: EditorOptions) -> Self {
        let copy = match tour {
            Some(tour) => WorkingCopy {
                tour_id: Some(tour.id),
                title: tour.title,
                steps: tour.steps,
                analytics: tour.analytics,
                is_public: tour.is_public,
                created_at: Some(tour.created_at),
                owner_id: tour.owner_id,
                mode: EditorMode::Idle,
            },
            None => WorkingCopy {
                tour_id: None,
                title: String::new(),
                steps: Vec::new(),
                analytics: Analytics::default(),
                is_public: false,
                created_at: None,
                owner_id: None,
                mode: EditorMode::Idle,
            },
        };

        Self {
            copy: Arc::new(Mutex::new(copy)),
            recording_task: None,
            options,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.copy.lock().mode
    }

    pub fn is_recording(&self) -> bool {
        self.mode() == EditorMode::Recording
    }

    pub fn title(&self) -> String {
        self.copy.lock().title.clone()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.copy.lock().title = title.into();
    }

    /// Snapshot of the working copy's current steps
    pub fn steps(&self) -> Vec<Step> {
        self.copy.lock().steps.clone()
    }

    pub fn step_count(&self) -> usize {
        self.copy.lock().steps.len()
    }

    /// Whether saving would create a new tour rather than update one
    pub fn is_create(&self) -> bool {
        self.copy.lock().tour_id.is_none()
    }

    /// Append a manually authored step with placeholder content. Returns the
    /// new step's id.
    pub fn add_step(&mut self) -> Uuid {
        let mut copy = self.copy.lock();
        let position = copy.steps.len() + 1;
        let step = Step::new(MANUAL_STEP_TEXT, placeholder_image(position));
        let id = step.id;
        copy.steps.push(step);
        id
    }

    /// Replace the annotation of one step. Unknown ids are silently ignored.
    pub fn update_step_text(&mut self, step_id: Uuid, text: impl Into<String>) {
        let mut copy = self.copy.lock();
        if let Some(step) = copy.steps.iter_mut().find(|s| s.id == step_id) {
            step.text = text.into();
        }
    }

    /// Remove one step, keeping the survivors' relative order. Unknown ids
    /// are silently ignored.
    pub fn remove_step(&mut self, step_id: Uuid) {
        self.copy.lock().steps.retain(|s| s.id != step_id);
    }

    /// Start the simulated screen recording.
    ///
    /// Schedules a single deferred completion that appends a recorded step
    /// after the configured delay. An in-flight recording cannot be
    /// interrupted by user input; it ends either by elapsing or by the
    /// session itself ending.
    pub fn start_recording(&mut self) -> Result<(), EditorError> {
        {
            let mut copy = self.copy.lock();
            match copy.mode {
                EditorMode::Recording => return Err(EditorError::RecordingInProgress),
                EditorMode::Previewing => return Err(EditorError::PreviewActive),
                EditorMode::Idle => {}
            }
            copy.mode = EditorMode::Recording;
        }

        tracing::debug!("Screen recording started");

        // The task holds only a weak reference: a completion that fires
        // after the session is gone upgrades to None and is swallowed.
        let weak = Arc::downgrade(&self.copy);
        let delay = self.options.recording_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            complete_recording(weak);
        });
        self.recording_task = Some(task);

        Ok(())
    }

    /// Enter preview mode, yielding a playback cursor over a snapshot of the
    /// current steps. Edits made after the preview returns operate on the
    /// live working copy, not the snapshot.
    pub fn start_preview(&mut self) -> Result<PlaybackCursor, EditorError> {
        let mut copy = self.copy.lock();
        match copy.mode {
            EditorMode::Recording => return Err(EditorError::RecordingInProgress),
            EditorMode::Previewing => return Err(EditorError::PreviewActive),
            EditorMode::Idle => {}
        }

        let cursor =
            PlaybackCursor::over(copy.steps.clone()).map_err(|_| EditorError::EmptyTour)?;
        copy.mode = EditorMode::Previewing;
        Ok(cursor)
    }

    /// Leave preview mode ("back" from the player). A no-op outside preview.
    pub fn end_preview(&mut self) {
        let mut copy = self.copy.lock();
        if copy.mode == EditorMode::Previewing {
            copy.mode = EditorMode::Idle;
        }
    }

    /// Produce the tour aggregate and end the session.
    ///
    /// With no tour id this is a create: fresh id, zeroed analytics, private
    /// visibility, current timestamp. With an id it is an update preserving
    /// id, analytics, visibility and creation time. Any in-flight recording
    /// is severed; its completion will not land anywhere. The session must
    /// be discarded afterwards; preview has to be closed first.
    pub fn save(&mut self) -> Result<Tour, EditorError> {
        if let Some(task) = self.recording_task.take() {
            task.abort();
        }

        let mut copy = self.copy.lock();
        if copy.mode == EditorMode::Previewing {
            return Err(EditorError::PreviewActive);
        }
        copy.mode = EditorMode::Idle;

        let tour = match copy.tour_id.clone() {
            None => Tour {
                id: TourId::generate(),
                title: copy.title.clone(),
                steps: copy.steps.clone(),
                analytics: Analytics::default(),
                is_public: false,
                created_at: Utc::now(),
                owner_id: copy.owner_id.clone(),
            },
            Some(id) => Tour {
                id,
                title: copy.title.clone(),
                steps: copy.steps.clone(),
                analytics: copy.analytics,
                is_public: copy.is_public,
                created_at: copy.created_at.unwrap_or_else(Utc::now),
                owner_id: copy.owner_id.clone(),
            },
        };

        tracing::debug!(tour_id = %tour.id, "Editor session saved");
        Ok(tour)
    }

    /// Discard the working copy without persisting anything.
    pub fn cancel(self) {
        tracing::debug!("Editor session cancelled");
        // Drop handles the timer teardown
    }
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        if let Some(task) = self.recording_task.take() {
            task.abort();
        }
    }
}

/// Deferred completion of the recording timer.
///
/// Guarded twice against firing into released state: the session aborts the
/// task handle on teardown, and the weak upgrade fails once the session is
/// gone. A session that merely stopped recording (saved and rearmed) is
/// caught by the mode check.
fn complete_recording(weak: Weak<Mutex<WorkingCopy>>) {
    let Some(copy) = weak.upgrade() else {
        return;
    };
    let mut copy = copy.lock();
    if copy.mode != EditorMode::Recording {
        return;
    }

    let position = copy.steps.len() + 1;
    copy.steps.push(Step::new(RECORDED_STEP_TEXT, placeholder_image(position)));
    copy.mode = EditorMode::Idle;
    tracing::debug!("Recording finished and a step was added");
}
