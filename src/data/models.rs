//! Data models for tours and their steps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::UserId;

/// Opaque identifier for a persisted tour.
///
/// Tour ids are assigned by whichever side creates the aggregate (editor on
/// the client path, persistence layer on the REST create path) and are
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TourId(String);

impl TourId {
    /// Generate a fresh unique tour id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TourId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TourId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for TourId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// View and share counters for a tour.
///
/// The editing core never touches these; they are bumped by view/share
/// events outside this crate and flow through save/load unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub shares: u64,
}

/// One annotated screenshot within a tour.
///
/// A step has no lifecycle of its own; it is always owned by exactly one
/// tour. The image reference is fixed at creation (no per-step re-capture).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Unique within the owning tour, stable across edits, never reused
    pub id: Uuid,
    /// User-editable annotation
    pub text: String,
    /// URL or opaque handle to the visual content
    pub image: String,
}

impl Step {
    /// Create a new step with a fresh id
    pub fn new(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            image: image.into(),
        }
    }
}

/// An ordered sequence of annotated screenshot steps with metadata.
///
/// Step ordering is significant and preserved through every mutation: add
/// appends, delete keeps the relative order of survivors, text updates never
/// reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Assigned once, immutable afterwards
    pub id: TourId,
    /// May be empty while editing; empty titles are accepted at save
    pub title: String,
    /// Display/playback order is insertion order
    pub steps: Vec<Step>,
    pub analytics: Analytics,
    pub is_public: bool,
    /// Set once at creation
    pub created_at: DateTime<Utc>,
    /// Stamped at the persistence boundary; None for client-side fixtures
    pub owner_id: Option<UserId>,
}

impl Tour {
    /// Create a tour with a freshly generated id, zeroed analytics and the
    /// private visibility new tours get.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TourId::generate(),
            title: title.into(),
            steps: Vec::new(),
            analytics: Analytics::default(),
            is_public: false,
            created_at: Utc::now(),
            owner_id: None,
        }
    }

    /// Append a step. There is no upper bound on step count.
    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Replace the text of the step with the given id.
    ///
    /// Unknown ids are silently ignored; working-copy edits are permissive
    /// by contract, unlike tour-level operations at the persistence
    /// boundary.
    pub fn update_step_text(&mut self, step_id: Uuid, text: impl Into<String>) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.id == step_id) {
            step.text = text.into();
        }
    }

    /// Remove the step with the given id, keeping the relative order of the
    /// survivors. Unknown ids are silently ignored, so removing twice is a
    /// no-op the second time.
    pub fn remove_step(&mut self, step_id: Uuid) {
        self.steps.retain(|s| s.id != step_id);
    }

    /// The shape handed to the persistence collaborator on save.
    pub fn to_persistable(&self) -> PersistableTour {
        PersistableTour {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            steps: self.steps.clone(),
            analytics: self.analytics,
            is_public: self.is_public,
        }
    }
}

/// Save payload for the persistence collaborator.
///
/// `id` is None on the create path (the persistence layer assigns one) and
/// Some on the update path. Creation timestamp and owner are stamped by the
/// persistence layer, so they are not part of this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistableTour {
    pub id: Option<TourId>,
    pub title: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default)]
    pub is_public: bool,
}
