//! Client-side tour catalog
//!
//! The catalog is the collection of tours known to the current user/context.
//! Editor sessions are drawn from it and saved back into it, and it is the
//! only component that talks to the persistence and identity collaborators,
//! at session boundaries (load/save/delete). Between those boundaries it is
//! plain in-memory state.

use crate::core::services::{PersistenceService, ServiceError};
use crate::data::{Analytics, Step, Tour, TourId};
use crate::editor::{EditorOptions, EditorSession};
use crate::identity::{IdentityProvider, UserId};

/// In-memory collection of tours with stable iteration order.
#[derive(Debug, Clone, Default)]
pub struct TourCatalog {
    tours: Vec<Tour>,
}

impl TourCatalog {
    /// An empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog seeded with the demo fixture tours, used when no backing
    /// store is configured.
    pub fn with_sample_tours() -> Self {
        let mut getting_started = Tour::new("Getting Started with Tourforge");
        getting_started.id = TourId::from("tour-1");
        getting_started.is_public = true;
        getting_started.analytics = Analytics { views: 15, shares: 3 };
        getting_started.add_step(Step::new(
            "Welcome to your dashboard! This is where you can manage all of your product tours.",
            "https://placehold.co/800x600/2563EB/ffffff?text=Dashboard+View",
        ));
        getting_started.add_step(Step::new(
            "Click \"Create New Tour\" to start building your first guided experience.",
            "https://placehold.co/800x600/2563EB/ffffff?text=Create+Tour+Button",
        ));
        getting_started.add_step(Step::new(
            "Each tour is made of steps, which can include screenshots and descriptive text.",
            "https://placehold.co/800x600/2563EB/ffffff?text=Tour+Editor",
        ));

        let mut advanced = Tour::new("Advanced Settings Overview");
        advanced.id = TourId::from("tour-2");
        advanced.is_public = false;
        advanced.analytics = Analytics { views: 8, shares: 1 };
        advanced.add_step(Step::new(
            "Our advanced settings allow you to customize your tour's appearance and behavior.",
            "https://placehold.co/800x600/2563EB/ffffff?text=Advanced+Settings",
        ));
        advanced.add_step(Step::new(
            "You can change the theme from dark to light mode to match your website.",
            "https://placehold.co/800x600/2563EB/ffffff?text=Theme+Settings",
        ));

        Self {
            tours: vec![getting_started, advanced],
        }
    }

    /// All tours currently known, in stable order
    pub fn list(&self) -> &[Tour] {
        &self.tours
    }

    pub fn get(&self, id: &TourId) -> Option<&Tour> {
        self.tours.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// Replace a tour in place when its id is already present (iteration
    /// position unchanged), append otherwise.
    pub fn upsert(&mut self, tour: Tour) {
        match self.tours.iter_mut().find(|t| t.id == tour.id) {
            Some(existing) => *existing = tour,
            None => self.tours.push(tour),
        }
    }

    /// Remove a tour; a no-op when the id is unknown.
    pub fn remove(&mut self, id: &TourId) {
        self.tours.retain(|t| &t.id != id);
    }

    /// Total view count across all tours, summed freshly on each call
    pub fn total_views(&self) -> u64 {
        self.tours.iter().map(|t| t.analytics.views).sum()
    }

    /// Total share count across all tours, summed freshly on each call
    pub fn total_shares(&self) -> u64 {
        self.tours.iter().map(|t| t.analytics.shares).sum()
    }

    /// Open an editor session over one of the catalog's tours. The session
    /// works on its own copy; the catalog is untouched until the saved
    /// aggregate comes back through [`upsert`](Self::upsert) or
    /// [`persist`](Self::persist).
    pub fn edit(&self, id: &TourId, options: EditorOptions) -> Option<EditorSession> {
        self.get(id)
            .cloned()
            .map(|tour| EditorSession::open(Some(tour), options))
    }

    /// Replace the catalog contents with the owner's persisted tours.
    pub fn load(
        &mut self,
        service: &dyn PersistenceService,
        owner: &UserId,
    ) -> Result<(), ServiceError> {
        self.tours = service.list(owner)?;
        Ok(())
    }

    /// Load the tours of whoever is currently signed in. Signed-out sessions
    /// are reported, not treated as an empty user.
    pub fn load_for(
        &mut self,
        service: &dyn PersistenceService,
        identity: &dyn IdentityProvider,
    ) -> Result<(), ServiceError> {
        let owner = identity
            .current_user()
            .ok_or_else(|| ServiceError::InvalidInput("No active session".to_string()))?;
        self.load(service, &owner)
    }

    /// Hand a saved tour to the persistence collaborator and fold the
    /// canonical result back into the catalog.
    ///
    /// The catalog mediates create-vs-update: a tour it does not know yet
    /// goes down the create path (the collaborator assigns the canonical
    /// id), a known one is an update keeping its id.
    pub fn persist(
        &mut self,
        service: &dyn PersistenceService,
        owner: &UserId,
        tour: Tour,
    ) -> Result<Tour, ServiceError> {
        let mut payload = tour.to_persistable();
        if self.get(&tour.id).is_none() {
            payload.id = None;
        }
        let saved = service.save(owner, payload)?;
        self.upsert(saved.clone());
        Ok(saved)
    }

    /// Delete a tour at the persistence collaborator and, when it reported a
    /// match, drop the local copy too. Unlike step-level edits this surfaces
    /// the miss to the caller.
    pub fn delete(
        &mut self,
        service: &dyn PersistenceService,
        owner: &UserId,
        id: &TourId,
    ) -> Result<bool, ServiceError> {
        let deleted = service.delete(id, owner)?;
        if deleted {
            self.remove(id);
        }
        Ok(deleted)
    }
}
