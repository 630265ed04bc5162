//! Acquisition store module
//!
//! Plain record storage for acquisition requests. Acquisitions have no
//! relationships, so this is the simplest store in the crate.

use crate::types::{Acquisition, AcquisitionDraft, AcquisitionId};
use std::collections::HashMap;

/// Stores acquisition request records
pub struct AcquisitionStore {
    /// Map of acquisition ids to records
    acquisitions: HashMap<AcquisitionId, Acquisition>,
    /// Next acquisition id to assign
    next_id: AcquisitionId,
}

impl AcquisitionStore {
    /// Create a new AcquisitionStore with no records
    pub fn new() -> Self {
        AcquisitionStore {
            acquisitions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Add an acquisition from a creation draft
    pub fn add(&mut self, draft: AcquisitionDraft) -> &Acquisition {
        let id = self.next_id;
        self.next_id += 1;

        let acquisition = Acquisition {
            id,
            title: draft.title,
            creator: draft.creator,
            publisher: draft.publisher,
            status: draft.status,
            notes: draft.notes,
        };

        self.acquisitions.entry(id).or_insert(acquisition)
    }

    /// Look up an acquisition by id
    pub fn get(&self, id: AcquisitionId) -> Option<&Acquisition> {
        self.acquisitions.get(&id)
    }

    /// Remove an acquisition by id
    pub fn remove(&mut self, id: AcquisitionId) -> Option<Acquisition> {
        self.acquisitions.remove(&id)
    }

    /// Get all acquisitions sorted by id
    pub fn all(&self) -> Vec<&Acquisition> {
        let mut acquisitions: Vec<&Acquisition> = self.acquisitions.values().collect();
        acquisitions.sort_by_key(|acquisition| acquisition.id);
        acquisitions
    }
}

impl Default for AcquisitionStore {
    fn default() -> Self {
        Self::new()
    }
}
