//! Thread-safe acquisition store
//!
//! Concurrent twin of the synchronous acquisition store; plain record
//! storage with no relationships.

use crate::types::{Acquisition, AcquisitionDraft, AcquisitionId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe store for acquisition request records
#[derive(Debug)]
pub struct SharedAcquisitionStore {
    /// Concurrent map of acquisition ids to records
    acquisitions: DashMap<AcquisitionId, Acquisition>,
    /// Next acquisition id to assign
    next_id: AtomicU32,
}

impl SharedAcquisitionStore {
    /// Create a new SharedAcquisitionStore with no records
    pub fn new() -> Self {
        SharedAcquisitionStore {
            acquisitions: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Add an acquisition from a creation draft
    pub fn add(&self, draft: AcquisitionDraft) -> Acquisition {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let acquisition = Acquisition {
            id,
            title: draft.title,
            creator: draft.creator,
            publisher: draft.publisher,
            status: draft.status,
            notes: draft.notes,
        };

        self.acquisitions.insert(id, acquisition.clone());
        acquisition
    }

    /// Look up an acquisition by id
    pub fn get(&self, id: AcquisitionId) -> Option<Acquisition> {
        self.acquisitions.get(&id).map(|acquisition| acquisition.clone())
    }

    /// Remove an acquisition by id
    pub fn remove(&self, id: AcquisitionId) -> Option<Acquisition> {
        self.acquisitions.remove(&id).map(|(_, acquisition)| acquisition)
    }

    /// Get all acquisitions sorted by id
    pub fn all(&self) -> Vec<Acquisition> {
        let mut acquisitions: Vec<Acquisition> = self
            .acquisitions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        acquisitions.sort_by_key(|acquisition| acquisition.id);
        acquisitions
    }
}

impl Default for SharedAcquisitionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_get_remove_round_trip() {
        let store = SharedAcquisitionStore::new();
        let id = store
            .add(AcquisitionDraft {
                title: "Hyperion".to_string(),
                creator: String::new(),
                publisher: String::new(),
                status: String::new(),
                notes: String::new(),
            })
            .id;

        assert_eq!(store.get(id).unwrap().title, "Hyperion");
        assert!(store.remove(id).is_some());
        assert!(store.get(id).is_none());
    }
}
