//! Thread-safe borrower registry
//!
//! Concurrent twin of the synchronous registry. Name uniqueness is enforced
//! through a name index: registration inserts through the index's entry
//! lock, so two concurrent registrations of the same name serialize and
//! exactly one wins.

use crate::types::{Borrower, BorrowerDraft, BorrowerId, InventoryError};
use dashmap::{DashMap, Entry};
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe store for borrower records
#[derive(Debug)]
pub struct SharedBorrowerRegistry {
    /// Concurrent map of borrower ids to records
    borrowers: DashMap<BorrowerId, Borrower>,
    /// Name index enforcing the uniqueness invariant
    by_name: DashMap<String, BorrowerId>,
    /// Next borrower id to assign
    next_id: AtomicU32,
}

impl SharedBorrowerRegistry {
    /// Create a new SharedBorrowerRegistry with no borrowers
    pub fn new() -> Self {
        SharedBorrowerRegistry {
            borrowers: DashMap::new(),
            by_name: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }

    /// Add a borrower from a creation draft
    ///
    /// # Returns
    ///
    /// * `Ok(Borrower)` - A clone of the newly stored borrower
    /// * `Err(InventoryError)` - If the name is already registered
    pub fn add(&self, draft: BorrowerDraft) -> Result<Borrower, InventoryError> {
        match self.by_name.entry(draft.name.clone()) {
            Entry::Occupied(_) => Err(InventoryError::malformed(format!(
                "borrower name '{}' is already registered",
                draft.name
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let borrower = Borrower {
                    id,
                    name: draft.name,
                    standing: draft.standing,
                };
                self.borrowers.insert(id, borrower.clone());
                slot.insert(id);
                Ok(borrower)
            }
        }
    }

    /// Look up a borrower by id
    pub fn get(&self, id: BorrowerId) -> Option<Borrower> {
        self.borrowers.get(&id).map(|borrower| borrower.clone())
    }

    /// Check whether a borrower exists
    pub fn contains(&self, id: BorrowerId) -> bool {
        self.borrowers.contains_key(&id)
    }

    /// Remove a borrower by id, freeing their name for reuse
    pub fn remove(&self, id: BorrowerId) -> Option<Borrower> {
        let (_, borrower) = self.borrowers.remove(&id)?;
        self.by_name
            .remove_if(&borrower.name, |_, owner| *owner == id);
        Some(borrower)
    }

    /// Get all borrowers sorted by id
    pub fn all(&self) -> Vec<Borrower> {
        let mut borrowers: Vec<Borrower> = self
            .borrowers
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        borrowers.sort_by_key(|borrower| borrower.id);
        borrowers
    }
}

impl Default for SharedBorrowerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
