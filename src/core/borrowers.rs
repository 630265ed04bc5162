//! Borrower registry module
//!
//! This module provides the `BorrowerRegistry` struct which maintains the
//! borrower records and enforces the name uniqueness invariant.

use crate::types::{Borrower, BorrowerDraft, BorrowerId, InventoryError};
use std::collections::HashMap;

/// Stores borrower records
///
/// Names are unique: adding a borrower whose name collides with an existing
/// record is rejected. Listing returns records sorted by id.
pub struct BorrowerRegistry {
    /// Map of borrower ids to borrower records
    borrowers: HashMap<BorrowerId, Borrower>,
    /// Next borrower id to assign
    next_id: BorrowerId,
}

impl BorrowerRegistry {
    /// Create a new BorrowerRegistry with no borrowers
    pub fn new() -> Self {
        BorrowerRegistry {
            borrowers: HashMap::new(),
            next_id: 1,
        }
    }

    /// Add a borrower from a creation draft
    ///
    /// # Arguments
    ///
    /// * `draft` - The validated creation payload
    ///
    /// # Returns
    ///
    /// * `Ok(&Borrower)` - The newly stored borrower
    /// * `Err(InventoryError)` - If the name is already registered
    pub fn add(&mut self, draft: BorrowerDraft) -> Result<&Borrower, InventoryError> {
        if self.borrowers.values().any(|b| b.name == draft.name) {
            return Err(InventoryError::malformed(format!(
                "borrower name '{}' is already registered",
                draft.name
            )));
        }

        let id = self.next_id;
        self.next_id += 1;

        let borrower = Borrower {
            id,
            name: draft.name,
            standing: draft.standing,
        };

        Ok(self.borrowers.entry(id).or_insert(borrower))
    }

    /// Look up a borrower by id
    pub fn get(&self, id: BorrowerId) -> Option<&Borrower> {
        self.borrowers.get(&id)
    }

    /// Check whether a borrower exists
    pub fn contains(&self, id: BorrowerId) -> bool {
        self.borrowers.contains_key(&id)
    }

    /// Remove a borrower by id
    ///
    /// # Returns
    ///
    /// The removed borrower, or `None` if no borrower has this id. Cascading
    /// the borrower's loan history is the engine's job.
    pub fn remove(&mut self, id: BorrowerId) -> Option<Borrower> {
        self.borrowers.remove(&id)
    }

    /// Get all borrowers sorted by id
    pub fn all(&self) -> Vec<&Borrower> {
        let mut borrowers: Vec<&Borrower> = self.borrowers.values().collect();
        borrowers.sort_by_key(|borrower| borrower.id);
        borrowers
    }
}

impl Default for BorrowerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> BorrowerDraft {
        BorrowerDraft {
            name: name.to_string(),
            standing: String::new(),
        }
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut registry = BorrowerRegistry::new();
        let first = registry.add(draft("Ada")).unwrap().id;
        let second = registry.add(draft("Grace")).unwrap().id;
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = BorrowerRegistry::new();
        registry.add(draft("Ada")).unwrap();

        let result = registry.add(draft("Ada"));
        assert!(matches!(
            result,
            Err(InventoryError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn test_name_is_free_after_removal() {
        let mut registry = BorrowerRegistry::new();
        let id = registry.add(draft("Ada")).unwrap().id;
        registry.remove(id);
        assert!(registry.add(draft("Ada")).is_ok());
    }

    #[test]
    fn test_get_missing_borrower_returns_none() {
        let registry = BorrowerRegistry::new();
        assert!(registry.get(1).is_none());
        assert!(!registry.contains(1));
    }

    #[test]
    fn test_all_sorted_by_id() {
        let mut registry = BorrowerRegistry::new();
        for name in ["A", "B", "C"] {
            registry.add(draft(name)).unwrap();
        }
        let ids: Vec<BorrowerId> = registry.all().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
