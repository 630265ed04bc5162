//! Circulation orchestration for concurrent callers
//!
//! This module provides the `SharedCirculationEngine`, which coordinates the
//! thread-safe stores behind the same [`CirculationApi`] surface as the
//! synchronous engine.
//!
//! # Architecture
//!
//! ```text
//! SharedCirculationEngine (Clone)
//!     ├── Arc<SharedCatalog>           (items + locations)
//!     ├── Arc<SharedBorrowerRegistry>  (borrowers, unique names)
//!     ├── Arc<SharedAcquisitionStore>  (acquisition requests)
//!     └── Arc<SharedLoanLedger>        (loans + open-loan index)
//! ```
//!
//! # Concurrency
//!
//! The engine is cheap to clone and safe to use from many tasks at once.
//! Checkout goes through [`SharedLoanLedger::try_loan`], which re-checks
//! availability under the open-loan index's entry lock, so concurrent
//! checkouts of one item produce exactly one open loan; the losers see a
//! per-item failure. There is no cross-item batch staging in this flavor:
//! each item commits as it is processed, which keeps batches on different
//! items fully parallel.

use std::sync::Arc;

use crate::core::shared::{
    SharedAcquisitionStore, SharedBorrowerRegistry, SharedCatalog, SharedLoanLedger,
};
use crate::core::traits::CirculationApi;
use crate::types::{
    Acquisition, AcquisitionDraft, AcquisitionId, BatchOutcome, Borrower, BorrowerDraft,
    BorrowerId, CheckinRequest, Checkout, CheckoutRequest, InventoryError, Item, ItemDraft,
    ItemId, ItemPatch, ItemView, LoanPolicy, Location, LocationDraft, LocationId,
};
use chrono::Utc;

/// Thread-safe circulation engine
///
/// Clone it freely; all clones share the same stores through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SharedCirculationEngine {
    /// Item and location records
    catalog: Arc<SharedCatalog>,
    /// Borrower records
    borrowers: Arc<SharedBorrowerRegistry>,
    /// Acquisition request records
    acquisitions: Arc<SharedAcquisitionStore>,
    /// Checkout history and the open-loan index
    ledger: Arc<SharedLoanLedger>,
    /// Loan period used to derive due dates
    policy: LoanPolicy,
}

impl SharedCirculationEngine {
    /// Create a new engine with the default loan policy (14 days)
    pub fn new() -> Self {
        Self::with_policy(LoanPolicy::default())
    }

    /// Create a new engine with a custom loan policy
    pub fn with_policy(policy: LoanPolicy) -> Self {
        SharedCirculationEngine {
            catalog: Arc::new(SharedCatalog::new()),
            borrowers: Arc::new(SharedBorrowerRegistry::new()),
            acquisitions: Arc::new(SharedAcquisitionStore::new()),
            ledger: Arc::new(SharedLoanLedger::new()),
            policy,
        }
    }

    /// The loan policy this engine stamps on new checkouts
    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    /// Process a checkout batch
    ///
    /// Same contract as the synchronous engine, but each item commits as it
    /// is processed: the availability check and the loan insertion happen
    /// atomically per item inside the ledger.
    pub fn checkout(&self, request: &CheckoutRequest) -> Result<BatchOutcome, InventoryError> {
        if request.items.is_empty() {
            return Err(InventoryError::malformed("checkout batch contains no items"));
        }
        if !self.borrowers.contains(request.borrower_id) {
            return Err(InventoryError::not_found("borrower", request.borrower_id));
        }

        let now = Utc::now();
        let mut outcome = BatchOutcome::default();

        for &item_id in &request.items {
            let lent = self.catalog.contains_item(item_id)
                && self
                    .ledger
                    .try_loan(item_id, request.borrower_id, now, self.policy)
                    .is_some();

            if lent {
                outcome.succeeded.push(item_id);
            } else {
                tracing::warn!(item_id, "checkout failed: item missing or not available");
                outcome.failed.push(item_id);
            }
        }

        tracing::debug!(
            borrower_id = request.borrower_id,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "checkout batch processed"
        );
        Ok(outcome)
    }

    /// Process a checkin batch
    ///
    /// Each return commits as it is processed; all returns in the batch
    /// share one timestamp.
    pub fn checkin(&self, request: &CheckinRequest) -> Result<BatchOutcome, InventoryError> {
        let now = Utc::now();
        let mut outcome = BatchOutcome::default();

        for &item_id in &request.items {
            if self.ledger.close_loan(item_id, now).is_some() {
                outcome.succeeded.push(item_id);
            } else {
                tracing::warn!(item_id, "checkin failed: no open loan");
                outcome.failed.push(item_id);
            }
        }

        tracing::debug!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "checkin batch processed"
        );
        Ok(outcome)
    }
}

impl CirculationApi for SharedCirculationEngine {
    fn list_items(&self) -> Vec<ItemView> {
        self.catalog
            .all_items()
            .into_iter()
            .map(|item| {
                let available = self.ledger.is_available(item.id);
                item.view(available)
            })
            .collect()
    }

    fn get_item(&self, id: ItemId) -> Result<ItemView, InventoryError> {
        self.catalog
            .get_item(id)
            .map(|item| {
                let available = self.ledger.is_available(item.id);
                item.view(available)
            })
            .ok_or_else(|| InventoryError::not_found("item", id))
    }

    fn create_item(&mut self, draft: ItemDraft) -> ItemView {
        self.catalog.add_item(draft).view(true)
    }

    fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> Result<ItemView, InventoryError> {
        let available = self.ledger.is_available(id);
        self.catalog
            .update_item(id, patch)
            .map(|item| item.view(available))
            .ok_or_else(|| InventoryError::not_found("item", id))
    }

    fn delete_item(&mut self, id: ItemId) -> Result<Item, InventoryError> {
        let item = self
            .catalog
            .remove_item(id)
            .ok_or_else(|| InventoryError::not_found("item", id))?;
        let removed = self.ledger.remove_by_item(id);
        tracing::debug!(item_id = id, loans_removed = removed, "item deleted");
        Ok(item)
    }

    fn list_locations(&self) -> Vec<Location> {
        self.catalog.all_locations()
    }

    fn get_location(&self, id: LocationId) -> Result<Location, InventoryError> {
        self.catalog
            .get_location(id)
            .ok_or_else(|| InventoryError::not_found("location", id))
    }

    fn create_location(&mut self, draft: LocationDraft) -> Location {
        self.catalog.add_location(draft)
    }

    fn delete_location(&mut self, id: LocationId) -> Result<Location, InventoryError> {
        self.catalog
            .remove_location(id)
            .ok_or_else(|| InventoryError::not_found("location", id))
    }

    fn list_borrowers(&self) -> Vec<Borrower> {
        self.borrowers.all()
    }

    fn get_borrower(&self, id: BorrowerId) -> Result<Borrower, InventoryError> {
        self.borrowers
            .get(id)
            .ok_or_else(|| InventoryError::not_found("borrower", id))
    }

    fn create_borrower(&mut self, draft: BorrowerDraft) -> Result<Borrower, InventoryError> {
        self.borrowers.add(draft)
    }

    fn delete_borrower(&mut self, id: BorrowerId) -> Result<Borrower, InventoryError> {
        let borrower = self
            .borrowers
            .remove(id)
            .ok_or_else(|| InventoryError::not_found("borrower", id))?;
        let removed = self.ledger.remove_by_borrower(id);
        tracing::debug!(borrower_id = id, loans_removed = removed, "borrower deleted");
        Ok(borrower)
    }

    fn list_acquisitions(&self) -> Vec<Acquisition> {
        self.acquisitions.all()
    }

    fn get_acquisition(&self, id: AcquisitionId) -> Result<Acquisition, InventoryError> {
        self.acquisitions
            .get(id)
            .ok_or_else(|| InventoryError::not_found("acquisition", id))
    }

    fn create_acquisition(&mut self, draft: AcquisitionDraft) -> Acquisition {
        self.acquisitions.add(draft)
    }

    fn delete_acquisition(&mut self, id: AcquisitionId) -> Result<Acquisition, InventoryError> {
        self.acquisitions
            .remove(id)
            .ok_or_else(|| InventoryError::not_found("acquisition", id))
    }

    fn is_available(&self, item_id: ItemId) -> bool {
        self.ledger.is_available(item_id)
    }

    fn open_loan(&self, item_id: ItemId) -> Option<Checkout> {
        self.ledger.open_loan(item_id)
    }

    fn loans_for_borrower(&self, borrower_id: BorrowerId) -> Vec<Checkout> {
        self.ledger.loans_for_borrower(borrower_id)
    }

    fn item_history(&self, item_id: ItemId) -> Vec<Checkout> {
        self.ledger.history_for_item(item_id)
    }

    fn checkout(&mut self, request: &CheckoutRequest) -> Result<BatchOutcome, InventoryError> {
        SharedCirculationEngine::checkout(self, request)
    }

    fn checkin(&mut self, request: &CheckinRequest) -> Result<BatchOutcome, InventoryError> {
        SharedCirculationEngine::checkin(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;

    fn add_item(engine: &SharedCirculationEngine, title: &str) -> ItemId {
        engine
            .catalog
            .add_item(ItemDraft {
                title: title.to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: None,
                notes: String::new(),
            })
            .id
    }

    fn add_borrower(engine: &SharedCirculationEngine, name: &str) -> BorrowerId {
        engine
            .borrowers
            .add(BorrowerDraft {
                name: name.to_string(),
                standing: String::new(),
            })
            .unwrap()
            .id
    }

    #[test]
    fn test_checkout_and_checkin_round_trip() {
        let engine = SharedCirculationEngine::new();
        let item = add_item(&engine, "T");
        let borrower = add_borrower(&engine, "Ada");

        let outcome = engine
            .checkout(&CheckoutRequest {
                borrower_id: borrower,
                items: vec![item],
            })
            .unwrap();
        assert_eq!(outcome.succeeded, vec![item]);
        assert!(!engine.is_available(item));

        let outcome = engine.checkin(&CheckinRequest { items: vec![item] }).unwrap();
        assert_eq!(outcome.succeeded, vec![item]);
        assert!(engine.is_available(item));
    }

    #[test]
    fn test_checkout_unknown_borrower_processes_nothing() {
        let engine = SharedCirculationEngine::new();
        let item = add_item(&engine, "T");

        let result = engine.checkout(&CheckoutRequest {
            borrower_id: 99,
            items: vec![item],
        });

        assert!(matches!(result, Err(InventoryError::NotFound { .. })));
        assert!(engine.is_available(item));
    }

    #[test]
    fn test_duplicate_item_in_batch_fails_second_occurrence() {
        let engine = SharedCirculationEngine::new();
        let item = add_item(&engine, "T");
        let borrower = add_borrower(&engine, "Ada");

        let outcome = engine
            .checkout(&CheckoutRequest {
                borrower_id: borrower,
                items: vec![item, item],
            })
            .unwrap();

        assert_eq!(outcome.succeeded, vec![item]);
        assert_eq!(outcome.failed, vec![item]);
        assert_eq!(engine.item_history(item).len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_checkouts_single_winner() {
        let engine = SharedCirculationEngine::new();
        let item = add_item(&engine, "contested");
        let borrowers: Vec<BorrowerId> = (0..8)
            .map(|n| add_borrower(&engine, &format!("borrower-{}", n)))
            .collect();

        let tasks = borrowers.into_iter().map(|borrower| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .checkout(&CheckoutRequest {
                        borrower_id: borrower,
                        items: vec![item],
                    })
                    .unwrap()
            })
        });

        let outcomes = join_all(tasks).await;
        let wins = outcomes
            .into_iter()
            .map(|joined| joined.unwrap())
            .filter(|outcome| outcome.succeeded == vec![item])
            .count();

        assert_eq!(wins, 1);
        assert!(!engine.is_available(item));
        assert_eq!(engine.item_history(item).len(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_batches_on_distinct_items_all_succeed() {
        let engine = SharedCirculationEngine::new();
        let items: Vec<ItemId> = (0..8)
            .map(|n| add_item(&engine, &format!("item-{}", n)))
            .collect();
        let borrowers: Vec<BorrowerId> = (0..8)
            .map(|n| add_borrower(&engine, &format!("borrower-{}", n)))
            .collect();

        let tasks = items.iter().zip(&borrowers).map(|(&item, &borrower)| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .checkout(&CheckoutRequest {
                        borrower_id: borrower,
                        items: vec![item],
                    })
                    .unwrap()
            })
        });

        for joined in join_all(tasks).await {
            let outcome = joined.unwrap();
            assert_eq!(outcome.failed, Vec::<ItemId>::new());
        }
        for item in items {
            assert!(!engine.is_available(item));
        }
    }

    #[test]
    fn test_delete_borrower_cascades_and_frees_items() {
        let engine = SharedCirculationEngine::new();
        let item = add_item(&engine, "T");
        let borrower = add_borrower(&engine, "Ada");
        engine
            .checkout(&CheckoutRequest {
                borrower_id: borrower,
                items: vec![item],
            })
            .unwrap();

        let mut api = engine.clone();
        api.delete_borrower(borrower).unwrap();

        assert!(engine.loans_for_borrower(borrower).is_empty());
        assert!(engine.is_available(item));
    }
}
