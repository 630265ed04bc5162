//! Circulation workflow orchestration
//!
//! This module provides the `CirculationEngine`, the synchronous engine that
//! coordinates the catalog, borrower registry, acquisition store and loan
//! ledger behind the [`CirculationApi`] surface.
//!
//! The engine enforces the workflow rules:
//! - Checkout batches validate the borrower once, then check availability
//!   per item and stage loans into a unit of work committed at batch end
//! - Checkin batches close open loans, committed the same way
//! - Deleting an item or borrower cascades into the loan ledger
//! - Item reads carry availability derived from the ledger at read time
//!
//! Exclusive `&mut self` access makes every call trivially serializable;
//! the availability check and the loan insertion can never interleave with
//! another batch.

use crate::core::acquisitions::AcquisitionStore;
use crate::core::borrowers::BorrowerRegistry;
use crate::core::catalog::Catalog;
use crate::core::ledger::{LoanLedger, UnitOfWork};
use crate::core::traits::CirculationApi;
use crate::types::{
    Acquisition, AcquisitionDraft, AcquisitionId, BatchOutcome, Borrower, BorrowerDraft,
    BorrowerId, CheckinRequest, Checkout, CheckoutRequest, InventoryError, Item, ItemDraft,
    ItemId, ItemPatch, ItemView, LoanPolicy, Location, LocationDraft, LocationId,
};
use chrono::Utc;

/// Synchronous circulation engine
///
/// Owns all record stores and processes one API call at a time. This is the
/// flavor to embed when callers already serialize access; the shared flavor
/// in [`crate::core::shared`] covers concurrent callers.
pub struct CirculationEngine {
    /// Item and location records
    catalog: Catalog,
    /// Borrower records
    borrowers: BorrowerRegistry,
    /// Acquisition request records
    acquisitions: AcquisitionStore,
    /// Checkout history and the open-loan index
    ledger: LoanLedger,
    /// Loan period used to derive due dates
    policy: LoanPolicy,
}

impl CirculationEngine {
    /// Create a new engine with the default loan policy (14 days)
    pub fn new() -> Self {
        Self::with_policy(LoanPolicy::default())
    }

    /// Create a new engine with a custom loan policy
    pub fn with_policy(policy: LoanPolicy) -> Self {
        CirculationEngine {
            catalog: Catalog::new(),
            borrowers: BorrowerRegistry::new(),
            acquisitions: AcquisitionStore::new(),
            ledger: LoanLedger::new(),
            policy,
        }
    }

    /// The loan policy this engine stamps on new checkouts
    pub fn policy(&self) -> LoanPolicy {
        self.policy
    }

    /// Project an item through the ledger's availability check
    fn view_item(&self, item: &Item) -> ItemView {
        item.view(self.ledger.is_available(item.id))
    }

    /// Process a checkout batch
    ///
    /// Validates the request shape and the borrower, then walks the items in
    /// request order. An unknown item, an item with an open loan, or an item
    /// already staged earlier in this batch fails; everything else is staged
    /// as a new loan. Staged loans commit once at batch end.
    ///
    /// # Arguments
    ///
    /// * `request` - The validated batch payload
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOutcome)` - Per-item success and failure lists
    /// * `Err(InventoryError)` - Empty batch (malformed) or unknown borrower
    ///   (not found); no items are processed
    pub fn checkout(&mut self, request: &CheckoutRequest) -> Result<BatchOutcome, InventoryError> {
        if request.items.is_empty() {
            return Err(InventoryError::malformed("checkout batch contains no items"));
        }
        if !self.borrowers.contains(request.borrower_id) {
            return Err(InventoryError::not_found("borrower", request.borrower_id));
        }

        let mut unit = UnitOfWork::begin(Utc::now(), self.policy);
        let mut outcome = BatchOutcome::default();

        for &item_id in &request.items {
            let lendable = self.catalog.contains_item(item_id)
                && self.ledger.is_available(item_id)
                && !unit.has_pending_loan(item_id);

            if lendable {
                unit.stage_loan(item_id, request.borrower_id);
                outcome.succeeded.push(item_id);
            } else {
                tracing::warn!(item_id, "checkout failed: item missing or not available");
                outcome.failed.push(item_id);
            }
        }

        self.ledger.commit(unit);
        tracing::debug!(
            borrower_id = request.borrower_id,
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "checkout batch committed"
        );
        Ok(outcome)
    }

    /// Process a checkin batch
    ///
    /// Walks the items in request order. An item with no open loan, or whose
    /// open loan is already staged for return earlier in this batch, fails;
    /// everything else is staged. Staged returns commit once at batch end,
    /// all stamped with the same return timestamp.
    pub fn checkin(&mut self, request: &CheckinRequest) -> Result<BatchOutcome, InventoryError> {
        let mut unit = UnitOfWork::begin(Utc::now(), self.policy);
        let mut outcome = BatchOutcome::default();

        for &item_id in &request.items {
            match self.ledger.open_loan(item_id) {
                Some(loan) if !unit.has_pending_return(loan.id) => {
                    unit.stage_return(loan.id);
                    outcome.succeeded.push(item_id);
                }
                _ => {
                    tracing::warn!(item_id, "checkin failed: no open loan");
                    outcome.failed.push(item_id);
                }
            }
        }

        self.ledger.commit(unit);
        tracing::debug!(
            succeeded = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "checkin batch committed"
        );
        Ok(outcome)
    }
}

impl Default for CirculationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CirculationApi for CirculationEngine {
    fn list_items(&self) -> Vec<ItemView> {
        self.catalog
            .all_items()
            .into_iter()
            .map(|item| self.view_item(item))
            .collect()
    }

    fn get_item(&self, id: ItemId) -> Result<ItemView, InventoryError> {
        self.catalog
            .get_item(id)
            .map(|item| self.view_item(item))
            .ok_or_else(|| InventoryError::not_found("item", id))
    }

    fn create_item(&mut self, draft: ItemDraft) -> ItemView {
        // a freshly created item has no loan history, so it is available
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
        self.catalog.all_locations().into_iter().cloned().collect()
    }

    fn get_location(&self, id: LocationId) -> Result<Location, InventoryError> {
        self.catalog
            .get_location(id)
            .cloned()
            .ok_or_else(|| InventoryError::not_found("location", id))
    }

    fn create_location(&mut self, draft: LocationDraft) -> Location {
        self.catalog.add_location(draft).clone()
    }

    fn delete_location(&mut self, id: LocationId) -> Result<Location, InventoryError> {
        self.catalog
            .remove_location(id)
            .ok_or_else(|| InventoryError::not_found("location", id))
    }

    fn list_borrowers(&self) -> Vec<Borrower> {
        self.borrowers.all().into_iter().cloned().collect()
    }

    fn get_borrower(&self, id: BorrowerId) -> Result<Borrower, InventoryError> {
        self.borrowers
            .get(id)
            .cloned()
            .ok_or_else(|| InventoryError::not_found("borrower", id))
    }

    fn create_borrower(&mut self, draft: BorrowerDraft) -> Result<Borrower, InventoryError> {
        self.borrowers.add(draft).cloned()
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
        self.acquisitions.all().into_iter().cloned().collect()
    }

    fn get_acquisition(&self, id: AcquisitionId) -> Result<Acquisition, InventoryError> {
        self.acquisitions
            .get(id)
            .cloned()
            .ok_or_else(|| InventoryError::not_found("acquisition", id))
    }

    fn create_acquisition(&mut self, draft: AcquisitionDraft) -> Acquisition {
        self.acquisitions.add(draft).clone()
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
        self.ledger.open_loan(item_id).cloned()
    }

    fn loans_for_borrower(&self, borrower_id: BorrowerId) -> Vec<Checkout> {
        self.ledger
            .loans_for_borrower(borrower_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn item_history(&self, item_id: ItemId) -> Vec<Checkout> {
        self.ledger
            .history_for_item(item_id)
            .into_iter()
            .cloned()
            .collect()
    }

    fn checkout(&mut self, request: &CheckoutRequest) -> Result<BatchOutcome, InventoryError> {
        CirculationEngine::checkout(self, request)
    }

    fn checkin(&mut self, request: &CheckinRequest) -> Result<BatchOutcome, InventoryError> {
        CirculationEngine::checkin(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn engine_with_item(title: &str) -> (CirculationEngine, ItemId) {
        let mut engine = CirculationEngine::new();
        let id = engine
            .create_item(ItemDraft {
                title: title.to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: None,
                notes: String::new(),
            })
            .id;
        (engine, id)
    }

    fn add_borrower(engine: &mut CirculationEngine, name: &str) -> BorrowerId {
        engine
            .create_borrower(BorrowerDraft {
                name: name.to_string(),
                standing: String::new(),
            })
            .unwrap()
            .id
    }

    fn checkout_one(engine: &mut CirculationEngine, borrower_id: BorrowerId, item_id: ItemId) {
        let outcome = engine
            .checkout(&CheckoutRequest {
                borrower_id,
                items: vec![item_id],
            })
            .unwrap();
        assert_eq!(outcome.succeeded, vec![item_id]);
    }

    #[test]
    fn test_new_item_is_available() {
        let (engine, item) = engine_with_item("T");
        assert!(engine.is_available(item));
        assert!(engine.get_item(item).unwrap().available);
    }

    #[test]
    fn test_create_item_round_trip_with_defaults() {
        let (engine, item) = engine_with_item("T");
        let view = engine.get_item(item).unwrap();
        assert_eq!(view.title, "T");
        assert_eq!(view.notes, "");
        assert!(view.available);
    }

    #[test]
    fn test_checkout_mixed_batch() {
        let (mut engine, available) = engine_with_item("A");
        let lent = engine
            .create_item(ItemDraft {
                title: "B".to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: None,
                notes: String::new(),
            })
            .id;
        let holder = add_borrower(&mut engine, "Ada");
        let requester = add_borrower(&mut engine, "Grace");
        checkout_one(&mut engine, holder, lent);

        let outcome = engine
            .checkout(&CheckoutRequest {
                borrower_id: requester,
                items: vec![available, lent],
            })
            .unwrap();

        assert_eq!(outcome.succeeded, vec![available]);
        assert_eq!(outcome.failed, vec![lent]);
        assert_eq!(engine.item_history(available).len(), 1);
    }

    #[test]
    fn test_checkout_stamps_due_date_from_policy() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        let loan = engine.open_loan(item).unwrap();
        assert_eq!(loan.date_due - loan.date_borrowed, Duration::days(14));
        assert_eq!(loan.borrower_id, borrower);
    }

    #[test]
    fn test_checkout_custom_policy() {
        let mut engine = CirculationEngine::with_policy(LoanPolicy::new(7));
        let item = engine
            .create_item(ItemDraft {
                title: "T".to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: None,
                notes: String::new(),
            })
            .id;
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        let loan = engine.open_loan(item).unwrap();
        assert_eq!(loan.date_due - loan.date_borrowed, Duration::days(7));
    }

    #[test]
    fn test_checkout_empty_batch_is_malformed() {
        let mut engine = CirculationEngine::new();
        let borrower = add_borrower(&mut engine, "Ada");

        let result = engine.checkout(&CheckoutRequest {
            borrower_id: borrower,
            items: vec![],
        });
        assert!(matches!(
            result,
            Err(InventoryError::MalformedRequest { .. })
        ));
    }

    #[test]
    fn test_checkout_unknown_borrower_processes_nothing() {
        let (mut engine, item) = engine_with_item("T");

        let result = engine.checkout(&CheckoutRequest {
            borrower_id: 99,
            items: vec![item],
        });

        assert!(matches!(result, Err(InventoryError::NotFound { .. })));
        assert!(engine.is_available(item));
        assert!(engine.item_history(item).is_empty());
    }

    #[test]
    fn test_checkout_unknown_item_fails_per_item() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");

        let outcome = engine
            .checkout(&CheckoutRequest {
                borrower_id: borrower,
                items: vec![99, item],
            })
            .unwrap();

        assert_eq!(outcome.succeeded, vec![item]);
        assert_eq!(outcome.failed, vec![99]);
    }

    #[test]
    fn test_duplicate_item_in_batch_fails_second_occurrence() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");

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

    #[test]
    fn test_checkin_mixed_batch() {
        let (mut engine, on_loan) = engine_with_item("A");
        let never_lent = engine
            .create_item(ItemDraft {
                title: "C".to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: None,
                notes: String::new(),
            })
            .id;
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, on_loan);

        let outcome = engine
            .checkin(&CheckinRequest {
                items: vec![on_loan, never_lent],
            })
            .unwrap();

        assert_eq!(outcome.succeeded, vec![on_loan]);
        assert_eq!(outcome.failed, vec![never_lent]);
        assert!(engine.is_available(on_loan));
        assert!(engine.item_history(on_loan)[0].date_returned.is_some());
    }

    #[test]
    fn test_checkin_empty_batch_is_noop() {
        let mut engine = CirculationEngine::new();
        let outcome = engine.checkin(&CheckinRequest { items: vec![] }).unwrap();
        assert!(outcome.succeeded.is_empty());
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn test_checkin_duplicate_item_fails_second_occurrence() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        let outcome = engine
            .checkin(&CheckinRequest {
                items: vec![item, item],
            })
            .unwrap();

        assert_eq!(outcome.succeeded, vec![item]);
        assert_eq!(outcome.failed, vec![item]);
    }

    #[test]
    fn test_returned_item_can_be_borrowed_again() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);
        engine.checkin(&CheckinRequest { items: vec![item] }).unwrap();

        checkout_one(&mut engine, borrower, item);
        assert_eq!(engine.item_history(item).len(), 2);
    }

    #[test]
    fn test_delete_item_cascades_loan_history() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        engine.delete_item(item).unwrap();

        assert!(engine.item_history(item).is_empty());
        assert!(engine.loans_for_borrower(borrower).is_empty());
        assert!(matches!(
            engine.get_item(item),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_borrower_cascades_and_frees_items() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        engine.delete_borrower(borrower).unwrap();

        assert!(engine.loans_for_borrower(borrower).is_empty());
        assert!(engine.is_available(item));
    }

    #[test]
    fn test_delete_location_clears_item_reference() {
        let mut engine = CirculationEngine::new();
        let location = engine
            .create_location(LocationDraft {
                name: "Stacks".to_string(),
                details: String::new(),
            })
            .id;
        let item = engine
            .create_item(ItemDraft {
                title: "T".to_string(),
                creator: String::new(),
                publisher: String::new(),
                location_id: Some(location),
                notes: String::new(),
            })
            .id;

        engine.delete_location(location).unwrap();

        assert_eq!(engine.get_item(item).unwrap().location_id, None);
    }

    #[test]
    fn test_update_item_keeps_absent_fields() {
        let (mut engine, item) = engine_with_item("old");
        let patch = ItemPatch {
            title: Some("new".to_string()),
            ..ItemPatch::default()
        };

        let view = engine.update_item(item, &patch).unwrap();

        assert_eq!(view.title, "new");
        assert_eq!(view.notes, "");
    }

    #[test]
    fn test_update_missing_item_is_not_found() {
        let mut engine = CirculationEngine::new();
        let result = engine.update_item(1, &ItemPatch::default());
        assert!(matches!(result, Err(InventoryError::NotFound { .. })));
    }

    #[test]
    fn test_acquisition_crud_round_trip() {
        let mut engine = CirculationEngine::new();
        let id = engine
            .create_acquisition(AcquisitionDraft {
                title: "Hyperion".to_string(),
                creator: String::new(),
                publisher: String::new(),
                status: "requested".to_string(),
                notes: String::new(),
            })
            .id;

        assert_eq!(engine.get_acquisition(id).unwrap().title, "Hyperion");
        assert_eq!(engine.list_acquisitions().len(), 1);
        engine.delete_acquisition(id).unwrap();
        assert!(engine.list_acquisitions().is_empty());
    }

    #[test]
    fn test_list_items_reports_availability() {
        let (mut engine, item) = engine_with_item("T");
        let borrower = add_borrower(&mut engine, "Ada");
        checkout_one(&mut engine, borrower, item);

        let items = engine.list_items();
        assert_eq!(items.len(), 1);
        assert!(!items[0].available);
    }
}
