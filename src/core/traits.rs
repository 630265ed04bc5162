//! Core trait for the circulation API surface
//!
//! This module defines the `CirculationApi` trait, the one seam both engine
//! flavors implement: the synchronous `CirculationEngine` (HashMap stores,
//! exclusive access) and the `SharedCirculationEngine` (DashMap stores,
//! shareable across tasks). Wire dispatch and the end-to-end tests are
//! written against this trait so the flavors stay interchangeable.

use crate::types::{
    Acquisition, AcquisitionDraft, AcquisitionId, BatchOutcome, Borrower, BorrowerDraft,
    BorrowerId, CheckinRequest, Checkout, CheckoutRequest, InventoryError, Item, ItemDraft,
    ItemId, ItemPatch, ItemView, Location, LocationDraft, LocationId,
};

/// The full operation surface of the circulation engine
///
/// Reads take `&self`; mutations take `&mut self`. The shared engine's
/// inherent methods all take `&self` (its stores synchronize internally),
/// so its trait impl simply delegates.
pub trait CirculationApi {
    // --- items ---

    /// All catalog items with derived availability, sorted by id
    fn list_items(&self) -> Vec<ItemView>;

    /// One item with derived availability
    fn get_item(&self, id: ItemId) -> Result<ItemView, InventoryError>;

    /// Create an item from a validated draft
    fn create_item(&mut self, draft: ItemDraft) -> ItemView;

    /// Apply a partial update to an item
    fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> Result<ItemView, InventoryError>;

    /// Delete an item, cascading its loan history
    fn delete_item(&mut self, id: ItemId) -> Result<Item, InventoryError>;

    // --- locations ---

    /// All locations, sorted by id
    fn list_locations(&self) -> Vec<Location>;

    /// One location by id
    fn get_location(&self, id: LocationId) -> Result<Location, InventoryError>;

    /// Create a location from a validated draft
    fn create_location(&mut self, draft: LocationDraft) -> Location;

    /// Delete a location, clearing item references to it
    fn delete_location(&mut self, id: LocationId) -> Result<Location, InventoryError>;

    // --- borrowers ---

    /// All borrowers, sorted by id
    fn list_borrowers(&self) -> Vec<Borrower>;

    /// One borrower by id
    fn get_borrower(&self, id: BorrowerId) -> Result<Borrower, InventoryError>;

    /// Create a borrower; fails if the name is already registered
    fn create_borrower(&mut self, draft: BorrowerDraft) -> Result<Borrower, InventoryError>;

    /// Delete a borrower, cascading their loan history
    fn delete_borrower(&mut self, id: BorrowerId) -> Result<Borrower, InventoryError>;

    // --- acquisitions ---

    /// All acquisition requests, sorted by id
    fn list_acquisitions(&self) -> Vec<Acquisition>;

    /// One acquisition request by id
    fn get_acquisition(&self, id: AcquisitionId) -> Result<Acquisition, InventoryError>;

    /// Create an acquisition request from a validated draft
    fn create_acquisition(&mut self, draft: AcquisitionDraft) -> Acquisition;

    /// Delete an acquisition request
    fn delete_acquisition(&mut self, id: AcquisitionId) -> Result<Acquisition, InventoryError>;

    // --- loan queries (engine surface, not wire-exposed) ---

    /// True iff the item has no open loan
    fn is_available(&self, item_id: ItemId) -> bool;

    /// The open loan for an item, if any
    fn open_loan(&self, item_id: ItemId) -> Option<Checkout>;

    /// All loans held by a borrower, open and closed, sorted by checkout id
    fn loans_for_borrower(&self, borrower_id: BorrowerId) -> Vec<Checkout>;

    /// Full loan history of an item, sorted by checkout id
    fn item_history(&self, item_id: ItemId) -> Vec<Checkout>;

    // --- workflows ---

    /// Lend a batch of items to one borrower
    ///
    /// Fails outright only for an empty batch (malformed) or an unknown
    /// borrower (not found); per-item failures land in the outcome's
    /// `failed` list.
    fn checkout(&mut self, request: &CheckoutRequest) -> Result<BatchOutcome, InventoryError>;

    /// Return a batch of items
    ///
    /// Never fails outright; items with no open loan land in `failed`.
    fn checkin(&mut self, request: &CheckinRequest) -> Result<BatchOutcome, InventoryError>;
}
