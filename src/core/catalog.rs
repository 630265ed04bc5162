//! Catalog management module
//!
//! This module provides the `Catalog` struct which maintains the item and
//! location records and the relationship between them.
//!
//! The Catalog is responsible for:
//! - Assigning item and location ids (monotonic, starting at 1, never reused)
//! - Item CRUD including partial updates via [`ItemPatch`]
//! - Location CRUD
//! - Clearing item location references when a location is removed
//!
//! Loan state lives elsewhere (the loan ledger); the catalog knows nothing
//! about availability.

use crate::types::{Item, ItemDraft, ItemId, ItemPatch, Location, LocationDraft, LocationId};
use std::collections::HashMap;

/// Stores item and location records
///
/// The Catalog maintains in-memory maps keyed by id. Listing methods return
/// records sorted by id so output is deterministic.
pub struct Catalog {
    /// Map of item ids to item records
    items: HashMap<ItemId, Item>,
    /// Map of location ids to location records
    locations: HashMap<LocationId, Location>,
    /// Next item id to assign
    next_item_id: ItemId,
    /// Next location id to assign
    next_location_id: LocationId,
}

impl Catalog {
    /// Create a new Catalog with no items or locations
    pub fn new() -> Self {
        Catalog {
            items: HashMap::new(),
            locations: HashMap::new(),
            next_item_id: 1,
            next_location_id: 1,
        }
    }

    /// Add an item from a creation draft
    ///
    /// Assigns the next item id. The draft's location reference is stored
    /// as-is; the catalog does not require it to resolve to a known location.
    ///
    /// # Arguments
    ///
    /// * `draft` - The validated creation payload
    ///
    /// # Returns
    ///
    /// A reference to the newly stored item
    pub fn add_item(&mut self, draft: ItemDraft) -> &Item {
        let id = self.next_item_id;
        self.next_item_id += 1;

        let item = Item {
            id,
            title: draft.title,
            creator: draft.creator,
            publisher: draft.publisher,
            location_id: draft.location_id,
            notes: draft.notes,
        };

        self.items.entry(id).or_insert(item)
    }

    /// Look up an item by id
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Check whether an item exists
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Apply a partial update to an item
    ///
    /// The patch has already passed type validation (it could not have been
    /// constructed otherwise), so this either applies every provided field
    /// or does nothing because the item is absent.
    ///
    /// # Arguments
    ///
    /// * `id` - The item to update
    /// * `patch` - Fields to overwrite
    ///
    /// # Returns
    ///
    /// A reference to the updated item, or `None` if no item has this id
    pub fn update_item(&mut self, id: ItemId, patch: &ItemPatch) -> Option<&Item> {
        let item = self.items.get_mut(&id)?;
        patch.apply_to(item);
        Some(item)
    }

    /// Remove an item by id
    ///
    /// # Returns
    ///
    /// The removed item, or `None` if no item has this id. Cascading the
    /// item's loan history is the engine's job, not the catalog's.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    /// Get all items sorted by id
    pub fn all_items(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Add a location from a creation draft
    ///
    /// Assigns the next location id.
    pub fn add_location(&mut self, draft: LocationDraft) -> &Location {
        let id = self.next_location_id;
        self.next_location_id += 1;

        let location = Location {
            id,
            name: draft.name,
            details: draft.details,
        };

        self.locations.entry(id).or_insert(location)
    }

    /// Look up a location by id
    pub fn get_location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    /// Remove a location by id
    ///
    /// Items stored at the location are kept (the back-reference does not
    /// cascade); their location reference is cleared instead.
    ///
    /// # Returns
    ///
    /// The removed location, or `None` if no location has this id
    pub fn remove_location(&mut self, id: LocationId) -> Option<Location> {
        let removed = self.locations.remove(&id)?;

        for item in self.items.values_mut() {
            if item.location_id == Some(id) {
                item.location_id = None;
            }
        }

        Some(removed)
    }

    /// Get all locations sorted by id
    pub fn all_locations(&self) -> Vec<&Location> {
        let mut locations: Vec<&Location> = self.locations.values().collect();
        locations.sort_by_key(|location| location.id);
        locations
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
