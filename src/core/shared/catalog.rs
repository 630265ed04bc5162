//! Thread-safe catalog
//!
//! Concurrent twin of the synchronous catalog: item and location records in
//! `DashMap`s, ids assigned from atomic counters. Listing methods clone and
//! sort so output stays deterministic under concurrent mutation.

use crate::types::{Item, ItemDraft, ItemId, ItemPatch, Location, LocationDraft, LocationId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe store for item and location records
#[derive(Debug)]
pub struct SharedCatalog {
    /// Concurrent map of item ids to item records
    items: DashMap<ItemId, Item>,
    /// Concurrent map of location ids to location records
    locations: DashMap<LocationId, Location>,
    /// Next item id to assign
    next_item_id: AtomicU32,
    /// Next location id to assign
    next_location_id: AtomicU32,
}

impl SharedCatalog {
    /// Create a new SharedCatalog with no items or locations
    pub fn new() -> Self {
        SharedCatalog {
            items: DashMap::new(),
            locations: DashMap::new(),
            next_item_id: AtomicU32::new(1),
            next_location_id: AtomicU32::new(1),
        }
    }

    /// Add an item from a creation draft
    ///
    /// # Returns
    ///
    /// A clone of the newly stored item
    pub fn add_item(&self, draft: ItemDraft) -> Item {
        let id = self.next_item_id.fetch_add(1, Ordering::Relaxed);

        let item = Item {
            id,
            title: draft.title,
            creator: draft.creator,
            publisher: draft.publisher,
            location_id: draft.location_id,
            notes: draft.notes,
        };

        self.items.insert(id, item.clone());
        item
    }

    /// Look up an item by id
    pub fn get_item(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).map(|item| item.clone())
    }

    /// Check whether an item exists
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Apply a partial update to an item under its entry lock
    ///
    /// # Returns
    ///
    /// A clone of the updated item, or `None` if no item has this id
    pub fn update_item(&self, id: ItemId, patch: &ItemPatch) -> Option<Item> {
        let mut item = self.items.get_mut(&id)?;
        patch.apply_to(item.value_mut());
        Some(item.clone())
    }

    /// Remove an item by id
    pub fn remove_item(&self, id: ItemId) -> Option<Item> {
        self.items.remove(&id).map(|(_, item)| item)
    }

    /// Get all items sorted by id
    pub fn all_items(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self.items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Add a location from a creation draft
    pub fn add_location(&self, draft: LocationDraft) -> Location {
        let id = self.next_location_id.fetch_add(1, Ordering::Relaxed);

        let location = Location {
            id,
            name: draft.name,
            details: draft.details,
        };

        self.locations.insert(id, location.clone());
        location
    }

    /// Look up a location by id
    pub fn get_location(&self, id: LocationId) -> Option<Location> {
        self.locations.get(&id).map(|location| location.clone())
    }

    /// Remove a location by id, clearing item references to it
    pub fn remove_location(&self, id: LocationId) -> Option<Location> {
        let (_, removed) = self.locations.remove(&id)?;

        for mut item in self.items.iter_mut() {
            if item.location_id == Some(id) {
                item.location_id = None;
            }
        }

        Some(removed)
    }

    /// Get all locations sorted by id
    pub fn all_locations(&self) -> Vec<Location> {
        let mut locations: Vec<Location> = self
            .locations
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        locations.sort_by_key(|location| location.id);
        locations
    }
}

impl Default for SharedCatalog {
    fn default() -> Self {
        Self::new()
    }
}
