//! Item types for the circulation engine
//!
//! This module defines the catalog item record plus the two payload shapes
//! the API accepts for it: a creation draft (required title, defaulted
//! optional fields) and a partial-update patch (every field individually
//! present or absent).
//!
//! Availability is not stored on the item. It is derived from the loan
//! ledger at read time, which is why reads produce an [`ItemView`] rather
//! than serializing the record directly.

use crate::types::location::LocationId;
use serde::{Deserialize, Serialize};

/// Type alias for catalog item identifiers
pub type ItemId = u32;

/// A lendable catalog entry
///
/// Items own their checkout history: deleting an item cascades into the
/// loan ledger. The location reference is optional and uninterpreted (a
/// dangling id is kept as-is; removing the location clears it).
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// Unique item identifier
    pub id: ItemId,
    /// Title of the item (required at creation)
    pub title: String,
    /// Author, artist or other creator
    pub creator: String,
    /// Publisher of the item
    pub publisher: String,
    /// Optional reference to the location where the item is stored
    pub location_id: Option<LocationId>,
    /// Free-text notes
    pub notes: String,
}

impl Item {
    /// Build the read-side projection of this item
    ///
    /// # Arguments
    ///
    /// * `available` - Whether the loan ledger currently holds no open loan
    ///   for this item
    pub fn view(&self, available: bool) -> ItemView {
        ItemView {
            id: self.id,
            title: self.title.clone(),
            creator: self.creator.clone(),
            publisher: self.publisher.clone(),
            location_id: self.location_id,
            notes: self.notes.clone(),
            available,
        }
    }
}

/// Read-side projection of an item, including derived availability
///
/// This is the shape every item read returns: the stored fields plus
/// `available`, recomputed from the loan ledger on every query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    /// Unique item identifier
    pub id: ItemId,
    /// Title of the item
    pub title: String,
    /// Author, artist or other creator
    pub creator: String,
    /// Publisher of the item
    pub publisher: String,
    /// Optional reference to the storage location
    pub location_id: Option<LocationId>,
    /// Free-text notes
    pub notes: String,
    /// True iff the item has no open loan
    pub available: bool,
}

/// Payload for creating an item
///
/// `title` is required; a request body without it fails deserialization and
/// is rejected as malformed. The remaining fields default to empty strings
/// (no location).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemDraft {
    /// Title of the item (required)
    pub title: String,
    /// Author, artist or other creator
    #[serde(default)]
    pub creator: String,
    /// Publisher of the item
    #[serde(default)]
    pub publisher: String,
    /// Optional reference to the storage location
    #[serde(default)]
    pub location_id: Option<LocationId>,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}

/// Partial update for an item
///
/// Each field is an explicit present/absent option, so the type system does
/// the per-field validation: a wrong-typed field (say, `location_id` given
/// as a string) fails deserialization of the whole patch, and no field is
/// applied. Absent fields are left unchanged. A patch cannot clear the
/// location reference, only repoint it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    /// Replacement title, if provided
    pub title: Option<String>,
    /// Replacement creator, if provided
    pub creator: Option<String>,
    /// Replacement publisher, if provided
    pub publisher: Option<String>,
    /// Replacement location reference, if provided
    pub location_id: Option<LocationId>,
    /// Replacement notes, if provided
    pub notes: Option<String>,
}

impl ItemPatch {
    /// Overwrite the provided fields of `item`, leaving absent ones untouched
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(title) = &self.title {
            item.title = title.clone();
        }
        if let Some(creator) = &self.creator {
            item.creator = creator.clone();
        }
        if let Some(publisher) = &self.publisher {
            item.publisher = publisher.clone();
        }
        if let Some(location_id) = self.location_id {
            item.location_id = Some(location_id);
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
    }
}
