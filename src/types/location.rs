//! Location types for the circulation engine
//!
//! Locations are the physical places items live (a shelf, a room, a branch).
//! They are plain records: items point at them through an optional foreign
//! key, and deleting a location never deletes the items stored there.

use serde::{Deserialize, Serialize};

/// Type alias for location identifiers
pub type LocationId = u32;

/// A physical storage location for catalog items
///
/// Locations own nothing: the item-to-location reference is a non-cascading
/// back-reference, so a location can be removed while its items remain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Unique location identifier
    pub id: LocationId,
    /// Human-readable location name
    pub name: String,
    /// Free-text details (directions, shelf codes, etc.)
    pub details: String,
}

/// Payload for creating a location
///
/// `name` is required; a request body without it fails deserialization and
/// is rejected as malformed. `details` defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationDraft {
    /// Human-readable location name (required)
    pub name: String,
    /// Free-text details
    #[serde(default)]
    pub details: String,
}
