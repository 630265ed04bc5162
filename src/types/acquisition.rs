//! Acquisition types for the circulation engine
//!
//! Acquisitions are requests to add material to the catalog. They are
//! tracked independently of items: accepting one does not create an item,
//! and no foreign keys tie the two together.

use serde::{Deserialize, Serialize};

/// Type alias for acquisition identifiers
pub type AcquisitionId = u32;

/// A request to acquire an item for the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acquisition {
    /// Unique acquisition identifier
    pub id: AcquisitionId,
    /// Title of the requested item (required at creation)
    pub title: String,
    /// Author, artist or other creator
    pub creator: String,
    /// Publisher of the requested item
    pub publisher: String,
    /// Free-text processing status (e.g. "requested", "ordered")
    pub status: String,
    /// Free-text notes
    pub notes: String,
}

/// Payload for creating an acquisition
///
/// `title` is required; the remaining fields default to empty strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AcquisitionDraft {
    /// Title of the requested item (required)
    pub title: String,
    /// Author, artist or other creator
    #[serde(default)]
    pub creator: String,
    /// Publisher of the requested item
    #[serde(default)]
    pub publisher: String,
    /// Free-text processing status
    #[serde(default)]
    pub status: String,
    /// Free-text notes
    #[serde(default)]
    pub notes: String,
}
