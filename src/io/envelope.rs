//! Wire envelopes for the circulation API
//!
//! This module defines the request and response shapes that cross the
//! process boundary. A request is a JSON object tagged by an `op` field;
//! its payload fields sit beside the tag. A response carries the status
//! code and a JSON body.
//!
//! Deserialization is the validation boundary: a missing required field, a
//! wrong-typed field or an unknown `op` fails to parse, and the dispatcher
//! turns that failure into a 400 response. This is what makes item updates
//! all-or-nothing — a patch with one bad field never deserializes, so no
//! field is applied.

use crate::types::{
    AcquisitionDraft, AcquisitionId, BorrowerDraft, BorrowerId, CheckinRequest, CheckoutRequest,
    InventoryError, ItemDraft, ItemId, ItemPatch, LocationDraft, LocationId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One API operation, as read off the wire
///
/// The `op` tag mirrors the HTTP surface: resource CRUD plus the two
/// workflow operations. Update variants exist for every resource so a
/// known-resource/unsupported-verb request can answer 405 instead of
/// failing to parse; only the item variant carries a payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ApiRequest {
    /// GET /items
    ListItems,
    /// GET /item/{id}
    GetItem {
        /// Item to fetch
        id: ItemId,
    },
    /// POST /items
    CreateItem {
        /// Creation payload
        #[serde(flatten)]
        draft: ItemDraft,
    },
    /// PUT /item/{id}
    UpdateItem {
        /// Item to update
        id: ItemId,
        /// Partial update payload
        #[serde(flatten)]
        patch: ItemPatch,
    },
    /// DELETE /item/{id}
    DeleteItem {
        /// Item to delete
        id: ItemId,
    },

    /// GET /locations
    ListLocations,
    /// GET /location/{id}
    GetLocation {
        /// Location to fetch
        id: LocationId,
    },
    /// POST /locations
    CreateLocation {
        /// Creation payload
        #[serde(flatten)]
        draft: LocationDraft,
    },
    /// PUT /location/{id} - always answered with 405
    UpdateLocation {
        /// Location the caller tried to update
        id: LocationId,
    },
    /// DELETE /location/{id}
    DeleteLocation {
        /// Location to delete
        id: LocationId,
    },

    /// GET /borrowers
    ListBorrowers,
    /// GET /borrower/{id}
    GetBorrower {
        /// Borrower to fetch
        id: BorrowerId,
    },
    /// POST /borrowers
    CreateBorrower {
        /// Creation payload
        #[serde(flatten)]
        draft: BorrowerDraft,
    },
    /// PUT /borrower/{id} - always answered with 405
    UpdateBorrower {
        /// Borrower the caller tried to update
        id: BorrowerId,
    },
    /// DELETE /borrower/{id}
    DeleteBorrower {
        /// Borrower to delete
        id: BorrowerId,
    },

    /// GET /acquisitions
    ListAcquisitions,
    /// GET /acquisition/{id}
    GetAcquisition {
        /// Acquisition to fetch
        id: AcquisitionId,
    },
    /// POST /acquisitions
    CreateAcquisition {
        /// Creation payload
        #[serde(flatten)]
        draft: AcquisitionDraft,
    },
    /// PUT /acquisition/{id} - always answered with 405
    UpdateAcquisition {
        /// Acquisition the caller tried to update
        id: AcquisitionId,
    },
    /// DELETE /acquisition/{id}
    DeleteAcquisition {
        /// Acquisition to delete
        id: AcquisitionId,
    },

    /// POST /checkout
    Checkout {
        /// Batch payload: one borrower, many items
        #[serde(flatten)]
        request: CheckoutRequest,
    },
    /// POST /checkin
    Checkin {
        /// Batch payload: items coming back
        #[serde(flatten)]
        request: CheckinRequest,
    },
}

impl ApiRequest {
    /// Parse one request from a wire line
    pub fn from_json(line: &str) -> Result<Self, InventoryError> {
        Ok(serde_json::from_str(line)?)
    }
}

/// One API response: status code plus JSON body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP-style status code (200, 201, 400, 404, 405, 500)
    pub status: u16,
    /// Response body; `{"error": "<message>"}` for every error status
    pub body: Value,
}

impl ApiResponse {
    /// A 200 response with the given body
    pub fn ok(body: Value) -> Self {
        ApiResponse { status: 200, body }
    }

    /// A 201 response with the given body
    pub fn created(body: Value) -> Self {
        ApiResponse { status: 201, body }
    }

    /// The response for an error, with the taxonomy's status mapping
    pub fn from_error(error: &InventoryError) -> Self {
        ApiResponse {
            status: error.status_code(),
            body: serde_json::json!({ "error": error.to_string() }),
        }
    }
}
