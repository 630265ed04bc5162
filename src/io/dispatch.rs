//! Request dispatch onto the circulation API
//!
//! This module maps wire envelopes onto any [`CirculationApi`]
//! implementation and applies the status mapping: 200 for reads, deletes
//! and workflows, 201 for creations, and the error taxonomy's codes for
//! failures. Success bodies wrap their payload by resource name so callers
//! can tell `{"item": ...}` from `{"items": [...]}` without context.

use crate::core::traits::CirculationApi;
use crate::io::envelope::{ApiRequest, ApiResponse};
use crate::types::InventoryError;
use serde::Serialize;
use serde_json::json;

/// Serialize a success payload under a wrapper key
///
/// Serialization of our own response types cannot fail; the error arm
/// exists to keep the dispatcher total rather than panicking.
fn wrap<T: Serialize>(key: &str, payload: &T, status: u16) -> ApiResponse {
    match serde_json::to_value(payload) {
        Ok(value) => ApiResponse {
            status,
            body: json!({ key: value }),
        },
        Err(error) => ApiResponse::from_error(&InventoryError::from(error)),
    }
}

fn ok<T: Serialize>(key: &str, payload: &T) -> ApiResponse {
    wrap(key, payload, 200)
}

fn created<T: Serialize>(key: &str, payload: &T) -> ApiResponse {
    wrap(key, payload, 201)
}

/// The uniform body for a successful delete
fn deleted() -> ApiResponse {
    ApiResponse::ok(json!({ "result": true }))
}

fn outcome(result: Result<crate::types::BatchOutcome, InventoryError>) -> ApiResponse {
    match result {
        Ok(outcome) => match serde_json::to_value(&outcome) {
            Ok(body) => ApiResponse::ok(body),
            Err(error) => ApiResponse::from_error(&InventoryError::from(error)),
        },
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// Execute one request against an API implementation
///
/// Every path produces a response; errors become their mapped status with
/// an `{"error": "<message>"}` body.
pub fn dispatch<A: CirculationApi>(api: &mut A, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::ListItems => ok("items", &api.list_items()),
        ApiRequest::GetItem { id } => match api.get_item(id) {
            Ok(view) => ok("item", &view),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::CreateItem { draft } => created("item", &api.create_item(draft)),
        ApiRequest::UpdateItem { id, patch } => match api.update_item(id, &patch) {
            Ok(view) => ok("item", &view),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::DeleteItem { id } => match api.delete_item(id) {
            Ok(_) => deleted(),
            Err(error) => ApiResponse::from_error(&error),
        },

        ApiRequest::ListLocations => ok("locations", &api.list_locations()),
        ApiRequest::GetLocation { id } => match api.get_location(id) {
            Ok(location) => ok("location", &location),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::CreateLocation { draft } => created("location", &api.create_location(draft)),
        ApiRequest::UpdateLocation { .. } => {
            ApiResponse::from_error(&InventoryError::method_not_allowed("update_location"))
        }
        ApiRequest::DeleteLocation { id } => match api.delete_location(id) {
            Ok(_) => deleted(),
            Err(error) => ApiResponse::from_error(&error),
        },

        ApiRequest::ListBorrowers => ok("borrowers", &api.list_borrowers()),
        ApiRequest::GetBorrower { id } => match api.get_borrower(id) {
            Ok(borrower) => ok("borrower", &borrower),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::CreateBorrower { draft } => match api.create_borrower(draft) {
            Ok(borrower) => created("borrower", &borrower),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::UpdateBorrower { .. } => {
            ApiResponse::from_error(&InventoryError::method_not_allowed("update_borrower"))
        }
        ApiRequest::DeleteBorrower { id } => match api.delete_borrower(id) {
            Ok(_) => deleted(),
            Err(error) => ApiResponse::from_error(&error),
        },

        ApiRequest::ListAcquisitions => ok("acquisitions", &api.list_acquisitions()),
        ApiRequest::GetAcquisition { id } => match api.get_acquisition(id) {
            Ok(acquisition) => ok("acquisition", &acquisition),
            Err(error) => ApiResponse::from_error(&error),
        },
        ApiRequest::CreateAcquisition { draft } => {
            created("acquisition", &api.create_acquisition(draft))
        }
        ApiRequest::UpdateAcquisition { .. } => {
            ApiResponse::from_error(&InventoryError::method_not_allowed("update_acquisition"))
        }
        ApiRequest::DeleteAcquisition { id } => match api.delete_acquisition(id) {
            Ok(_) => deleted(),
            Err(error) => ApiResponse::from_error(&error),
        },

        ApiRequest::Checkout { request } => outcome(api.checkout(&request)),
        ApiRequest::Checkin { request } => outcome(api.checkin(&request)),
    }
}

/// Parse and execute one wire line
///
/// A line that fails to parse yields a 400 response rather than an error,
/// so a script keeps running past bad input.
pub fn dispatch_line<A: CirculationApi>(api: &mut A, line: &str) -> ApiResponse {
    match ApiRequest::from_json(line) {
        Ok(request) => dispatch(api, request),
        Err(error) => {
            tracing::warn!(%error, "rejected unparseable request line");
            ApiResponse::from_error(&error)
        }
    }
}
