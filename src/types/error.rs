//! Error types for the circulation engine
//!
//! This module defines the error taxonomy surfaced at the API boundary.
//! Every variant is terminal and non-retryable: it maps straight to a
//! status code and an `{"error": "<message>"}` body with no internal retry.
//!
//! # Error Categories
//!
//! - **MalformedRequest**: missing or wrong-typed required field, empty
//!   checkout batch, duplicate borrower name
//! - **NotFound**: an id that does not resolve to a record
//! - **MethodNotAllowed**: an operation the resource does not support
//! - **Io**: file errors from the script driver (never produced by the
//!   engines themselves)
//!
//! Per-item failures inside checkout/checkin batches are NOT errors; they
//! are collected into the batch outcome's `failed` list.

use thiserror::Error;

/// Main error type for the circulation engine
///
/// Each variant carries enough context to produce a useful response body.
/// The corresponding status code comes from [`InventoryError::status_code`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InventoryError {
    /// The request body is structurally invalid
    ///
    /// Covers missing required fields, wrong-typed fields, unknown
    /// operations, empty checkout batches and borrower-name collisions.
    #[error("Bad request: {reason}")]
    MalformedRequest {
        /// What was wrong with the request
        reason: String,
    },

    /// An id did not resolve to a record
    #[error("Not found: {resource} {id}")]
    NotFound {
        /// Kind of record that was looked up ("item", "borrower", ...)
        resource: String,
        /// The id that failed to resolve
        id: u64,
    },

    /// The resource exists but does not support this operation
    ///
    /// Update is item-only; update requests addressed to borrowers,
    /// acquisitions or locations land here.
    #[error("Method not allowed: {operation}")]
    MethodNotAllowed {
        /// The rejected operation name
        operation: String,
    },

    /// I/O error while reading the operations script or writing responses
    ///
    /// This is a fatal driver error, not an API outcome.
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

// Conversion from io::Error to InventoryError
impl From<std::io::Error> for InventoryError {
    fn from(error: std::io::Error) -> Self {
        InventoryError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to InventoryError
impl From<serde_json::Error> for InventoryError {
    fn from(error: serde_json::Error) -> Self {
        InventoryError::MalformedRequest {
            reason: error.to_string(),
        }
    }
}

impl InventoryError {
    /// Create a MalformedRequest error
    pub fn malformed(reason: impl Into<String>) -> Self {
        InventoryError::MalformedRequest {
            reason: reason.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(resource: &str, id: impl Into<u64>) -> Self {
        InventoryError::NotFound {
            resource: resource.to_string(),
            id: id.into(),
        }
    }

    /// Create a MethodNotAllowed error
    pub fn method_not_allowed(operation: &str) -> Self {
        InventoryError::MethodNotAllowed {
            operation: operation.to_string(),
        }
    }

    /// Status code this error maps to at the API boundary
    ///
    /// # Returns
    ///
    /// * 400 for malformed requests
    /// * 404 for unresolved ids
    /// * 405 for unsupported operations
    /// * 500 for driver I/O failures
    pub fn status_code(&self) -> u16 {
        match self {
            InventoryError::MalformedRequest { .. } => 400,
            InventoryError::NotFound { .. } => 404,
            InventoryError::MethodNotAllowed { .. } => 405,
            InventoryError::Io { .. } => 500,
        }
    }
}
