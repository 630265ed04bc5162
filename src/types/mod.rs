//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `item`: catalog item records, creation drafts and update patches
//! - `location`: physical storage locations
//! - `borrower`: registered borrowers
//! - `acquisition`: acquisition request records
//! - `loan`: checkout records, workflow payloads and the loan policy
//! - `error`: error types for the circulation engine

pub mod acquisition;
pub mod borrower;
pub mod error;
pub mod item;
pub mod loan;
pub mod location;

pub use acquisition::{Acquisition, AcquisitionDraft, AcquisitionId};
pub use borrower::{Borrower, BorrowerDraft, BorrowerId};
pub use error::InventoryError;
pub use item::{Item, ItemDraft, ItemId, ItemPatch, ItemView};
pub use loan::{
    BatchOutcome, CheckinRequest, Checkout, CheckoutId, CheckoutRequest, LoanPolicy,
};
pub use location::{Location, LocationDraft, LocationId};
