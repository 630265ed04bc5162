//! Core business logic module
//!
//! This module contains the circulation engine and its record stores:
//! - `traits` - The `CirculationApi` seam both engine flavors implement
//! - `engine` - Synchronous workflow orchestration
//! - `catalog` - Item and location records
//! - `borrowers` - Borrower records with unique names
//! - `acquisitions` - Acquisition request records
//! - `ledger` - Checkout history, the open-loan index and the unit of work
//! - `shared` - Thread-safe twins of the above for concurrent callers

pub mod acquisitions;
pub mod borrowers;
pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod shared;
pub mod traits;

pub use acquisitions::AcquisitionStore;
pub use borrowers::BorrowerRegistry;
pub use catalog::Catalog;
pub use engine::CirculationEngine;
pub use ledger::{LoanLedger, UnitOfWork};
pub use shared::SharedCirculationEngine;
pub use traits::CirculationApi;
