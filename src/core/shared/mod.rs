//! Thread-safe engine flavor for concurrent callers
//!
//! This module contains DashMap-backed twins of the record stores and a
//! `SharedCirculationEngine` that can be cloned and used from many tasks at
//! once. All methods take `&self`; synchronization lives inside the stores.
//!
//! The availability/insert race is closed here: the loan ledger inserts a
//! checkout through the open-loan index's entry lock, so of two concurrent
//! checkouts of the same item exactly one succeeds and the other sees a
//! per-item failure.

pub mod acquisitions;
pub mod borrowers;
pub mod catalog;
pub mod engine;
pub mod ledger;

pub use acquisitions::SharedAcquisitionStore;
pub use borrowers::SharedBorrowerRegistry;
pub use catalog::SharedCatalog;
pub use engine::SharedCirculationEngine;
pub use ledger::SharedLoanLedger;
