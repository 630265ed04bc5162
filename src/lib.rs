//! Circulation Engine Library
//! # Overview
//!
//! This library provides a library-inventory management backend: catalog,
//! location, borrower and acquisition records plus the checkout/checkin
//! workflows that drive item availability.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Item, Borrower, Checkout, etc.) and the error type
//! - [`cli`] - CLI arguments parsing for the script driver
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Synchronous workflow orchestration
//!   - [`core::ledger`] - Loan history, the open-loan index and the unit of work
//!   - [`core::shared`] - Thread-safe engine flavor for concurrent callers
//! - [`io`] - Wire envelopes, request dispatch and the NDJSON script runner
//!
//! # Workflows
//!
//! Two batch workflows carry all the non-trivial logic:
//!
//! - **Checkout**: lend a batch of items to one borrower. Each item is
//!   checked for availability; failures collect per item instead of
//!   aborting the batch, and successful loans get a due date from the
//!   engine's [`types::LoanPolicy`].
//! - **Checkin**: close the open loan of each item in the batch, stamping
//!   the return time.
//!
//! Everything else is record CRUD with two relationships: items reference
//! locations (cleared when the location goes away) and loans cascade when
//! their item or borrower is deleted.
//!
//! # Availability
//!
//! An item is available iff it has no open loan. Availability is derived
//! from the loan ledger on every read, never stored. The shared engine
//! closes the check-then-insert race by inserting through the open-loan
//! index's entry lock, so concurrent checkouts of one item produce exactly
//! one loan.
//!
//! # Engine Flavors
//!
//! Both flavors implement [`core::CirculationApi`]:
//!
//! - [`core::CirculationEngine`] - HashMap stores, `&mut self`, for
//!   single-threaded embedding
//! - [`core::SharedCirculationEngine`] - DashMap stores, cloneable and
//!   shareable across tasks

pub mod cli;
pub mod core;
pub mod io;
pub mod types;
