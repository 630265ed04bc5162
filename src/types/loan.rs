//! Loan types for the circulation engine
//!
//! A [`Checkout`] is one loan of one item to one borrower. Records carry a
//! surrogate id so the same item/borrower pair can appear repeatedly in
//! history; "the loan is open" is encoded as a null return date.
//!
//! The module also defines the workflow payloads ([`CheckoutRequest`],
//! [`CheckinRequest`]), the per-batch result summary ([`BatchOutcome`]) and
//! the loan period configuration ([`LoanPolicy`]).

use crate::types::borrower::BorrowerId;
use crate::types::item::ItemId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Type alias for checkout record identifiers
pub type CheckoutId = u64;

/// A loan record linking one item to one borrower
///
/// Created open (null `date_returned`) by the checkout workflow, closed by
/// the checkin workflow, and removed only when its item or borrower is
/// deleted. A closed loan is never reopened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkout {
    /// Surrogate identifier for this loan
    pub id: CheckoutId,
    /// Item on loan
    pub item_id: ItemId,
    /// Borrower holding the item
    pub borrower_id: BorrowerId,
    /// When the loan was created
    pub date_borrowed: DateTime<Utc>,
    /// When the item is due back
    pub date_due: DateTime<Utc>,
    /// When the item came back; `None` while the loan is open
    pub date_returned: Option<DateTime<Utc>>,
}

impl Checkout {
    /// Create an open loan record
    pub fn open(
        id: CheckoutId,
        item_id: ItemId,
        borrower_id: BorrowerId,
        date_borrowed: DateTime<Utc>,
        date_due: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            item_id,
            borrower_id,
            date_borrowed,
            date_due,
            date_returned: None,
        }
    }

    /// True while the item has not been returned
    pub fn is_open(&self) -> bool {
        self.date_returned.is_none()
    }
}

/// Loan period configuration
///
/// Controls how far past the borrow date the due date lands. The default
/// loan period is 14 days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPolicy {
    /// Number of days a borrower may keep an item
    pub loan_period_days: u32,
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
        }
    }
}

impl LoanPolicy {
    /// Create a LoanPolicy with a custom loan period
    ///
    /// A zero-day loan period would make every checkout instantly overdue,
    /// so zero falls back to the default with a warning.
    pub fn new(loan_period_days: u32) -> Self {
        let default = Self::default();

        let loan_period_days = if loan_period_days == 0 {
            tracing::warn!(
                "invalid loan_period_days (0), using default ({})",
                default.loan_period_days
            );
            default.loan_period_days
        } else {
            loan_period_days
        };

        Self { loan_period_days }
    }

    /// Compute the due date for a loan created at `date_borrowed`
    pub fn due_from(&self, date_borrowed: DateTime<Utc>) -> DateTime<Utc> {
        date_borrowed + Duration::days(i64::from(self.loan_period_days))
    }
}

/// A batch checkout request: one borrower, many items
///
/// `borrower_id` and `items` are both required; a body missing either fails
/// deserialization and is rejected as malformed before any item is touched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutRequest {
    /// Borrower taking the items
    pub borrower_id: BorrowerId,
    /// Items to lend, processed in the given order
    pub items: Vec<ItemId>,
}

/// A batch checkin request: items coming back
///
/// Only the `items` field is required. An empty list is a valid no-op batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckinRequest {
    /// Items being returned, processed in the given order
    pub items: Vec<ItemId>,
}

/// Per-item result summary of a checkout or checkin batch
///
/// Workflows never abort on a single item: ids land in `succeeded` or
/// `failed` and the caller sees partial success directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutcome {
    /// Items the workflow processed successfully, in request order
    pub succeeded: Vec<ItemId>,
    /// Items that could not be processed, in request order
    pub failed: Vec<ItemId>,
}
