//! Loan ledger module
//!
//! This module provides the `LoanLedger` struct, the system of record for
//! checkout history, and the `UnitOfWork` that workflows thread through a
//! batch and commit once at the boundary.
//!
//! The LoanLedger is responsible for:
//! - Storing checkout records under surrogate ids (monotonic, never reused)
//! - Maintaining the open-loan index (item id -> open checkout id) that
//!   backs the availability check
//! - Applying staged batches atomically at commit
//! - Cascade removal of loan history when an item or borrower is deleted
//!
//! # Availability
//!
//! An item is available iff the open-loan index has no entry for it. The
//! index is kept exact: inserting an open loan adds the entry, closing or
//! cascade-removing it deletes the entry. At most one open loan per item
//! can exist because workflows only stage a loan after checking the index
//! (and their own staged set) within one exclusive borrow.

use crate::types::{BorrowerId, Checkout, CheckoutId, ItemId, LoanPolicy};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Staged mutations for one workflow call
///
/// A workflow begins a unit of work, stages loans and returns while
/// consulting both committed state and the staged set, and hands it to
/// [`LoanLedger::commit`] exactly once. Dropping the unit of work without
/// committing discards the batch, which is how a propagated error rolls
/// back.
#[derive(Debug)]
pub struct UnitOfWork {
    /// Timestamp stamped on every loan and return in the batch
    now: DateTime<Utc>,
    /// Loan period used to derive due dates
    policy: LoanPolicy,
    /// Loans to create, in request order
    staged_loans: Vec<(ItemId, BorrowerId)>,
    /// Open loans to close, in request order
    staged_returns: Vec<CheckoutId>,
}

impl UnitOfWork {
    /// Begin a unit of work stamped with `now`
    pub fn begin(now: DateTime<Utc>, policy: LoanPolicy) -> Self {
        Self {
            now,
            policy,
            staged_loans: Vec::new(),
            staged_returns: Vec::new(),
        }
    }

    /// Stage a new loan of `item_id` to `borrower_id`
    pub fn stage_loan(&mut self, item_id: ItemId, borrower_id: BorrowerId) {
        self.staged_loans.push((item_id, borrower_id));
    }

    /// True if this batch already stages a loan for `item_id`
    ///
    /// Keeps a duplicated item id later in the same checkout batch from
    /// observing the item as still available.
    pub fn has_pending_loan(&self, item_id: ItemId) -> bool {
        self.staged_loans.iter().any(|(item, _)| *item == item_id)
    }

    /// Stage closing the open loan `checkout_id`
    pub fn stage_return(&mut self, checkout_id: CheckoutId) {
        self.staged_returns.push(checkout_id);
    }

    /// True if this batch already stages a return for `checkout_id`
    pub fn has_pending_return(&self, checkout_id: CheckoutId) -> bool {
        self.staged_returns.contains(&checkout_id)
    }

    /// Number of staged loans and returns
    pub fn staged_count(&self) -> usize {
        self.staged_loans.len() + self.staged_returns.len()
    }
}

/// System of record for checkout history
///
/// Loans are keyed by surrogate id; the same item/borrower pair may recur
/// across history. The `open_by_item` index answers the availability check
/// in O(1) and enforces the one-open-loan-per-item invariant.
pub struct LoanLedger {
    /// Map of checkout ids to loan records
    loans: HashMap<CheckoutId, Checkout>,
    /// Index of open loans by item id
    open_by_item: HashMap<ItemId, CheckoutId>,
    /// Next checkout id to assign
    next_id: CheckoutId,
}

impl LoanLedger {
    /// Create a new LoanLedger with no history
    pub fn new() -> Self {
        LoanLedger {
            loans: HashMap::new(),
            open_by_item: HashMap::new(),
            next_id: 1,
        }
    }

    /// True iff no open loan exists for this item
    ///
    /// Pure read of committed state; an item with no history is vacuously
    /// available. Recomputed on every call, never cached.
    pub fn is_available(&self, item_id: ItemId) -> bool {
        !self.open_by_item.contains_key(&item_id)
    }

    /// The open loan for an item, if any
    pub fn open_loan(&self, item_id: ItemId) -> Option<&Checkout> {
        let checkout_id = self.open_by_item.get(&item_id)?;
        self.loans.get(checkout_id)
    }

    /// Look up a loan record by checkout id
    pub fn loan(&self, checkout_id: CheckoutId) -> Option<&Checkout> {
        self.loans.get(&checkout_id)
    }

    /// Number of loan records, open and closed
    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    /// All loans held by a borrower, sorted by checkout id
    pub fn loans_for_borrower(&self, borrower_id: BorrowerId) -> Vec<&Checkout> {
        let mut loans: Vec<&Checkout> = self
            .loans
            .values()
            .filter(|loan| loan.borrower_id == borrower_id)
            .collect();
        loans.sort_by_key(|loan| loan.id);
        loans
    }

    /// Full loan history of an item, sorted by checkout id
    pub fn history_for_item(&self, item_id: ItemId) -> Vec<&Checkout> {
        let mut loans: Vec<&Checkout> = self
            .loans
            .values()
            .filter(|loan| loan.item_id == item_id)
            .collect();
        loans.sort_by_key(|loan| loan.id);
        loans
    }

    /// Apply a unit of work: create staged loans, close staged returns
    ///
    /// Every record in the batch is stamped with the unit of work's single
    /// timestamp. Staged loans must target items with no open loan; the
    /// workflow guarantees this by staging only after an availability check
    /// within the same exclusive borrow.
    ///
    /// # Arguments
    ///
    /// * `unit` - The staged batch, consumed by the commit
    ///
    /// # Returns
    ///
    /// The checkout ids assigned to the newly created loans, in stage order
    pub fn commit(&mut self, unit: UnitOfWork) -> Vec<CheckoutId> {
        let UnitOfWork {
            now,
            policy,
            staged_loans,
            staged_returns,
        } = unit;

        let mut created = Vec::with_capacity(staged_loans.len());
        for (item_id, borrower_id) in staged_loans {
            let id = self.next_id;
            self.next_id += 1;

            let checkout = Checkout::open(id, item_id, borrower_id, now, policy.due_from(now));
            self.loans.insert(id, checkout);
            self.open_by_item.insert(item_id, id);
            created.push(id);
        }

        for checkout_id in staged_returns {
            if let Some(loan) = self.loans.get_mut(&checkout_id) {
                if loan.is_open() {
                    loan.date_returned = Some(now);
                    self.open_by_item.remove(&loan.item_id);
                }
            }
        }

        created
    }

    /// Remove every loan record referencing an item
    ///
    /// Called when the item is deleted (its checkout history cascades).
    ///
    /// # Returns
    ///
    /// The number of loan records removed
    pub fn remove_by_item(&mut self, item_id: ItemId) -> usize {
        self.open_by_item.remove(&item_id);

        let mut removed = 0;
        self.loans.retain(|_, loan| {
            if loan.item_id == item_id {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove every loan record referencing a borrower
    ///
    /// Called when the borrower is deleted. Removing an open loan makes the
    /// item available again.
    ///
    /// # Returns
    ///
    /// The number of loan records removed
    pub fn remove_by_borrower(&mut self, borrower_id: BorrowerId) -> usize {
        let open_items: Vec<ItemId> = self
            .loans
            .values()
            .filter(|loan| loan.borrower_id == borrower_id && loan.is_open())
            .map(|loan| loan.item_id)
            .collect();
        for item_id in open_items {
            self.open_by_item.remove(&item_id);
        }

        let mut removed = 0;
        self.loans.retain(|_, loan| {
            if loan.borrower_id == borrower_id {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}

impl Default for LoanLedger {
    fn default() -> Self {
        Self::new()
    }
}
