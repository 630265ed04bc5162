//! Thread-safe loan ledger
//!
//! This module provides the `SharedLoanLedger`, the concurrent twin of the
//! synchronous loan ledger. Loans live in a `DashMap` keyed by surrogate id
//! and the open-loan index is a `DashMap<ItemId, CheckoutId>`.
//!
//! # Race closure
//!
//! [`SharedLoanLedger::try_loan`] performs the availability check and the
//! loan insertion under one entry lock on the open-loan index: a vacant
//! entry means the item is available and the insertion wins the slot; an
//! occupied entry means another loan is open and the caller records a
//! per-item failure. Two concurrent checkouts of the same item serialize on
//! that entry, so at most one open loan per item can ever exist.

use crate::types::{BorrowerId, Checkout, CheckoutId, ItemId, LoanPolicy};
use chrono::{DateTime, Utc};
use dashmap::{DashMap, Entry};
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe system of record for checkout history
#[derive(Debug)]
pub struct SharedLoanLedger {
    /// Concurrent map of checkout ids to loan records
    loans: DashMap<CheckoutId, Checkout>,
    /// Concurrent index of open loans by item id
    ///
    /// Entry locks on this map are the per-item serialization point for
    /// checkout and checkin.
    open_by_item: DashMap<ItemId, CheckoutId>,
    /// Next checkout id to assign
    next_id: AtomicU64,
}

impl SharedLoanLedger {
    /// Create a new SharedLoanLedger with no history
    pub fn new() -> Self {
        SharedLoanLedger {
            loans: DashMap::new(),
            open_by_item: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// True iff no open loan exists for this item
    ///
    /// A snapshot: the answer can be stale by the time the caller acts on
    /// it, which is why [`try_loan`](Self::try_loan) re-checks under the
    /// entry lock.
    pub fn is_available(&self, item_id: ItemId) -> bool {
        !self.open_by_item.contains_key(&item_id)
    }

    /// Atomically check availability and open a loan if the item is free
    ///
    /// # Arguments
    ///
    /// * `item_id` - The item to lend
    /// * `borrower_id` - The borrower taking it
    /// * `now` - Borrow timestamp stamped on the record
    /// * `policy` - Loan period used to derive the due date
    ///
    /// # Returns
    ///
    /// * `Some(CheckoutId)` - The loan was created; the item was free
    /// * `None` - Another open loan exists; the caller should record a
    ///   per-item failure
    pub fn try_loan(
        &self,
        item_id: ItemId,
        borrower_id: BorrowerId,
        now: DateTime<Utc>,
        policy: LoanPolicy,
    ) -> Option<CheckoutId> {
        match self.open_by_item.entry(item_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let checkout = Checkout::open(id, item_id, borrower_id, now, policy.due_from(now));
                // publish the record before the index entry becomes visible
                self.loans.insert(id, checkout);
                slot.insert(id);
                Some(id)
            }
        }
    }

    /// Close the open loan for an item, if any
    ///
    /// Removing the index entry is the atomic step: of two concurrent
    /// checkins of the same item only one observes the entry.
    ///
    /// # Returns
    ///
    /// * `Some(CheckoutId)` - The loan that was closed
    /// * `None` - No open loan existed for this item
    pub fn close_loan(&self, item_id: ItemId, now: DateTime<Utc>) -> Option<CheckoutId> {
        let (_, checkout_id) = self.open_by_item.remove(&item_id)?;
        if let Some(mut loan) = self.loans.get_mut(&checkout_id) {
            loan.date_returned = Some(now);
        }
        Some(checkout_id)
    }

    /// The open loan for an item, if any
    pub fn open_loan(&self, item_id: ItemId) -> Option<Checkout> {
        let checkout_id = *self.open_by_item.get(&item_id)?;
        self.loans.get(&checkout_id).map(|loan| loan.clone())
    }

    /// Look up a loan record by checkout id
    pub fn loan(&self, checkout_id: CheckoutId) -> Option<Checkout> {
        self.loans.get(&checkout_id).map(|loan| loan.clone())
    }

    /// Number of loan records, open and closed
    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    /// All loans held by a borrower, sorted by checkout id
    pub fn loans_for_borrower(&self, borrower_id: BorrowerId) -> Vec<Checkout> {
        let mut loans: Vec<Checkout> = self
            .loans
            .iter()
            .filter(|entry| entry.value().borrower_id == borrower_id)
            .map(|entry| entry.value().clone())
            .collect();
        loans.sort_by_key(|loan| loan.id);
        loans
    }

    /// Full loan history of an item, sorted by checkout id
    pub fn history_for_item(&self, item_id: ItemId) -> Vec<Checkout> {
        let mut loans: Vec<Checkout> = self
            .loans
            .iter()
            .filter(|entry| entry.value().item_id == item_id)
            .map(|entry| entry.value().clone())
            .collect();
        loans.sort_by_key(|loan| loan.id);
        loans
    }

    /// Remove every loan record referencing an item
    ///
    /// # Returns
    ///
    /// The number of loan records removed
    pub fn remove_by_item(&self, item_id: ItemId) -> usize {
        self.open_by_item.remove(&item_id);

        let ids: Vec<CheckoutId> = self
            .loans
            .iter()
            .filter(|entry| entry.value().item_id == item_id)
            .map(|entry| *entry.key())
            .collect();
        for id in &ids {
            self.loans.remove(id);
        }
        ids.len()
    }

    /// Remove every loan record referencing a borrower
    ///
    /// Removing an open loan makes the item available again.
    ///
    /// # Returns
    ///
    /// The number of loan records removed
    pub fn remove_by_borrower(&self, borrower_id: BorrowerId) -> usize {
        let mut removed = 0;
        let ids: Vec<(CheckoutId, ItemId, bool)> = self
            .loans
            .iter()
            .filter(|entry| entry.value().borrower_id == borrower_id)
            .map(|entry| {
                let loan = entry.value();
                (loan.id, loan.item_id, loan.is_open())
            })
            .collect();

        for (checkout_id, item_id, open) in ids {
            if open {
                self.open_by_item
                    .remove_if(&item_id, |_, id| *id == checkout_id);
            }
            self.loans.remove(&checkout_id);
            removed += 1;
        }
        removed
    }
}

impl Default for SharedLoanLedger {
    fn default() -> Self {
        Self::new()
    }
}
