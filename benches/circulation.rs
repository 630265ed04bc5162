//! Benchmark suite for comparing engine flavors
//!
//! This benchmark compares the checkout/checkin throughput of the
//! synchronous and shared circulation engines using the divan framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Each benchmark seeds a catalog and a set of borrowers, then drives full
//! circulation cycles: every borrower checks out a slice of the catalog
//! and returns it. The shared engine runs the same workload through the
//! `CirculationApi` seam, so the numbers isolate store synchronization
//! overhead rather than workload differences.

use circulation_engine::core::{CirculationApi, CirculationEngine, SharedCirculationEngine};
use circulation_engine::types::{BorrowerDraft, CheckinRequest, CheckoutRequest, ItemDraft};

const ITEMS: u32 = 100;
const BORROWERS: u32 = 10;
const CYCLES: usize = 50;

fn main() {
    divan::main();
}

/// Seed the catalog and borrowers, then run circulation cycles
fn run_circulation<A: CirculationApi>(api: &mut A) {
    for n in 0..ITEMS {
        api.create_item(ItemDraft {
            title: format!("item-{}", n),
            creator: String::new(),
            publisher: String::new(),
            location_id: None,
            notes: String::new(),
        });
    }
    for n in 0..BORROWERS {
        api.create_borrower(BorrowerDraft {
            name: format!("borrower-{}", n),
            standing: String::new(),
        })
        .expect("seeding borrowers failed");
    }

    let per_borrower = ITEMS / BORROWERS;
    for _ in 0..CYCLES {
        for borrower in 0..BORROWERS {
            let items: Vec<u32> = (0..per_borrower)
                .map(|n| borrower * per_borrower + n + 1)
                .collect();
            api.checkout(&CheckoutRequest {
                borrower_id: borrower + 1,
                items: items.clone(),
            })
            .expect("checkout failed");
            api.checkin(&CheckinRequest { items }).expect("checkin failed");
        }
    }
}

/// Benchmark the synchronous engine
#[divan::bench]
fn sync_engine_circulation() {
    let mut engine = CirculationEngine::new();
    run_circulation(&mut engine);
}

/// Benchmark the shared engine through the same seam
#[divan::bench]
fn shared_engine_circulation() {
    let mut engine = SharedCirculationEngine::new();
    run_circulation(&mut engine);
}
