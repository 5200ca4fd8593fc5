//! Benchmark suite for comparing ledger locking strategies
//!
//! This benchmark contrasts the single process-wide lock with per-user lock
//! sharding using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```
//!
//! # Scenarios
//!
//! - **single_user**: every thread hammers the same user, so both designs
//!   fully serialize and measure raw critical-section cost
//! - **distinct_users**: each thread owns its user, where sharding should
//!   pull ahead of the global lock

use point_ledger::{Ledger, PointLedger, ShardedPointLedger};
use std::sync::Arc;
use std::thread;

const THREADS: u64 = 4;
const OPS_PER_THREAD: u64 = 1000;

fn main() {
    divan::main();
}

/// Spawn worker threads charging through the shared ledger
fn hammer<L: Ledger + 'static>(ledger: Arc<L>, distinct_users: bool) {
    let handles: Vec<_> = (0..THREADS)
        .map(|thread_id| {
            let ledger = Arc::clone(&ledger);
            thread::spawn(move || {
                let user = if distinct_users { thread_id } else { 0 };
                for _ in 0..OPS_PER_THREAD {
                    ledger.charge(user, 1).expect("charge failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }
}

#[divan::bench]
fn global_lock_single_user() {
    hammer(Arc::new(PointLedger::new()), false);
}

#[divan::bench]
fn sharded_single_user() {
    hammer(Arc::new(ShardedPointLedger::new()), false);
}

#[divan::bench]
fn global_lock_distinct_users() {
    hammer(Arc::new(PointLedger::new()), true);
}

#[divan::bench]
fn sharded_distinct_users() {
    hammer(Arc::new(ShardedPointLedger::new()), true);
}
