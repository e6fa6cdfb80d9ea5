//! Benchmarks for the price ladder.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark group
//! cargo bench -- update_existing
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main,
    BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::time::Duration;

use price_ladder::{BookUpdate, OrderBook, Side};

// ============================================================================
// HELPER FUNCTIONS - Deterministic feed generation
// ============================================================================

/// Populate both sides with `depth` levels around 500.00
fn populate(book: &mut OrderBook, depth: usize) {
    for i in 1..=depth {
        let offset = i as f64 * 0.01;
        book.update_bid(500.0 - offset, 10.0).unwrap();
        book.update_offer(500.0 + offset, 10.0).unwrap();
    }
}

/// Generate a feed clustered near the touch
fn generate_feed(count: usize, seed: u64) -> Vec<BookUpdate> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut feed = Vec::with_capacity(count);
    let mut mid: i64 = 50_000;

    for _ in 0..count {
        mid += rng.gen_range(-1..=1);
        let side = if rng.gen_bool(0.5) { Side::Bid } else { Side::Offer };
        let depth: i64 = rng.gen_range(1..=20);
        let ticks = match side {
            Side::Bid => mid - depth,
            Side::Offer => mid + depth,
        };
        let size = if rng.gen_bool(0.2) { 0.0 } else { rng.gen_range(1..=100) as f64 };
        feed.push(BookUpdate::new(side, ticks as f64 * 0.01, size));
    }

    feed
}

// ============================================================================
// BENCHMARK: Single Update Latency
// ============================================================================

fn bench_update_existing(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_existing");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("resize_best_bid", |b| {
        let mut book = OrderBook::sparse(0.01).unwrap();
        populate(&mut book, 1_000);
        let mut size = 1.0;

        b.iter(|| {
            size = if size > 50.0 { 1.0 } else { size + 1.0 };
            black_box(book.update_bid(499.99, size))
        });
    });

    group.bench_function("withdraw_and_restore_best", |b| {
        let mut book = OrderBook::dense(0.01, 400.0, 600.0).unwrap();
        populate(&mut book, 1_000);

        b.iter(|| {
            book.update_offer(500.01, 0.0).unwrap();
            black_box(book.update_offer(500.01, 10.0))
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Insertion
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("new_best_bid", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::sparse(0.01).unwrap();
                populate(&mut book, 1_000);
                book
            },
            |mut book| black_box(book.update_bid(500.0, 1.0)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("deep_bid_1k_book", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::sparse(0.01).unwrap();
                populate(&mut book, 1_000);
                book
            },
            |mut book| black_box(book.update_bid(489.5, 1.0)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("bounded_evict", |b| {
        b.iter_batched(
            || {
                let mut book = OrderBook::bounded(100, 0.01).unwrap();
                populate(&mut book, 100);
                book
            },
            |mut book| black_box(book.update_bid(500.0, 1.0)),
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("updates", batch_size),
            &batch_size,
            |b, &size| {
                let feed = generate_feed(size, 42);

                b.iter_batched(
                    || OrderBook::sparse(0.01).unwrap(),
                    |mut book| {
                        for update in &feed {
                            let _ = black_box(book.apply(update));
                        }
                        book.bid_ladder().len()
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// BENCHMARK: Queries
// ============================================================================

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    group.measurement_time(Duration::from_secs(5));

    let mut book = OrderBook::sparse(0.01).unwrap();
    populate(&mut book, 1_000);

    group.bench_function("weighted_mid", |b| b.iter(|| black_box(book.weighted_mid())));
    group.bench_function("bids_top_10", |b| b.iter(|| black_box(book.bids(9, true))));
    group.bench_function("offers_full_depth", |b| b.iter(|| black_box(book.offers(-1, false))));
    group.bench_function("state_root", |b| b.iter(|| black_box(book.compute_state_root())));

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_update_existing,
    bench_insert,
    bench_throughput,
    bench_queries
);

criterion_main!(benches);
