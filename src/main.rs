//! Price Ladder - Binary Entry Point
//!
//! Replays a deterministic synthetic feed through a bounded book and prints
//! the top of book. Set `RUST_LOG=debug` to see evictions and rejections.

use price_ladder::{BookUpdate, OrderBook, Side};
use tracing_subscriber::EnvFilter;

/// Levels retained per side
const LEVEL_CAP: usize = 20;

/// Number of synthetic updates to replay
const FEED_LEN: u64 = 10_000;

fn main() {
    init_logging("info");

    println!("===========================================");
    println!("  Price Ladder - synthetic feed replay");
    println!("===========================================");
    println!();

    let mut book = match OrderBook::bounded(LEVEL_CAP, 0.5) {
        Ok(book) => book,
        Err(err) => {
            tracing::error!(error = %err, "failed to build book");
            return;
        }
    };

    let mut rejected = 0usize;
    for update in synthetic_feed(FEED_LEN) {
        if book.apply(&update).is_err() {
            rejected += 1;
        }
    }
    tracing::info!(updates = FEED_LEN, rejected, "feed replayed");

    print_side("Offers", book.offers(4, true).into_iter().rev());
    println!("  ----------------");
    print_side("Bids", book.bids(4, true).into_iter());
    println!();

    println!("Best bid:     {:?} x {:?}", book.best_bid_price(), book.best_bid_size());
    println!("Best offer:   {:?} x {:?}", book.best_offer_price(), book.best_offer_size());
    println!("Mid:          {:?}", book.mid());
    println!("Weighted mid: {:?}", book.weighted_mid());
    println!("Spread:       {:?}", book.spread());
    println!("State root:   {}", book.state_root_hex());
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_side(label: &str, levels: impl Iterator<Item = (f64, f64)>) {
    println!("  {label}:");
    for (price, size) in levels {
        println!("  {price:>10.2} {size:>8.2}");
    }
}

/// Quotes drifting around 100.0, bids below and offers above, with
/// roughly one update in seven withdrawing a level.
fn synthetic_feed(len: u64) -> impl Iterator<Item = BookUpdate> {
    (0..len).map(|i| {
        let side = if i % 2 == 0 { Side::Bid } else { Side::Offer };
        let drift = ((i / 500) % 7) as f64 * 0.5;
        let offset = ((i * 7919) % 24) as f64 * 0.5;
        let price = match side {
            Side::Bid => 99.5 + drift - offset,
            Side::Offer => 100.5 + drift + offset,
        };
        let size = if i % 7 == 3 {
            0.0
        } else {
            1.0 + ((i * 104_729) % 50) as f64
        };
        BookUpdate::new(side, price, size)
    })
}
