//! Market price history: one contiguous, strictly positive random walk
//! of 730 daily closes per product.

use chrono::{Duration, NaiveDate};
use fintech_seed_core::{
    clock::RunClock,
    market_price_generator::{MarketPriceRow, PRICE_FLOOR, PRICE_HISTORY_DAYS},
    types::ProductId,
    Dataset, GenConfig, GenerationOrchestrator,
};
use std::collections::BTreeMap;

fn as_of() -> RunClock {
    let at = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap();
    RunClock::new(at, 730)
}

fn generate(config: GenConfig) -> Dataset {
    GenerationOrchestrator::new(config, as_of()).unwrap().run().unwrap()
}

fn by_product(rows: &[MarketPriceRow]) -> BTreeMap<&ProductId, Vec<&MarketPriceRow>> {
    let mut series: BTreeMap<&ProductId, Vec<&MarketPriceRow>> = BTreeMap::new();
    for row in rows {
        series.entry(&row.product_id).or_default().push(row);
    }
    series
}

#[test]
fn each_product_has_730_contiguous_days() {
    let data = generate(GenConfig { product_count: 6, ..GenConfig::default_test() });
    let series = by_product(&data.market_prices);

    assert_eq!(series.len(), 6);
    let today = as_of().today();
    for (product, rows) in series {
        assert_eq!(rows.len(), PRICE_HISTORY_DAYS, "product {product}");

        let mut dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        assert_eq!(dates.len(), PRICE_HISTORY_DAYS, "duplicate dates for {product}");
        assert_eq!(*dates.last().unwrap(), today);
        assert_eq!(dates[0], today - Duration::days(PRICE_HISTORY_DAYS as i64 - 1));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1), "gap in {product}");
        }
    }
}

#[test]
fn closes_never_drop_below_floor() {
    let data = generate(GenConfig { product_count: 20, ..GenConfig::default_test() });
    assert_eq!(data.market_prices.len(), 20 * PRICE_HISTORY_DAYS);
    for row in &data.market_prices {
        assert!(row.close_price >= PRICE_FLOOR, "{row:?}");
        // Two decimal places.
        assert!((row.close_price * 100.0 - (row.close_price * 100.0).round()).abs() < 1e-6);
    }
}

#[test]
fn independent_runs_walk_different_paths() {
    let config = GenConfig { product_count: 1, ..GenConfig::default_test() };
    let first = generate(config.clone());
    let second = generate(config);

    assert_eq!(first.market_prices.len(), PRICE_HISTORY_DAYS);
    assert_eq!(second.market_prices.len(), PRICE_HISTORY_DAYS);
    assert!(first.market_prices.iter().all(|r| r.close_price > 0.0));
    assert!(second.market_prices.iter().all(|r| r.close_price > 0.0));

    let path = |d: &Dataset| d.market_prices.iter().map(|r| r.close_price).collect::<Vec<_>>();
    assert_ne!(path(&first), path(&second), "two unseeded runs produced the same walk");
}

#[test]
fn custom_window_length_is_respected() {
    let data = generate(GenConfig {
        product_count: 3,
        price_history_days: 90,
        ..GenConfig::default_test()
    });
    assert_eq!(data.market_prices.len(), 3 * 90);
}
