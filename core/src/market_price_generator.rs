//! Daily close-price history per product.
//!
//! Unlike every other generator, rows here are not independent: each
//! close is the previous close times a random shock, so the series is a
//! multiplicative random walk. The walk starts at `as_of` and steps one
//! day back per row.
//!
//! RULE: The running price lives only in the walk's accumulator.
//! Nothing outside `walk` ever sees or mutates it.

use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::{round_to, GenRng, GeneratorSlot},
    types::{EntityId, IdSet, ProductId},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default history length: two years of daily closes.
pub const PRICE_HISTORY_DAYS: usize = 730;

/// Largest relative move in a single day, either direction.
pub const MAX_DAILY_MOVE: f64 = 0.05;

/// Prices never fall below one cent.
pub const PRICE_FLOOR: f64 = 0.01;

pub const MIN_START_PRICE: f64 = 1.0;
pub const MAX_START_PRICE: f64 = 50_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketPriceRow {
    pub price_id:    EntityId,
    pub product_id:  ProductId,
    pub date:        NaiveDate,
    pub close_price: f64,
}

impl Record for MarketPriceRow {
    const TABLE: &'static str = "raw_market_prices";
    const COLUMNS: &'static [Column] = &[
        Column::new("price_id", ColumnKind::Text),
        Column::new("product_id", ColumnKind::Text),
        Column::new("date", ColumnKind::Date),
        Column::new("close_price", ColumnKind::Real),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.price_id.as_str().into(),
            self.product_id.0.as_str().into(),
            self.date.into(),
            self.close_price.into(),
        ]
    }
}

/// One series of `volume` consecutive days for every product.
pub struct MarketPriceGenerator;

impl EntityGenerator for MarketPriceGenerator {
    type Parents<'p> = &'p IdSet<ProductId>;
    type Row = MarketPriceRow;
    const SLOT: GeneratorSlot = GeneratorSlot::MarketPrice;

    fn generate(
        &self,
        products: &IdSet<ProductId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<MarketPriceRow>> {
        products.require_for("market_price", volume)?;
        let mut prices = Vec::with_capacity(products.len() * volume);
        for product_id in products {
            let series = walk(product_id, volume, ctx);
            if let Some(stats) = SeriesStats::of(&series) {
                log::debug!(
                    "market_price: {product_id} days={} low={:.2} high={:.2} latest={:.2}",
                    series.len(),
                    stats.low,
                    stats.high,
                    stats.latest
                );
            }
            prices.extend(series);
        }
        Ok(prices)
    }
}

/// Apply one day's shock and clamp to the floor.
pub fn step(price: f64, shock: f64) -> f64 {
    (price * (1.0 + shock)).max(PRICE_FLOOR)
}

/// Uniform daily shock in [-MAX_DAILY_MOVE, +MAX_DAILY_MOVE].
fn daily_shock(rng: &mut GenRng) -> f64 {
    rng.uniform(-MAX_DAILY_MOVE, MAX_DAILY_MOVE)
}

/// Walk `days` steps back from the clock's date, carrying the unrounded
/// price as accumulator. Each row holds the running price to 2dp.
fn walk(product_id: &ProductId, days: usize, ctx: &mut GenContext) -> Vec<MarketPriceRow> {
    let today = ctx.clock.today();
    let opening = round_to(ctx.rng.uniform(MIN_START_PRICE, MAX_START_PRICE), 2);

    (0..days as i64)
        .map(|back| today - Duration::days(back))
        .scan(opening, |price, date| {
            *price = step(*price, daily_shock(&mut ctx.rng));
            Some(MarketPriceRow {
                price_id:    ctx.ids.new_id(),
                product_id:  product_id.clone(),
                date,
                close_price: round_to(*price, 2),
            })
        })
        .collect()
}

/// Range summary of one product's series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub low:    f64,
    pub high:   f64,
    /// Close on the most recent date.
    pub latest: f64,
}

impl SeriesStats {
    pub fn of(series: &[MarketPriceRow]) -> Option<Self> {
        let latest = series.iter().max_by_key(|row| row.date)?.close_price;
        let (low, high) = series.iter().fold((f64::MAX, f64::MIN), |(lo, hi), row| {
            (lo.min(row.close_price), hi.max(row.close_price))
        });
        Some(Self { low, high, latest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::RunClock, rng::RngBank};

    fn ctx(seed: u64) -> GenContext {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        GenContext::new(&RngBank::new(seed), GeneratorSlot::MarketPrice, RunClock::new(as_of, 730))
    }

    #[test]
    fn floor_holds_under_repeated_crashes() {
        let mut price = 0.02;
        for _ in 0..100 {
            price = step(price, -MAX_DAILY_MOVE);
            assert!(price >= PRICE_FLOOR);
        }
        assert_eq!(price, PRICE_FLOOR);
    }

    #[test]
    fn series_walks_back_one_day_at_a_time() {
        let product = ProductId("p-1".into());
        let mut ctx = ctx(21);
        let series = walk(&product, PRICE_HISTORY_DAYS, &mut ctx);

        assert_eq!(series.len(), PRICE_HISTORY_DAYS);
        assert_eq!(series[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        for pair in series.windows(2) {
            assert_eq!(pair[0].date - pair[1].date, Duration::days(1));
        }
    }

    #[test]
    fn consecutive_closes_move_at_most_five_percent() {
        let product = ProductId("p-2".into());
        let mut ctx = ctx(22);
        let series = walk(&product, 200, &mut ctx);
        for pair in series.windows(2) {
            let (prev, next) = (pair[0].close_price, pair[1].close_price);
            if prev > 1.0 {
                // 2dp rounding on both ends adds at most a cent of slack.
                let slack = 0.02 / prev;
                let ratio = next / prev;
                assert!(
                    ratio >= 1.0 - MAX_DAILY_MOVE - slack && ratio <= 1.0 + MAX_DAILY_MOVE + slack,
                    "jump {prev} -> {next}"
                );
            }
        }
    }

    #[test]
    fn every_product_gets_its_own_series() {
        let products: IdSet<ProductId> =
            ["p-a", "p-b"].into_iter().map(|s| ProductId(s.into())).collect();
        let mut ctx = ctx(23);
        let rows = MarketPriceGenerator.generate(&products, 30, &mut ctx).unwrap();

        assert_eq!(rows.len(), 60);
        assert!(rows[..30].iter().all(|r| r.product_id.0 == "p-a"));
        assert!(rows[30..].iter().all(|r| r.product_id.0 == "p-b"));
        assert!(rows.iter().all(|r| r.close_price >= PRICE_FLOOR));
    }

    #[test]
    fn stats_track_latest_date() {
        let product = ProductId("p-3".into());
        let mut ctx = ctx(24);
        let series = walk(&product, 10, &mut ctx);
        let stats = SeriesStats::of(&series).unwrap();
        assert_eq!(stats.latest, series[0].close_price);
        assert!(stats.low <= stats.latest && stats.latest <= stats.high);
        assert!(SeriesStats::of(&[]).is_none());
    }
}
