use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::{round_to, GeneratorSlot},
    types::{AccountId, EntityId, IdSet, ProductId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const TRADE_TYPES: &[&str] = &["buy", "sell"];

pub const MIN_QUANTITY: f64 = 0.01;
pub const MAX_QUANTITY: f64 = 100.0;
pub const MIN_UNIT_PRICE: f64 = 1.0;
pub const MAX_UNIT_PRICE: f64 = 50_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRow {
    pub trade_id:       EntityId,
    pub account_id:     AccountId,
    pub product_id:     ProductId,
    pub timestamp:      NaiveDateTime,
    pub quantity:       f64,
    pub price_per_unit: f64,
    pub trade_type:     String,
}

impl Record for TradeRow {
    const TABLE: &'static str = "raw_trades";
    const COLUMNS: &'static [Column] = &[
        Column::new("trade_id", ColumnKind::Text),
        Column::new("account_id", ColumnKind::Text),
        Column::new("product_id", ColumnKind::Text),
        Column::new("timestamp", ColumnKind::Timestamp),
        Column::new("quantity", ColumnKind::Real),
        Column::new("price_per_unit", ColumnKind::Real),
        Column::new("trade_type", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.trade_id.as_str().into(),
            self.account_id.0.as_str().into(),
            self.product_id.0.as_str().into(),
            self.timestamp.into(),
            self.quantity.into(),
            self.price_per_unit.into(),
            self.trade_type.as_str().into(),
        ]
    }
}

/// `volume` trades per account, each against a product picked uniformly.
/// Unit prices are independent of the market price series.
pub struct TradeGenerator;

impl EntityGenerator for TradeGenerator {
    type Parents<'p> = (&'p IdSet<AccountId>, &'p IdSet<ProductId>);
    type Row = TradeRow;
    const SLOT: GeneratorSlot = GeneratorSlot::Trade;

    fn generate(
        &self,
        (accounts, products): Self::Parents<'_>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<TradeRow>> {
        accounts.require_for("trade", volume)?;
        products.require_for("trade", volume)?;
        let mut trades = Vec::with_capacity(accounts.len() * volume);
        for account_id in accounts {
            for _ in 0..volume {
                trades.push(TradeRow {
                    trade_id:       ctx.ids.new_id(),
                    account_id:     account_id.clone(),
                    product_id:     products.choose(&mut ctx.rng).clone(),
                    timestamp:      ctx.clock.random_timestamp(&mut ctx.rng),
                    quantity:       round_to(ctx.rng.uniform(MIN_QUANTITY, MAX_QUANTITY), 4),
                    price_per_unit: round_to(ctx.rng.uniform(MIN_UNIT_PRICE, MAX_UNIT_PRICE), 2),
                    trade_type:     ctx.rng.choose(TRADE_TYPES).to_string(),
                });
            }
        }
        Ok(trades)
    }
}
