use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    name_generator::NameGenerator,
    record::{Column, ColumnKind, FieldValue, Record},
    rng::{GenRng, GeneratorSlot},
    types::{IdSet, ProductId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Crypto,
    Stock,
}

impl AssetClass {
    pub const ALL: [AssetClass; 2] = [AssetClass::Crypto, AssetClass::Stock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::Stock  => "stock",
        }
    }

    /// Characters of the name kept in the ticker root.
    fn symbol_len(&self) -> usize {
        match self {
            Self::Crypto => 3,
            Self::Stock  => 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRow {
    pub product_id:    ProductId,
    pub ticker_symbol: String,
    pub name:          String,
    pub asset_class:   AssetClass,
}

impl Record for ProductRow {
    const TABLE: &'static str = "raw_products";
    const COLUMNS: &'static [Column] = &[
        Column::new("product_id", ColumnKind::Text),
        Column::new("ticker_symbol", ColumnKind::Text),
        Column::new("name", ColumnKind::Text),
        Column::new("asset_class", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.product_id.0.as_str().into(),
            self.ticker_symbol.as_str().into(),
            self.name.as_str().into(),
            self.asset_class.as_str().into(),
        ]
    }
}

/// `volume` tradeable products. Tickers may collide; nothing dedupes them.
pub struct ProductGenerator;

impl EntityGenerator for ProductGenerator {
    type Parents<'p> = ();
    type Row = ProductRow;
    const SLOT: GeneratorSlot = GeneratorSlot::Product;

    fn generate(&self, _parents: (), volume: usize, ctx: &mut GenContext) -> SeedResult<Vec<ProductRow>> {
        let products = (0..volume)
            .map(|_| {
                let asset_class = *ctx.rng.choose(&AssetClass::ALL);
                let name = product_name(asset_class, &mut ctx.rng);
                let ticker_symbol = ticker_for(asset_class, &name, ctx.rng.int_between(1, 99));
                ProductRow {
                    product_id: ProductId(ctx.ids.new_id()),
                    ticker_symbol,
                    name,
                    asset_class,
                }
            })
            .collect();
        Ok(products)
    }
}

fn product_name(asset_class: AssetClass, rng: &mut GenRng) -> String {
    match asset_class {
        AssetClass::Stock  => NameGenerator::company_name(rng),
        AssetClass::Crypto => format!("{}coin", NameGenerator::word(rng)),
    }
}

/// Uppercased name prefix plus a numeric suffix, e.g. "PREM42".
pub fn ticker_for(asset_class: AssetClass, name: &str, suffix: i64) -> String {
    let symbol: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(asset_class.symbol_len())
        .collect::<String>()
        .to_uppercase();
    format!("{symbol}{suffix}")
}

pub fn product_ids(products: &[ProductRow]) -> IdSet<ProductId> {
    products.iter().map(|p| p.product_id.clone()).collect()
}
