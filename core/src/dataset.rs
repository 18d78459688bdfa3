//! The generated dataset of one run, typed per table.

use crate::{
    account_generator::AccountRow,
    kyc_generator::KycCheckRow,
    login_generator::LoginEventRow,
    market_price_generator::MarketPriceRow,
    marketing_generator::MarketingAttributionRow,
    product_generator::ProductRow,
    record::{Record, TableBatch},
    trade_generator::TradeRow,
    transaction_generator::TransactionRow,
    user_generator::UserRow,
    user_profile_generator::UserProfileRow,
};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users:                 Vec<UserRow>,
    pub user_profiles:         Vec<UserProfileRow>,
    pub kyc_checks:            Vec<KycCheckRow>,
    pub marketing_attribution: Vec<MarketingAttributionRow>,
    pub accounts:              Vec<AccountRow>,
    pub products:              Vec<ProductRow>,
    pub transactions:          Vec<TransactionRow>,
    pub trades:                Vec<TradeRow>,
    pub market_prices:         Vec<MarketPriceRow>,
    pub user_logins:           Vec<LoginEventRow>,
}

impl Dataset {
    /// Table names in load order (parents before children).
    pub const TABLES: [&'static str; 10] = [
        UserRow::TABLE,
        UserProfileRow::TABLE,
        KycCheckRow::TABLE,
        MarketingAttributionRow::TABLE,
        AccountRow::TABLE,
        ProductRow::TABLE,
        TransactionRow::TABLE,
        TradeRow::TABLE,
        MarketPriceRow::TABLE,
        LoginEventRow::TABLE,
    ];

    /// One batch per table, in load order.
    pub fn tables(&self) -> Vec<TableBatch> {
        Self::TABLES
            .iter()
            .filter_map(|name| self.table(name))
            .collect()
    }

    /// The batch for a single table, by name.
    pub fn table(&self, name: &str) -> Option<TableBatch> {
        let batch = match name {
            UserRow::TABLE                 => TableBatch::from_records(&self.users),
            UserProfileRow::TABLE          => TableBatch::from_records(&self.user_profiles),
            KycCheckRow::TABLE             => TableBatch::from_records(&self.kyc_checks),
            MarketingAttributionRow::TABLE => TableBatch::from_records(&self.marketing_attribution),
            AccountRow::TABLE              => TableBatch::from_records(&self.accounts),
            ProductRow::TABLE              => TableBatch::from_records(&self.products),
            TransactionRow::TABLE          => TableBatch::from_records(&self.transactions),
            TradeRow::TABLE                => TableBatch::from_records(&self.trades),
            MarketPriceRow::TABLE          => TableBatch::from_records(&self.market_prices),
            LoginEventRow::TABLE           => TableBatch::from_records(&self.user_logins),
            _ => return None,
        };
        Some(batch)
    }

    /// Row count per table, in load order.
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (UserRow::TABLE, self.users.len()),
            (UserProfileRow::TABLE, self.user_profiles.len()),
            (KycCheckRow::TABLE, self.kyc_checks.len()),
            (MarketingAttributionRow::TABLE, self.marketing_attribution.len()),
            (AccountRow::TABLE, self.accounts.len()),
            (ProductRow::TABLE, self.products.len()),
            (TransactionRow::TABLE, self.transactions.len()),
            (TradeRow::TABLE, self.trades.len()),
            (MarketPriceRow::TABLE, self.market_prices.len()),
            (LoginEventRow::TABLE, self.user_logins.len()),
        ]
    }
}
