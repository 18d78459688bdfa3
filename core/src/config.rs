use crate::{
    account_generator::account_volume,
    error::{SeedError, SeedResult},
    market_price_generator::PRICE_HISTORY_DAYS,
};
use serde::{Deserialize, Serialize};

/// Largest table a run may produce. The whole dataset is held in memory
/// before the first load.
pub const MAX_TABLE_ROWS: usize = u32::MAX as usize;

/// Every volume knob of a run, in one value.
///
/// Missing keys in a config file fall back to the defaults below, so a
/// file only needs to list what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenConfig {
    pub user_count: usize,
    /// Accounts per user on average; total is truncated toward zero.
    pub account_multiplier: f64,
    pub product_count: usize,
    pub transactions_per_account: usize,
    pub trades_per_account: usize,
    pub logins_per_user: usize,
    pub kyc_checks_per_user: usize,
    /// Daily closes per product, counting back from today.
    pub price_history_days: usize,
    /// Activity timestamps fall within this many days before now.
    pub activity_window_days: i64,
    /// Pin the master seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            user_count:               500,
            account_multiplier:       1.5,
            product_count:            50,
            transactions_per_account: 10,
            trades_per_account:       5,
            logins_per_user:          20,
            kyc_checks_per_user:      1,
            price_history_days:       PRICE_HISTORY_DAYS,
            activity_window_days:     730,
            seed:                     None,
        }
    }
}

impl GenConfig {
    /// Load from a JSON file.
    /// In tests, use GenConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GenConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Small volumes for unit and integration tests.
    pub fn default_test() -> Self {
        Self {
            user_count:               12,
            account_multiplier:       1.5,
            product_count:            4,
            transactions_per_account: 3,
            trades_per_account:       2,
            logins_per_user:          2,
            kyc_checks_per_user:      1,
            price_history_days:       PRICE_HISTORY_DAYS,
            activity_window_days:     730,
            seed:                     None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values no run can use. Volumes of zero are allowed; an empty
    /// parent with a non-zero child volume fails later, at generation.
    pub fn validate(&self) -> SeedResult<()> {
        if !self.account_multiplier.is_finite() || self.account_multiplier < 0.0 {
            return Err(SeedError::InvalidConfig(format!(
                "account_multiplier must be a finite, non-negative number (got {})",
                self.account_multiplier
            )));
        }
        if self.activity_window_days < 0 {
            return Err(SeedError::InvalidConfig(format!(
                "activity_window_days must be >= 0 (got {})",
                self.activity_window_days
            )));
        }

        let accounts = self.user_count as f64 * self.account_multiplier;
        if accounts > MAX_TABLE_ROWS as f64 {
            return Err(SeedError::InvalidConfig(format!(
                "{} users x {} accounts each exceeds {MAX_TABLE_ROWS} accounts",
                self.user_count, self.account_multiplier
            )));
        }
        let accounts = account_volume(self.user_count, self.account_multiplier);

        table_size("users", self.user_count, 1)?;
        table_size("kyc checks", self.user_count, self.kyc_checks_per_user)?;
        table_size("logins", self.user_count, self.logins_per_user)?;
        table_size("transactions", accounts, self.transactions_per_account)?;
        table_size("trades", accounts, self.trades_per_account)?;
        table_size("products", self.product_count, 1)?;
        table_size("market prices", self.product_count, self.price_history_days)?;
        Ok(())
    }
}

/// `parents x per_parent` must fit under MAX_TABLE_ROWS.
fn table_size(table: &str, parents: usize, per_parent: usize) -> SeedResult<()> {
    match parents.checked_mul(per_parent) {
        Some(rows) if rows <= MAX_TABLE_ROWS => Ok(()),
        _ => Err(SeedError::InvalidConfig(format!(
            "{table}: {parents} x {per_parent} rows exceeds {MAX_TABLE_ROWS}"
        ))),
    }
}
