//! The generation orchestrator — drives one seeding run.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Users
//!   2. UserProfiles, KycChecks, MarketingAttribution  (need users)
//!   3. Accounts                                       (need users)
//!   4. Products
//!   5. Transactions                                   (need accounts)
//!   6. Trades                                         (need accounts, products)
//!   7. MarketPrices                                   (need products)
//!   8. LoginEvents                                    (need users)
//!
//! RULES:
//!   - A parent's identifier set is complete before any child runs.
//!   - Generators only see the identifier sets passed to them.
//!   - The whole dataset is generated before anything reaches a sink,
//!     so a generation failure leaves every table untouched.
//!   - Tables load in Dataset::TABLES order; the first sink failure
//!     stops the run. Tables already loaded stay loaded.

use crate::{
    account_generator::{account_ids, account_volume, AccountGenerator},
    clock::RunClock,
    config::GenConfig,
    dataset::Dataset,
    error::{SeedError, SeedResult},
    generator::{EntityGenerator, GenContext},
    kyc_generator::KycCheckGenerator,
    login_generator::LoginEventGenerator,
    market_price_generator::MarketPriceGenerator,
    marketing_generator::MarketingAttributionGenerator,
    product_generator::{product_ids, ProductGenerator},
    record::Record,
    rng::RngBank,
    sink::Sink,
    trade_generator::TradeGenerator,
    transaction_generator::TransactionGenerator,
    user_generator::{user_ids, UserGenerator},
    user_profile_generator::UserProfileGenerator,
};

/// Profiles and attribution rows per user.
const ONE_PER_USER: usize = 1;

/// What a completed run loaded, for the runner's summary.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub master_seed: u64,
    pub sink:        &'static str,
    pub tables:      Vec<(&'static str, usize)>,
}

impl RunReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|(_, n)| n).sum()
    }
}

pub struct GenerationOrchestrator {
    config:   GenConfig,
    clock:    RunClock,
    rng_bank: RngBank,
}

impl GenerationOrchestrator {
    /// Validate the config and fix the run's clock and master seed.
    pub fn new(config: GenConfig, clock: RunClock) -> SeedResult<Self> {
        config.validate()?;
        let rng_bank = match config.seed {
            Some(seed) => RngBank::new(seed),
            None => RngBank::from_entropy(),
        };
        Ok(Self {
            config,
            clock,
            rng_bank,
        })
    }

    /// Orchestrator whose clock reads the wall time now.
    pub fn starting_now(config: GenConfig) -> SeedResult<Self> {
        let clock = RunClock::now(config.activity_window_days);
        Self::new(config, clock)
    }

    pub fn master_seed(&self) -> u64 {
        self.rng_bank.master_seed()
    }

    pub fn clock(&self) -> &RunClock {
        &self.clock
    }

    /// Generate every table, in dependency order, in memory.
    pub fn run(&self) -> SeedResult<Dataset> {
        let cfg = &self.config;
        log::info!(
            "seed run: as_of={} master_seed={}",
            self.clock.as_of,
            self.master_seed()
        );

        let users = self.stage(UserGenerator, (), cfg.user_count)?;
        let user_set = user_ids(&users);

        let user_profiles = self.stage(UserProfileGenerator, &user_set, ONE_PER_USER)?;
        let kyc_checks = self.stage(KycCheckGenerator, &user_set, cfg.kyc_checks_per_user)?;
        let marketing_attribution =
            self.stage(MarketingAttributionGenerator, &user_set, ONE_PER_USER)?;

        let n_accounts = account_volume(user_set.len(), cfg.account_multiplier);
        let accounts = self.stage(AccountGenerator, &user_set, n_accounts)?;
        let account_set = account_ids(&accounts);

        let products = self.stage(ProductGenerator, (), cfg.product_count)?;
        let product_set = product_ids(&products);

        let transactions =
            self.stage(TransactionGenerator, &account_set, cfg.transactions_per_account)?;
        let trades = self.stage(
            TradeGenerator,
            (&account_set, &product_set),
            cfg.trades_per_account,
        )?;
        let market_prices =
            self.stage(MarketPriceGenerator, &product_set, cfg.price_history_days)?;
        let user_logins = self.stage(LoginEventGenerator, &user_set, cfg.logins_per_user)?;

        Ok(Dataset {
            users,
            user_profiles,
            kyc_checks,
            marketing_attribution,
            accounts,
            products,
            transactions,
            trades,
            market_prices,
            user_logins,
        })
    }

    /// Generate, then load each table into `sink` in dependency order.
    pub fn run_into(&self, sink: &mut dyn Sink) -> SeedResult<RunReport> {
        let dataset = self.run()?;
        let tables = load_all(&dataset, sink)?;
        Ok(RunReport {
            master_seed: self.master_seed(),
            sink: sink.name(),
            tables,
        })
    }

    fn stage<G: EntityGenerator>(
        &self,
        generator: G,
        parents: G::Parents<'_>,
        volume: usize,
    ) -> SeedResult<Vec<G::Row>> {
        let mut ctx = GenContext::new(&self.rng_bank, G::SLOT, self.clock);
        let rows = generator.generate(parents, volume, &mut ctx)?;
        log::info!("{}: generated {} rows", <G::Row as Record>::TABLE, rows.len());
        Ok(rows)
    }
}

/// Hand every table to the sink, stopping at the first failure.
pub fn load_all(dataset: &Dataset, sink: &mut dyn Sink) -> SeedResult<Vec<(&'static str, usize)>> {
    let mut loaded = Vec::with_capacity(Dataset::TABLES.len());
    for batch in dataset.tables() {
        sink.load(&batch).map_err(|source| SeedError::SinkFailure {
            table: batch.table.to_string(),
            source,
        })?;
        log::info!("{}: loaded {} rows into {}", batch.table, batch.len(), sink.name());
        loaded.push((batch.table, batch.len()));
    }
    Ok(loaded)
}

/// Generate a dataset from `config` with the clock at the current time.
pub fn run(config: &GenConfig) -> SeedResult<Dataset> {
    GenerationOrchestrator::starting_now(config.clone())?.run()
}
