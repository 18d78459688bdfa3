//! End-to-end runs: generation, loading into a sink, and failure paths.

use fintech_seed_core::{
    clock::RunClock,
    error::SeedError,
    orchestrator::run,
    record::TableBatch,
    transaction_generator::TransactionType,
    types::AccountId,
    Dataset, GenConfig, GenerationOrchestrator, Sink, SqliteStore,
};
use std::collections::HashSet;

fn orchestrator(config: GenConfig) -> GenerationOrchestrator {
    GenerationOrchestrator::new(config, RunClock::now(730)).unwrap()
}

/// Three users, 1.5 accounts each, two transactions per account.
#[test]
fn small_run_truncates_accounts_and_fans_out_transactions() {
    let config = GenConfig {
        user_count: 3,
        account_multiplier: 1.5,
        transactions_per_account: 2,
        ..GenConfig::default_test()
    };
    let data = orchestrator(config).run().unwrap();

    assert_eq!(data.accounts.len(), 4, "3 x 1.5 truncates to 4");
    assert_eq!(data.transactions.len(), 8);

    let accounts: HashSet<&AccountId> = data.accounts.iter().map(|a| &a.account_id).collect();
    for t in &data.transactions {
        assert!(accounts.contains(&t.account_id), "{} references {}", t.transaction_id, t.account_id);
    }
    for account in &accounts {
        let n = data.transactions.iter().filter(|t| &&t.account_id == account).count();
        assert_eq!(n, 2, "account {account} has {n} transactions");
    }
}

#[test]
fn withdrawals_and_only_withdrawals_are_negative() {
    let config = GenConfig { transactions_per_account: 20, ..GenConfig::default_test() };
    let data = orchestrator(config).run().unwrap();

    assert!(!data.transactions.is_empty());
    for t in &data.transactions {
        let withdrawal = t.transaction_type == TransactionType::Withdrawal;
        assert_eq!(withdrawal, t.amount < 0.0, "{t:?}");
    }
}

#[test]
fn identical_configs_give_same_shape_different_content() {
    let config = GenConfig::default_test();
    let a = orchestrator(config.clone()).run().unwrap();
    let b = orchestrator(config).run().unwrap();

    assert_eq!(a.row_counts(), b.row_counts());
    assert_ne!(a.users[0].user_id, b.users[0].user_id);
    let emails = |d: &Dataset| d.users.iter().map(|u| u.email.clone()).collect::<Vec<_>>();
    assert_ne!(emails(&a), emails(&b));
}

#[test]
fn pinned_seed_replays_the_run() {
    let config = GenConfig::default_test().with_seed(0xFEED_BEEF);
    let clock = RunClock::now(730);
    let a = GenerationOrchestrator::new(config.clone(), clock).unwrap().run().unwrap();
    let b = GenerationOrchestrator::new(config, clock).unwrap().run().unwrap();

    assert_eq!(a.users, b.users);
    assert_eq!(a.trades, b.trades);
    assert_eq!(a.market_prices, b.market_prices);
}

#[test]
fn no_users_means_no_profiles_can_be_built() {
    let config = GenConfig { user_count: 0, ..GenConfig::default_test() };
    let err = orchestrator(config).run().unwrap_err();
    match err {
        SeedError::EmptyParentSet { child, parent, .. } => {
            assert_eq!(child, "user_profile");
            assert_eq!(parent, "user");
        }
        other => panic!("expected EmptyParentSet, got {other}"),
    }
}

#[test]
fn trades_without_products_abort_before_loading() {
    let config = GenConfig { product_count: 0, ..GenConfig::default_test() };
    let mut store = SqliteStore::in_memory().unwrap();
    let err = orchestrator(config).run_into(&mut store).unwrap_err();

    assert!(matches!(err, SeedError::EmptyParentSet { child: "trade", parent: "product", .. }));
    // Nothing was loaded: generation failed before the sink was called.
    assert!(store.row_count("raw_users").is_err());
}

#[test]
fn zero_fan_out_tolerates_empty_parents() {
    let config = GenConfig {
        product_count: 0,
        trades_per_account: 0,
        price_history_days: 0,
        ..GenConfig::default_test()
    };
    let data = orchestrator(config).run().unwrap();
    assert!(data.products.is_empty());
    assert!(data.trades.is_empty());
    assert!(data.market_prices.is_empty());
}

#[test]
fn invalid_multiplier_is_rejected_up_front() {
    let config = GenConfig { account_multiplier: -0.5, ..GenConfig::default_test() };
    let result = GenerationOrchestrator::new(config, RunClock::now(730));
    assert!(matches!(result, Err(SeedError::InvalidConfig(_))));
}

#[test]
fn oversized_account_volume_is_rejected_up_front() {
    let config = GenConfig { account_multiplier: 1e30, ..GenConfig::default_test() };
    let result = GenerationOrchestrator::new(config, RunClock::now(730));
    assert!(matches!(result, Err(SeedError::InvalidConfig(_))));
}

#[test]
fn run_from_config_uses_the_wall_clock() {
    let data = run(&GenConfig::default_test()).unwrap();
    assert_eq!(data.users.len(), 12);
    assert_eq!(data.user_profiles.len(), 12);
    assert_eq!(data.accounts.len(), 18);
    assert_eq!(data.market_prices.len(), 4 * 730);

    let today = chrono::Local::now().date_naive();
    let latest = data.market_prices.iter().map(|p| p.date).max().unwrap();
    assert!((today - latest).num_days().abs() <= 1, "latest close {latest}, today {today}");
}

#[test]
fn sqlite_load_has_every_table_and_no_orphans() {
    let mut store = SqliteStore::in_memory().unwrap();
    let report = orchestrator(GenConfig::default_test()).run_into(&mut store).unwrap();

    assert_eq!(report.sink, "sqlite");
    assert_eq!(report.tables.len(), Dataset::TABLES.len());
    for (table, rows) in &report.tables {
        assert_eq!(store.row_count(table).unwrap(), *rows as i64, "{table}");
    }

    let links = [
        ("raw_user_profiles", "user_id", "raw_users", "user_id"),
        ("raw_kyc_checks", "user_id", "raw_users", "user_id"),
        ("raw_marketing_attribution", "user_id", "raw_users", "user_id"),
        ("raw_accounts", "user_id", "raw_users", "user_id"),
        ("raw_transactions", "account_id", "raw_accounts", "account_id"),
        ("raw_trades", "account_id", "raw_accounts", "account_id"),
        ("raw_trades", "product_id", "raw_products", "product_id"),
        ("raw_market_prices", "product_id", "raw_products", "product_id"),
        ("raw_user_logins", "user_id", "raw_users", "user_id"),
    ];
    for (child, fk, parent, pk) in links {
        assert_eq!(store.orphan_count(child, fk, parent, pk).unwrap(), 0, "{child}.{fk}");
    }

    assert_eq!(
        store.column_names("raw_transactions").unwrap(),
        ["transaction_id", "account_id", "timestamp", "amount", "type"]
    );
    assert_eq!(
        store.distinct_count("raw_user_profiles", "user_id").unwrap(),
        store.row_count("raw_users").unwrap()
    );
    assert!(store.min_real("raw_market_prices", "close_price").unwrap().unwrap() >= 0.01);
}

#[test]
fn second_run_replaces_first() {
    let mut store = SqliteStore::in_memory().unwrap();
    orchestrator(GenConfig { user_count: 20, ..GenConfig::default_test() })
        .run_into(&mut store)
        .unwrap();
    orchestrator(GenConfig { user_count: 5, ..GenConfig::default_test() })
        .run_into(&mut store)
        .unwrap();

    assert_eq!(store.row_count("raw_users").unwrap(), 5);
    assert_eq!(store.row_count("raw_accounts").unwrap(), 7);
}

/// Accepts tables until it reaches `fail_on`, then refuses.
struct FlakySink {
    fail_on: &'static str,
    loaded:  Vec<&'static str>,
}

impl Sink for FlakySink {
    fn name(&self) -> &'static str {
        "flaky"
    }

    fn load(&mut self, batch: &TableBatch) -> anyhow::Result<()> {
        if batch.table == self.fail_on {
            anyhow::bail!("disk full");
        }
        self.loaded.push(batch.table);
        Ok(())
    }
}

#[test]
fn sink_failure_names_the_table_and_stops() {
    let mut sink = FlakySink { fail_on: "raw_accounts", loaded: Vec::new() };
    let err = orchestrator(GenConfig::default_test()).run_into(&mut sink).unwrap_err();

    assert_eq!(err.failed_table(), Some("raw_accounts"));
    assert!(err.to_string().contains("disk full"), "{err}");
    assert_eq!(
        sink.loaded,
        ["raw_users", "raw_user_profiles", "raw_kyc_checks", "raw_marketing_attribution"]
    );
}
