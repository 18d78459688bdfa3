//! seed-runner: generate the fintech raw dataset and load it.
//!
//! Usage:
//!   seed-runner --db fintech_dw.db
//!   seed-runner --config seed.json --seed 12345 --db run.db
//!   seed-runner --users 50 --products 5 --jsonl-dir ./out
//!   seed-runner --as-of 2024-12-31 --db snapshot.db

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fintech_seed_core::{
    clock::RunClock, GenConfig, GenerationOrchestrator, JsonLinesSink, RunReport, SeedError,
    Sink, SqliteStore,
};
use std::{env, process::ExitCode};

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("seed run failed: {e:#}");
            eprintln!("seed run failed: {e:#}");
            if let Some(table) = e.downcast_ref::<SeedError>().and_then(SeedError::failed_table) {
                eprintln!("  failed table: {table}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<RunReport> {
    let args: Vec<String> = env::args().collect();

    let mut config = match find_arg(&args, "--config") {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::default(),
    };
    config.user_count = parse_arg(&args, "--users", config.user_count);
    config.product_count = parse_arg(&args, "--products", config.product_count);
    if let Some(seed) = find_arg(&args, "--seed") {
        config.seed = Some(seed.parse().with_context(|| format!("bad --seed value {seed:?}"))?);
    }

    let clock = match find_arg(&args, "--as-of") {
        Some(raw) => {
            let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("bad --as-of date {raw:?}, expected YYYY-MM-DD"))?;
            let end_of_day = date.and_hms_opt(23, 59, 59).context("invalid --as-of time")?;
            RunClock::new(end_of_day, config.activity_window_days)
        }
        None => RunClock::now(config.activity_window_days),
    };

    let mut sink: Box<dyn Sink> = match find_arg(&args, "--jsonl-dir") {
        Some(dir) => Box::new(JsonLinesSink::new(dir)?),
        None => {
            let db = find_arg(&args, "--db").unwrap_or("fintech_dw.db");
            Box::new(SqliteStore::open(db)?)
        }
    };

    println!("fintech-seed — seed-runner");
    println!("  users:     {}", config.user_count);
    println!("  accounts:  x{}", config.account_multiplier);
    println!("  products:  {}", config.product_count);
    println!("  as of:     {}", clock.as_of);
    println!("  sink:      {}", sink.name());
    println!();

    let orchestrator = GenerationOrchestrator::new(config, clock)?;
    let report = orchestrator.run_into(sink.as_mut())?;
    Ok(report)
}

fn print_summary(report: &RunReport) {
    println!("=== RUN SUMMARY ===");
    println!("  master seed: {} (pass --seed to replay)", report.master_seed);
    for (table, rows) in &report.tables {
        println!("  {table:<28} {rows:>9}");
    }
    println!("  {:<28} {:>9}", "total", report.total_rows());
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
