//! Referentially consistent synthetic data for a fintech warehouse.
//!
//! Users, accounts, products and their activity are generated as a
//! dependency DAG (see orchestrator.rs for the order) and handed to a
//! Sink one full table at a time.

pub mod account_generator;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod identity;
pub mod kyc_generator;
pub mod login_generator;
pub mod market_price_generator;
pub mod marketing_generator;
pub mod name_generator;
pub mod orchestrator;
pub mod product_generator;
pub mod record;
pub mod rng;
pub mod sink;
pub mod store;
pub mod trade_generator;
pub mod transaction_generator;
pub mod types;
pub mod user_generator;
pub mod user_profile_generator;

pub use config::GenConfig;
pub use dataset::Dataset;
pub use error::{SeedError, SeedResult};
pub use orchestrator::{GenerationOrchestrator, RunReport};
pub use sink::{JsonLinesSink, Sink};
pub use store::SqliteStore;
