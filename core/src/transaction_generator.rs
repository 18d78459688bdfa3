use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::{round_to, GeneratorSlot},
    types::{AccountId, EntityId, IdSet},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const MIN_AMOUNT: f64 = 10.0;
pub const MAX_AMOUNT: f64 = 5_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Deposit, TransactionType::Withdrawal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit    => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }

    /// Withdrawals move money out, so they carry a negative amount.
    pub fn signed(&self, magnitude: f64) -> f64 {
        match self {
            Self::Deposit    => magnitude,
            Self::Withdrawal => -magnitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRow {
    pub transaction_id:   EntityId,
    pub account_id:       AccountId,
    pub timestamp:        NaiveDateTime,
    pub amount:           f64,
    pub transaction_type: TransactionType,
}

impl Record for TransactionRow {
    const TABLE: &'static str = "raw_transactions";
    const COLUMNS: &'static [Column] = &[
        Column::new("transaction_id", ColumnKind::Text),
        Column::new("account_id", ColumnKind::Text),
        Column::new("timestamp", ColumnKind::Timestamp),
        Column::new("amount", ColumnKind::Real),
        Column::new("type", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.transaction_id.as_str().into(),
            self.account_id.0.as_str().into(),
            self.timestamp.into(),
            self.amount.into(),
            self.transaction_type.as_str().into(),
        ]
    }
}

/// Exactly `volume` cash movements per account.
pub struct TransactionGenerator;

impl EntityGenerator for TransactionGenerator {
    type Parents<'p> = &'p IdSet<AccountId>;
    type Row = TransactionRow;
    const SLOT: GeneratorSlot = GeneratorSlot::Transaction;

    fn generate(
        &self,
        accounts: &IdSet<AccountId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<TransactionRow>> {
        accounts.require_for("transaction", volume)?;
        let mut transactions = Vec::with_capacity(accounts.len() * volume);
        for account_id in accounts {
            for _ in 0..volume {
                let transaction_type = *ctx.rng.choose(&TransactionType::ALL);
                let magnitude = round_to(ctx.rng.uniform(MIN_AMOUNT, MAX_AMOUNT), 2);
                transactions.push(TransactionRow {
                    transaction_id: ctx.ids.new_id(),
                    account_id: account_id.clone(),
                    timestamp: ctx.clock.random_timestamp(&mut ctx.rng),
                    amount: transaction_type.signed(magnitude),
                    transaction_type,
                });
            }
        }
        Ok(transactions)
    }
}
