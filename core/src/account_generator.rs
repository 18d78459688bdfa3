use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{AccountId, IdSet, UserId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const ACCOUNT_TYPES: &[&str] = &["checking", "investment", "savings"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRow {
    pub account_id:   AccountId,
    pub user_id:      UserId,
    pub account_type: String,
    pub opened_at:    NaiveDateTime,
}

impl Record for AccountRow {
    const TABLE: &'static str = "raw_accounts";
    const COLUMNS: &'static [Column] = &[
        Column::new("account_id", ColumnKind::Text),
        Column::new("user_id", ColumnKind::Text),
        Column::new("account_type", ColumnKind::Text),
        Column::new("opened_at", ColumnKind::Timestamp),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.account_id.0.as_str().into(),
            self.user_id.0.as_str().into(),
            self.account_type.as_str().into(),
            self.opened_at.into(),
        ]
    }
}

/// `volume` accounts in total, each owned by a user picked uniformly
/// with replacement. Some users end up with none, some with several.
pub struct AccountGenerator;

impl EntityGenerator for AccountGenerator {
    type Parents<'p> = &'p IdSet<UserId>;
    type Row = AccountRow;
    const SLOT: GeneratorSlot = GeneratorSlot::Account;

    fn generate(
        &self,
        users: &IdSet<UserId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<AccountRow>> {
        users.require_for("account", volume)?;
        let accounts = (0..volume)
            .map(|_| AccountRow {
                account_id:   AccountId(ctx.ids.new_id()),
                user_id:      users.choose(&mut ctx.rng).clone(),
                account_type: ctx.rng.choose(ACCOUNT_TYPES).to_string(),
                opened_at:    ctx.clock.random_timestamp(&mut ctx.rng),
            })
            .collect();
        Ok(accounts)
    }
}

/// Accounts to open for `user_count` users, truncated toward zero.
pub fn account_volume(user_count: usize, multiplier: f64) -> usize {
    (user_count as f64 * multiplier).trunc() as usize
}

pub fn account_ids(accounts: &[AccountRow]) -> IdSet<AccountId> {
    accounts.iter().map(|a| a.account_id.clone()).collect()
}
