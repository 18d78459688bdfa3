use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{EntityId, IdSet, UserId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const KYC_STATUSES: &[&str] = &["approved", "failed", "pending"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KycCheckRow {
    pub kyc_id:     EntityId,
    pub user_id:    UserId,
    pub status:     String,
    pub checked_at: NaiveDateTime,
}

impl Record for KycCheckRow {
    const TABLE: &'static str = "raw_kyc_checks";
    const COLUMNS: &'static [Column] = &[
        Column::new("kyc_id", ColumnKind::Text),
        Column::new("user_id", ColumnKind::Text),
        Column::new("status", ColumnKind::Text),
        Column::new("checked_at", ColumnKind::Timestamp),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.kyc_id.as_str().into(),
            self.user_id.0.as_str().into(),
            self.status.as_str().into(),
            self.checked_at.into(),
        ]
    }
}

/// `volume` identity checks per user.
pub struct KycCheckGenerator;

impl EntityGenerator for KycCheckGenerator {
    type Parents<'p> = &'p IdSet<UserId>;
    type Row = KycCheckRow;
    const SLOT: GeneratorSlot = GeneratorSlot::KycCheck;

    fn generate(
        &self,
        users: &IdSet<UserId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<KycCheckRow>> {
        users.require_for("kyc_check", volume)?;
        let mut checks = Vec::with_capacity(users.len() * volume);
        for user_id in users {
            for _ in 0..volume {
                checks.push(KycCheckRow {
                    kyc_id:     ctx.ids.new_id(),
                    user_id:    user_id.clone(),
                    status:     ctx.rng.choose(KYC_STATUSES).to_string(),
                    checked_at: ctx.clock.random_timestamp(&mut ctx.rng),
                });
            }
        }
        Ok(checks)
    }
}
