use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{IdSet, UserId},
};
use serde::{Deserialize, Serialize};

pub const SIGNUP_SOURCES: &[&str] = &["google", "facebook_ad", "organic", "referral"];
pub const CAMPAIGNS: &[&str] = &["q4_promo", "summer_drive", "none"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketingAttributionRow {
    pub user_id:       UserId,
    pub signup_source: String,
    pub campaign:      String,
}

impl Record for MarketingAttributionRow {
    const TABLE: &'static str = "raw_marketing_attribution";
    const COLUMNS: &'static [Column] = &[
        Column::new("user_id", ColumnKind::Text),
        Column::new("signup_source", ColumnKind::Text),
        Column::new("campaign", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.user_id.0.as_str().into(),
            self.signup_source.as_str().into(),
            self.campaign.as_str().into(),
        ]
    }
}

/// Where each user came from. One row per user in a normal run.
pub struct MarketingAttributionGenerator;

impl EntityGenerator for MarketingAttributionGenerator {
    type Parents<'p> = &'p IdSet<UserId>;
    type Row = MarketingAttributionRow;
    const SLOT: GeneratorSlot = GeneratorSlot::MarketingAttribution;

    fn generate(
        &self,
        users: &IdSet<UserId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<MarketingAttributionRow>> {
        users.require_for("marketing_attribution", volume)?;
        let rows = users
            .iter()
            .flat_map(|user_id| std::iter::repeat(user_id).take(volume))
            .map(|user_id| MarketingAttributionRow {
                user_id:       user_id.clone(),
                signup_source: ctx.rng.choose(SIGNUP_SOURCES).to_string(),
                campaign:      ctx.rng.choose(CAMPAIGNS).to_string(),
            })
            .collect();
        Ok(rows)
    }
}
