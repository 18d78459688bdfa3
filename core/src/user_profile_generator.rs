use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    name_generator::NameGenerator,
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{IdSet, UserId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 70;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfileRow {
    pub user_id:       UserId,
    pub first_name:    String,
    pub last_name:     String,
    pub date_of_birth: NaiveDate,
    pub address:       String,
}

impl Record for UserProfileRow {
    const TABLE: &'static str = "raw_user_profiles";
    const COLUMNS: &'static [Column] = &[
        Column::new("user_id", ColumnKind::Text),
        Column::new("first_name", ColumnKind::Text),
        Column::new("last_name", ColumnKind::Text),
        Column::new("dob", ColumnKind::Date),
        Column::new("address", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.user_id.0.as_str().into(),
            self.first_name.as_str().into(),
            self.last_name.as_str().into(),
            self.date_of_birth.into(),
            self.address.as_str().into(),
        ]
    }
}

/// `volume` profiles per user; the orchestrator asks for exactly one.
pub struct UserProfileGenerator;

impl EntityGenerator for UserProfileGenerator {
    type Parents<'p> = &'p IdSet<UserId>;
    type Row = UserProfileRow;
    const SLOT: GeneratorSlot = GeneratorSlot::UserProfile;

    fn generate(
        &self,
        users: &IdSet<UserId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<UserProfileRow>> {
        users.require_for("user_profile", volume)?;
        let mut profiles = Vec::with_capacity(users.len() * volume);
        for user_id in users {
            for _ in 0..volume {
                profiles.push(UserProfileRow {
                    user_id:       user_id.clone(),
                    first_name:    NameGenerator::first_name(&mut ctx.rng).to_string(),
                    last_name:     NameGenerator::last_name(&mut ctx.rng).to_string(),
                    date_of_birth: ctx.clock.random_birth_date(&mut ctx.rng, MIN_AGE, MAX_AGE),
                    address:       NameGenerator::address(&mut ctx.rng),
                });
            }
        }
        Ok(profiles)
    }
}
