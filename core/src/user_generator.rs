use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    name_generator::NameGenerator,
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{IdSet, UserId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub const USER_STATUSES: &[&str] = &["active", "suspended", "pending_verification"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRow {
    pub user_id:    UserId,
    pub created_at: NaiveDateTime,
    pub email:      String,
    pub status:     String,
}

impl Record for UserRow {
    const TABLE: &'static str = "raw_users";
    const COLUMNS: &'static [Column] = &[
        Column::new("user_id", ColumnKind::Text),
        Column::new("created_at", ColumnKind::Timestamp),
        Column::new("email", ColumnKind::Text),
        Column::new("status", ColumnKind::Text),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.user_id.0.as_str().into(),
            self.created_at.into(),
            self.email.as_str().into(),
            self.status.as_str().into(),
        ]
    }
}

/// Root of the dataset: `volume` users.
pub struct UserGenerator;

impl EntityGenerator for UserGenerator {
    type Parents<'p> = ();
    type Row = UserRow;
    const SLOT: GeneratorSlot = GeneratorSlot::User;

    fn generate(&self, _parents: (), volume: usize, ctx: &mut GenContext) -> SeedResult<Vec<UserRow>> {
        let users = (0..volume)
            .map(|_| UserRow {
                user_id:    UserId(ctx.ids.new_id()),
                created_at: ctx.clock.random_timestamp(&mut ctx.rng),
                email:      NameGenerator::email(&mut ctx.rng),
                status:     ctx.rng.choose(USER_STATUSES).to_string(),
            })
            .collect();
        Ok(users)
    }
}

pub fn user_ids(users: &[UserRow]) -> IdSet<UserId> {
    users.iter().map(|u| u.user_id.clone()).collect()
}
