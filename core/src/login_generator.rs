use crate::{
    error::SeedResult,
    generator::{EntityGenerator, GenContext},
    record::{Column, ColumnKind, FieldValue, Record},
    rng::GeneratorSlot,
    types::{EntityId, IdSet, UserId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginEventRow {
    pub login_id:        EntityId,
    pub user_id:         UserId,
    pub login_timestamp: NaiveDateTime,
}

impl Record for LoginEventRow {
    const TABLE: &'static str = "raw_user_logins";
    const COLUMNS: &'static [Column] = &[
        Column::new("login_id", ColumnKind::Text),
        Column::new("user_id", ColumnKind::Text),
        Column::new("login_timestamp", ColumnKind::Timestamp),
    ];

    fn values(&self) -> Vec<FieldValue> {
        vec![
            self.login_id.as_str().into(),
            self.user_id.0.as_str().into(),
            self.login_timestamp.into(),
        ]
    }
}

/// `volume` logins per user. Timestamps are independent draws, not sorted.
pub struct LoginEventGenerator;

impl EntityGenerator for LoginEventGenerator {
    type Parents<'p> = &'p IdSet<UserId>;
    type Row = LoginEventRow;
    const SLOT: GeneratorSlot = GeneratorSlot::LoginEvent;

    fn generate(
        &self,
        users: &IdSet<UserId>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<LoginEventRow>> {
        users.require_for("login_event", volume)?;
        let mut logins = Vec::with_capacity(users.len() * volume);
        for user_id in users {
            for _ in 0..volume {
                logins.push(LoginEventRow {
                    login_id:        ctx.ids.new_id(),
                    user_id:         user_id.clone(),
                    login_timestamp: ctx.clock.random_timestamp(&mut ctx.rng),
                });
            }
        }
        Ok(logins)
    }
}
