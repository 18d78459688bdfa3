//! Entity generator trait and generation context.
//!
//! RULE: Every entity type has exactly one EntityGenerator.
//! A generator is a pure function of its declared parent identifier
//! sets, the requested volume and its own random streams.
//! The orchestrator calls generators in the order documented in
//! orchestrator.rs.

use crate::{
    clock::RunClock,
    error::SeedResult,
    identity::IdentityPool,
    record::Record,
    rng::{GenRng, GeneratorSlot, RngBank},
};

/// Everything a generator may draw from: its own field stream, its own
/// identity pool, and the shared run clock.
pub struct GenContext {
    pub rng:   GenRng,
    pub ids:   IdentityPool,
    pub clock: RunClock,
}

impl GenContext {
    pub fn new(bank: &RngBank, slot: GeneratorSlot, clock: RunClock) -> Self {
        Self {
            rng:   bank.for_generator(slot),
            ids:   IdentityPool::new(bank.identity_stream(slot)),
            clock,
        }
    }
}

/// The contract every entity generator fulfils.
pub trait EntityGenerator {
    /// Parent identifier sets this entity references; `()` for roots.
    type Parents<'p>;

    type Row: Record;

    /// Stable random-stream slot.
    const SLOT: GeneratorSlot;

    /// Produce rows in generation order.
    ///
    /// What `volume` counts depends on the entity: total rows for roots
    /// and accounts, rows per parent for fan-out entities, days per
    /// product for the price series. Fails with `EmptyParentSet` when
    /// `volume > 0` but a required parent set is empty.
    fn generate(
        &self,
        parents: Self::Parents<'_>,
        volume: usize,
        ctx: &mut GenContext,
    ) -> SeedResult<Vec<Self::Row>>;
}
