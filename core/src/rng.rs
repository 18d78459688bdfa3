//! Random number generation for the seeding pipeline.
//!
//! RULE: Generators never call a platform RNG directly.
//! All randomness flows through GenRng streams handed out by the
//! run's RngBank.
//!
//! The bank's master seed comes from OS entropy unless the config pins
//! one. Each generator gets its own stream, seeded from
//! (master_seed XOR slot_index * golden_ratio), so:
//!   - Adding a new generator never changes existing generators' streams.
//!   - A pinned seed replays a run exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Offset that separates a slot's identity stream from its field stream.
const IDENTITY_STREAM: u64 = 0x1000;

/// A named random stream for a single generator.
pub struct GenRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl GenRng {
    /// Create a stream from the master seed and a stable stream index.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// An unseeded stream, for callers outside an orchestrated run.
    pub fn from_entropy() -> Self {
        Self {
            name: "entropy",
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Roll an integer in [lo, hi].
    pub fn int_between(&mut self, lo: i64, hi: i64) -> i64 {
        self.inner.gen_range(lo..=hi)
    }

    /// Roll a float in [lo, hi].
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.inner.gen_range(lo..=hi)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// 16 random bytes, used to mint identifiers.
    pub fn next_bytes(&mut self) -> [u8; 16] {
        self.inner.gen()
    }

    /// Uniform pick from a non-empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        &items[index]
    }
}

/// All generator streams for a single run.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// A bank with a master seed drawn from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Field-value stream for a generator.
    pub fn for_generator(&self, slot: GeneratorSlot) -> GenRng {
        GenRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }

    /// Stream backing the identity pool of a generator.
    pub fn identity_stream(&self, slot: GeneratorSlot) -> GenRng {
        GenRng::new(self.master_seed, IDENTITY_STREAM + slot as u64).with_name("identity")
    }
}

/// Stable generator slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every generator's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum GeneratorSlot {
    User = 0,
    UserProfile = 1,
    KycCheck = 2,
    Account = 3,
    Product = 4,
    Transaction = 5,
    Trade = 6,
    MarketPrice = 7,
    LoginEvent = 8,
    MarketingAttribution = 9,
}

impl GeneratorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::UserProfile => "user_profile",
            Self::KycCheck => "kyc_check",
            Self::Account => "account",
            Self::Product => "product",
            Self::Transaction => "transaction",
            Self::Trade => "trade",
            Self::MarketPrice => "market_price",
            Self::LoginEvent => "login_event",
            Self::MarketingAttribution => "marketing_attribution",
        }
    }
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
