//! Identifier minting.

use crate::rng::GenRng;
use uuid::Builder;

/// Mints opaque, statistically unique identifiers.
///
/// Each token is a UUID v4 built from 128 random bits of the pool's own
/// stream. There is no counter: uniqueness is probabilistic (122 random
/// bits), which is enough for any volume a run produces.
pub struct IdentityPool {
    rng: GenRng,
}

impl IdentityPool {
    pub fn new(rng: GenRng) -> Self {
        Self { rng }
    }

    pub fn from_entropy() -> Self {
        Self::new(GenRng::from_entropy())
    }

    pub fn new_id(&mut self) -> String {
        Builder::from_random_bytes(self.rng.next_bytes())
            .into_uuid()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use uuid::{Uuid, Version};

    #[test]
    fn ids_are_v4_uuids() {
        let mut pool = IdentityPool::from_entropy();
        let id = pool.new_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version(), Some(Version::Random));
    }

    #[test]
    fn ids_do_not_collide() {
        let mut pool = IdentityPool::from_entropy();
        let ids: HashSet<String> = (0..10_000).map(|_| pool.new_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
