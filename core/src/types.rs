//! Shared primitive types: entity identifiers and identifier sets.
//!
//! RULE: Generators never look parents up in shared tables.
//! A child generator receives the parent's IdSet as an argument,
//! and that set is complete before the child runs.

use crate::{
    error::{SeedError, SeedResult},
    rng::GenRng,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier owned by an entity that nothing references.
pub type EntityId = String;

/// An identifier that child entities reference through a foreign key.
pub trait ParentId: Clone + fmt::Debug + PartialEq {
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;

    fn as_str(&self) -> &str;
}

macro_rules! parent_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl ParentId for $name {
            const ENTITY: &'static str = $entity;

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }
    };
}

parent_id!(UserId, "user");
parent_id!(AccountId, "account");
parent_id!(ProductId, "product");

/// The full, ordered identifier set of one parent entity.
#[derive(Debug, Clone, PartialEq)]
pub struct IdSet<K> {
    ids: Vec<K>,
}

impl<K: ParentId> IdSet<K> {
    pub fn new(ids: Vec<K>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, K> {
        self.ids.iter()
    }

    pub fn contains(&self, id: &K) -> bool {
        self.ids.contains(id)
    }

    /// Fails when `child` wants `volume > 0` rows but there is no parent
    /// to reference.
    pub fn require_for(&self, child: &'static str, volume: usize) -> SeedResult<()> {
        if volume > 0 && self.ids.is_empty() {
            return Err(SeedError::EmptyParentSet {
                child,
                parent: K::ENTITY,
                volume,
            });
        }
        Ok(())
    }

    /// Uniform pick with replacement. Callers check `require_for` first.
    pub fn choose(&self, rng: &mut GenRng) -> &K {
        rng.choose(&self.ids)
    }
}

impl<K: ParentId> FromIterator<K> for IdSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, K> IntoIterator for &'a IdSet<K> {
    type Item = &'a K;
    type IntoIter = std::slice::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
