//! Entity identity, versioning and timestamps, shared by composition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-managed fields every persisted entity carries.
///
/// Embedded by value in each entity struct (composition, not inheritance).
/// The store stamps it on insert and touches it on every persisted mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta<I> {
    id: I,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<I: Copy> EntityMeta<I> {
    /// First-persistence stamp: version 1, both timestamps set to `now`.
    pub fn stamped(id: I, now: DateTime<Utc>) -> Self {
        Self {
            id,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> I {
        self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a persisted mutation: bump the version and refresh the update
    /// timestamp. The creation timestamp never changes.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.version += 1;
        self.updated_at = now;
    }
}

/// Entity marker + minimal interface: identity and continuity across state
/// changes, with store-managed metadata embedded by composition.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn meta(&self) -> &EntityMeta<Self::Id>;

    fn meta_mut(&mut self) -> &mut EntityMeta<Self::Id>;

    fn id(&self) -> Self::Id {
        self.meta().id()
    }

    /// Monotonically increasing version of the entity's persisted state.
    fn version(&self) -> u64 {
        self.meta().version()
    }
}
