use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use thiserror::Error;

use taproom_core::{DomainError, DomainResult, Entity, EntityMeta, ExpectedVersion, RecordId};

/// Storage-boundary failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Conditional write rejected: the record moved since it was read.
    #[error("stale version: expected {expected:?}, found {actual}")]
    StaleVersion {
        expected: ExpectedVersion,
        actual: u64,
    },

    /// The mutation itself was rejected by domain logic; nothing was written.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A writer panicked while holding the lock.
    #[error("store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory identity-indexed store for one entity type.
///
/// Records live in a single map keyed by their typed id; identities come from
/// a per-arena sequence assigned on insert. Writes go through
/// [`Arena::update`], a conditional write that checks an [`ExpectedVersion`]
/// before committing.
///
/// Intended for tests/dev-scale data sets. Not optimized for performance.
#[derive(Debug)]
pub struct Arena<T: Entity> {
    inner: RwLock<Slots<T>>,
}

#[derive(Debug)]
struct Slots<T: Entity> {
    records: HashMap<T::Id, T>,
    next_id: i64,
}

impl<T> Arena<T>
where
    T: Entity + Clone,
    T::Id: From<RecordId> + Ord,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Slots {
                records: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Persist a new record. The store assigns the identity and stamps the
    /// metadata: version 1, creation and update timestamps set once.
    pub fn insert<F>(&self, build: F) -> StoreResult<T>
    where
        F: FnOnce(EntityMeta<T::Id>) -> T,
    {
        let mut slots = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = T::Id::from(RecordId::from_i64(slots.next_id));
        slots.next_id += 1;
        let record = build(EntityMeta::stamped(id, Utc::now()));
        slots.records.insert(record.id(), record.clone());
        Ok(record)
    }

    /// Clone-out read. Absent ids (and a poisoned lock) read as absent.
    pub fn get(&self, id: T::Id) -> Option<T> {
        let slots = self.inner.read().ok()?;
        slots.records.get(&id).cloned()
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Clone-out scan of every record, ordered by id.
    pub fn list(&self) -> Vec<T> {
        let slots = match self.inner.read() {
            Ok(s) => s,
            Err(_) => return Vec::new(),
        };
        let mut records: Vec<T> = slots.records.values().cloned().collect();
        records.sort_by_key(|r| r.id());
        records
    }

    /// Conditional write.
    ///
    /// Absent ids return `Ok(None)`: the not-found sentinel, not an error. A
    /// version mismatch rejects with [`StoreError::StaleVersion`]; a mutation
    /// error rejects with [`StoreError::Domain`]. In both cases the stored
    /// record is untouched. On success the version is bumped and the update
    /// timestamp refreshed.
    pub fn update<F>(&self, id: T::Id, expected: ExpectedVersion, mutate: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(&mut T) -> DomainResult<()>,
    {
        let mut slots = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let Some(stored) = slots.records.get_mut(&id) else {
            return Ok(None);
        };

        let actual = stored.version();
        if !expected.matches(actual) {
            return Err(StoreError::StaleVersion { expected, actual });
        }

        let mut working = stored.clone();
        mutate(&mut working)?;
        working.meta_mut().touch(Utc::now());
        *stored = working.clone();
        Ok(Some(working))
    }

    /// Remove a record. Returns `false` when absent.
    pub fn remove(&self, id: T::Id) -> StoreResult<bool> {
        let mut slots = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        Ok(slots.records.remove(&id).is_some())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|s| s.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Arena<T>
where
    T: Entity + Clone,
    T::Id: From<RecordId> + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}
