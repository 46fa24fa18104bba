//! # Snapshots
//!
//! Immutable views of a whole collection, handed to subscribers after every
//! applied write.

use crate::entity::FeedEntity;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// A point-in-time copy of a collection.
///
/// `revision` starts at 0 for the empty collection and grows by one for every
/// applied mutation, so two subscribers holding the same revision hold the same
/// records.
pub struct Snapshot<T: FeedEntity> {
    revision: u64,
    records: Arc<BTreeMap<T::Id, T>>,
}

impl<T: FeedEntity> Snapshot<T> {
    pub(crate) fn new(revision: u64, records: Arc<BTreeMap<T::Id, T>>) -> Self {
        Self { revision, records }
    }

    /// The empty collection at revision 0.
    pub fn empty() -> Self {
        Self::new(0, Arc::new(BTreeMap::new()))
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.records.contains_key(id)
    }

    /// Records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&T::Id, &T)> {
        self.records.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: FeedEntity> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            revision: self.revision,
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: FeedEntity> Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("revision", &self.revision)
            .field("len", &self.records.len())
            .finish()
    }
}
