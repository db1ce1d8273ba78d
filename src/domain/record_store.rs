//! Current search result set.
//!
//! The store holds one immutable [`Snapshot`] at a time: association records,
//! the category catalog and the sequence number of the search that produced
//! them. A snapshot is only ever replaced as a whole, through a
//! [`tokio::sync::watch`] channel, so observers never see records from one
//! search paired with categories from another.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::aggregation::{InstructorGroup, build_hierarchy};
use crate::domain::entities::{AssociationRecord, Category};

/// Records and categories committed together by one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub records: Vec<AssociationRecord>,
    pub categories: Vec<Category>,
    /// Sequence number of the search that produced this snapshot; 0 before
    /// the first successful search.
    pub seq: u64,
}

impl Snapshot {
    /// Derives the display hierarchy of this snapshot.
    pub fn hierarchy(&self) -> Vec<InstructorGroup> {
        build_hierarchy(&self.records, &self.categories)
    }
}

/// Shared handle to the current snapshot.
///
/// Cloning the store yields another handle to the same snapshot.
#[derive(Debug, Clone)]
pub struct RecordStore {
    tx: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Snapshot::default()));
        Self { tx: Arc::new(tx) }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    /// Sequence number of the last applied search.
    pub fn latest_applied(&self) -> u64 {
        self.tx.borrow().seq
    }

    /// Receiver notified every time a newer snapshot is applied.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.tx.subscribe()
    }

    /// Replaces the snapshot if `seq` is newer than the one currently held.
    ///
    /// The comparison and the write happen under the channel lock. Returns
    /// false, leaving the store untouched, for a stale `seq`.
    pub fn apply(&self, seq: u64, records: Vec<AssociationRecord>, categories: Vec<Category>) -> bool {
        let mut pending = Some((records, categories));

        self.tx.send_if_modified(|current| {
            if seq <= current.seq {
                return false;
            }
            if let Some((records, categories)) = pending.take() {
                *current = Arc::new(Snapshot {
                    records,
                    categories,
                    seq,
                });
            }
            true
        })
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
