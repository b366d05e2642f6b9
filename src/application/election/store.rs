//! # Election Store
//!
//! The single shared table of active elections. Every read-modify-write
//! happens on an [`ElectionTable`], which holds the store lock for its whole
//! lifetime, so a lookup and the mutation that depends on it are one atomic step.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, MutexGuard};

use super::record::{ElectionKey, ElectionRecord, VoteOutcome};

#[derive(Debug, Default)]
pub struct ElectionStore {
    records: Mutex<HashMap<ElectionKey, ElectionRecord>>,
    next_id: AtomicU64,
}

impl ElectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the critical section.
    pub async fn lock(&self) -> ElectionTable<'_> {
        ElectionTable {
            records: self.records.lock().await,
        }
    }

    /// Unique id for a new election, used to tell a stale timer from a live one.
    pub fn next_election_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Exclusive view of the election table.
pub struct ElectionTable<'a> {
    records: MutexGuard<'a, HashMap<ElectionKey, ElectionRecord>>,
}

impl ElectionTable<'_> {
    #[cfg(test)]
    pub fn find_active(&self, key: &ElectionKey) -> Option<&ElectionRecord> {
        self.records.get(key)
    }

    /// Insert a new record. Callers check `record_vote` within the same table guard first;
    /// an occupied key here means the table is corrupt.
    pub fn create(&mut self, record: ElectionRecord) {
        match self.records.entry(record.key().clone()) {
            Entry::Occupied(existing) => panic!(
                "two active elections for {:?}: {} and {}",
                existing.key(),
                existing.get().election_id(),
                record.election_id()
            ),
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    /// Append `voter_id` to the record's votes. `None` when no election is active for `key`.
    pub fn record_vote(&mut self, key: &ElectionKey, voter_id: &str) -> Option<VoteOutcome> {
        self.records.get_mut(key).map(|record| record.cast(voter_id))
    }

    /// Remove the record and disarm its expiry timer. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: &ElectionKey) -> Option<ElectionRecord> {
        let mut record = self.records.remove(key)?;
        record.cancel_expiry();
        Some(record)
    }

    /// Remove the record only if it is still the election identified by `election_id`.
    /// Used by the expiry timer, which must not abort itself.
    pub fn remove_if_current(&mut self, key: &ElectionKey, election_id: u64) -> Option<ElectionRecord> {
        match self.records.get(key) {
            Some(record) if record.election_id() == election_id => self.records.remove(key),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
