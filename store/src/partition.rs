use dashmap::DashMap;

use crate::{Record, RecordId, registry::StoreError};

/// One resource type's id -> record map. Last write wins, no merge.
/// Entries only ever leave through `remove`; there is no timer eviction.
pub struct Partition<R> {
    records: DashMap<RecordId, R>,
}

impl<R> Partition<R>
where
    R: Record + Clone,
{
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn upsert(&self, record: R) -> Result<RecordId, StoreError> {
        let id = record.record_id().ok_or(StoreError::MissingRecordId)?;
        self.records.insert(id, record);
        Ok(id)
    }

    pub fn remove(&self, id: RecordId) -> Option<R> {
        self.records.remove(&id).map(|(_, record)| record)
    }

    pub fn get(&self, id: RecordId) -> Option<R> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    pub fn all(&self) -> Vec<R> {
        self.records
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.records
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl<R> Default for Partition<R>
where
    R: Record + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
