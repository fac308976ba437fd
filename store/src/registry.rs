use dashmap::DashMap;

use crate::{Partition, Record, RecordId, cfg_debug::CfgDebug, partition_any::PartitionAny};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record has no usable id, refusing to cache it")]
    MissingRecordId,

    #[error("no partition registered under namespace {0:?}")]
    UnknownPartition(String),

    #[error("record type does not match the partition's record type")]
    RecordTypeMismatch,
}

/// Process-wide normalized record store, one partition per resource type.
/// Construct once at startup and share; partitions are registered up front
/// with `ensure_partition`.
pub struct EntityStore {
    partitions: DashMap<&'static str, Box<dyn PartitionAny + Send + Sync>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            partitions: DashMap::new(),
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?namespace), skip_all)
    )]
    pub fn ensure_partition<R>(&self, namespace: &'static str)
    where
        R: Record + Clone + Send + Sync + 'static,
    {
        match self.partitions.entry(namespace) {
            dashmap::Entry::Occupied(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!("partition already exists");
            }
            dashmap::Entry::Vacant(entry) => {
                entry.insert(Box::new(Partition::<R>::new()));

                #[cfg(feature = "tracing")]
                tracing::debug!("new partition registered");
            }
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?namespace, ?record), skip_all, ret)
    )]
    pub fn upsert<R>(&self, namespace: &str, record: R) -> Result<RecordId, StoreError>
    where
        R: Record + CfgDebug + 'static,
    {
        match self.partitions.get(namespace) {
            Some(partition) => partition.upsert_any(Box::new(record)),
            None => Err(StoreError::UnknownPartition(namespace.to_string())),
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?namespace, ?id), skip_all, ret)
    )]
    pub fn remove(&self, namespace: &str, id: RecordId) -> bool {
        match self.partitions.get(namespace) {
            Some(partition) => partition.remove_any(id),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("namespace not found");

                false
            }
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?namespace, ?id), skip_all, ret)
    )]
    pub fn get<R>(&self, namespace: &str, id: RecordId) -> Option<R>
    where
        R: Record + CfgDebug + 'static,
    {
        self.partitions
            .get(namespace)
            .or_else(|| {
                #[cfg(feature = "tracing")]
                tracing::debug!("namespace not found");

                None
            })?
            .get_any(id)?
            .downcast::<R>()
            .inspect_err(|_| {
                #[cfg(feature = "tracing")]
                tracing::debug!("failed to downcast record to {}", std::any::type_name::<R>());
            })
            .ok()
            .map(|record| *record)
    }

    pub fn all<R>(&self, namespace: &str) -> Vec<R>
    where
        R: Record + 'static,
    {
        match self.partitions.get(namespace) {
            Some(partition) => partition
                .all_any()
                .into_iter()
                .filter_map(|record| record.downcast::<R>().ok())
                .map(|record| *record)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn count(&self, namespace: &str) -> usize {
        self.partitions
            .get(namespace)
            .map(|partition| partition.count_any())
            .unwrap_or(0)
    }

    pub fn filter<R>(&self, namespace: &str, predicate: impl Fn(&R) -> bool) -> Vec<R>
    where
        R: Record + 'static,
    {
        let mut records = self.all::<R>(namespace);
        records.retain(|record| predicate(record));
        records
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
