use std::any::Any;

use crate::{Partition, Record, RecordId, registry::StoreError};

pub(crate) trait PartitionAny {
    fn upsert_any(&self, record: Box<dyn Any>) -> Result<RecordId, StoreError>;
    fn remove_any(&self, id: RecordId) -> bool;
    fn get_any(&self, id: RecordId) -> Option<Box<dyn Any>>;
    fn all_any(&self) -> Vec<Box<dyn Any>>;
    fn count_any(&self) -> usize;
}

impl<R> PartitionAny for Partition<R>
where
    R: Record + Clone + 'static,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn upsert_any(&self, record: Box<dyn Any>) -> Result<RecordId, StoreError> {
        match record.downcast::<R>() {
            Ok(record) => self.upsert(*record),
            Err(_) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    "failed to downcast record to {}",
                    std::any::type_name::<R>()
                );

                Err(StoreError::RecordTypeMismatch)
            }
        }
    }

    fn remove_any(&self, id: RecordId) -> bool {
        self.remove(id).is_some()
    }

    fn get_any(&self, id: RecordId) -> Option<Box<dyn Any>> {
        self.get(id).map(|record| Box::new(record) as Box<dyn Any>)
    }

    fn all_any(&self) -> Vec<Box<dyn Any>> {
        self.all()
            .into_iter()
            .map(|record| Box::new(record) as Box<dyn Any>)
            .collect()
    }

    fn count_any(&self) -> usize {
        self.count()
    }
}
