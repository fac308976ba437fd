mod cfg_debug;
mod partition;
mod partition_any;
mod record;
mod registry;

pub use partition::Partition;
pub use record::{Record, RecordId};
pub use registry::{EntityStore, StoreError};
