pub type RecordId = i64;

/// Anything the store caches must expose a stable integer id.
/// Values that return `None` cannot be cached and are rejected at upsert.
pub trait Record {
    fn record_id(&self) -> Option<RecordId>;
}

impl Record for serde_json::Value {
    fn record_id(&self) -> Option<RecordId> {
        self.get("id")?.as_i64()
    }
}
