use std::any::Any;
use std::sync::Arc;

use error::OpError;

pub type SharedValue = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Pending,
    Success,
    Error,
}

/// Observable state of one query entry. While a refresh is pending the
/// previous value is retained, so subscribers can keep showing stale data.
/// Invariant: `error` is `Some` iff `status` is `Error`.
#[derive(Clone)]
pub struct QuerySnapshot {
    status: QueryStatus,
    value: Option<SharedValue>,
    error: Option<Arc<OpError>>,
}

impl QuerySnapshot {
    pub(crate) fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            value: None,
            error: None,
        }
    }

    pub(crate) fn pending(last_value: Option<SharedValue>) -> Self {
        Self {
            status: QueryStatus::Pending,
            value: last_value,
            error: None,
        }
    }

    pub(crate) fn success(value: SharedValue) -> Self {
        Self {
            status: QueryStatus::Success,
            value: Some(value),
            error: None,
        }
    }

    pub(crate) fn failure(last_value: Option<SharedValue>, error: Arc<OpError>) -> Self {
        Self {
            status: QueryStatus::Error,
            value: last_value,
            error: Some(error),
        }
    }

    pub fn status(&self) -> QueryStatus {
        self.status
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.status, QueryStatus::Success | QueryStatus::Error)
    }

    pub fn value<V>(&self) -> Option<V>
    where
        V: Clone + 'static,
    {
        self.value.as_ref()?.downcast_ref::<V>().cloned()
    }

    pub fn error(&self) -> Option<Arc<OpError>> {
        self.error.clone()
    }

    pub(crate) fn last_value(&self) -> Option<SharedValue> {
        self.value.clone()
    }
}

impl std::fmt::Debug for QuerySnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySnapshot")
            .field("status", &self.status)
            .field("has_value", &self.value.is_some())
            .field("error", &self.error)
            .finish()
    }
}
