use std::marker::PhantomData;
use std::sync::Arc;

use error::OpError;
use tokio::sync::watch;

use crate::snapshot::{QuerySnapshot, QueryStatus};

#[derive(thiserror::Error, Debug, Clone)]
pub enum SubscriptionError {
    #[error("{0}")]
    Op(Arc<OpError>),

    #[error("query entry was evicted while awaited")]
    Evicted,

    #[error("cached result does not match the requested type")]
    TypeMismatch,
}

/// A caller's handle on one query entry. Dropping it unsubscribes;
/// dropping the last one never cancels the in-flight operation.
pub struct Subscription<V> {
    receiver: watch::Receiver<QuerySnapshot>,
    result: PhantomData<fn() -> V>,
}

impl<V> Subscription<V>
where
    V: Clone + 'static,
{
    pub(crate) fn new(receiver: watch::Receiver<QuerySnapshot>) -> Self {
        Self {
            receiver,
            result: PhantomData,
        }
    }

    pub fn snapshot(&self) -> QuerySnapshot {
        self.receiver.borrow().clone()
    }

    pub fn status(&self) -> QueryStatus {
        self.receiver.borrow().status()
    }

    pub fn value(&self) -> Option<V> {
        self.receiver.borrow().value()
    }

    pub fn error(&self) -> Option<Arc<OpError>> {
        self.receiver.borrow().error()
    }

    /// Next state transition. Snapshots are observed monotonically: a
    /// subscriber can never see an older state after a newer one.
    pub async fn changed(&mut self) -> Result<QuerySnapshot, SubscriptionError> {
        self.receiver
            .changed()
            .await
            .map_err(|_| SubscriptionError::Evicted)?;
        Ok(self.receiver.borrow_and_update().clone())
    }

    /// Resolves with the first settled state observed at or after this
    /// call: immediately when the entry is already settled (the
    /// cache-first path), otherwise once the in-flight operation lands.
    pub async fn settled(&mut self) -> Result<V, SubscriptionError> {
        loop {
            let snapshot = self.receiver.borrow_and_update().clone();

            if let Some(error) = snapshot.error() {
                return Err(SubscriptionError::Op(error));
            }
            if snapshot.status() == QueryStatus::Success {
                return snapshot.value().ok_or(SubscriptionError::TypeMismatch);
            }

            self.receiver
                .changed()
                .await
                .map_err(|_| SubscriptionError::Evicted)?;
        }
    }
}
