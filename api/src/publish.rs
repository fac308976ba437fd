use std::sync::Arc;

use query::{Completion, CompletionListener, SharedValue};
use store::EntityStore;

use crate::{
    cats::Cat,
    context::{CATS, SLIDESHOWS},
    slideshows::Slideshow,
};

/// Bridges completed operations into the entity store: every record a
/// read or write returned is upserted into its partition. Deletions are
/// not handled here; the delete endpoints remove their record directly.
pub(crate) struct StorePublisher {
    store: Arc<EntityStore>,
}

impl StorePublisher {
    pub(crate) fn new(store: Arc<EntityStore>) -> Self {
        Self { store }
    }

    fn publish(&self, value: &SharedValue) {
        if let Some(cats) = value.downcast_ref::<Vec<Cat>>() {
            for cat in cats {
                self.upsert(CATS, cat.clone());
            }
        } else if let Some(cat) = value.downcast_ref::<Cat>() {
            self.upsert(CATS, cat.clone());
        } else if let Some(slideshows) = value.downcast_ref::<Vec<Slideshow>>() {
            for slideshow in slideshows {
                self.upsert(SLIDESHOWS, slideshow.clone());
            }
        } else if let Some(slideshow) = value.downcast_ref::<Slideshow>() {
            self.upsert(SLIDESHOWS, slideshow.clone());
        }
    }

    fn upsert<R>(&self, namespace: &str, record: R)
    where
        R: store::Record + std::fmt::Debug + 'static,
    {
        if let Err(err) = self.store.upsert(namespace, record) {
            tracing::debug!(%err, namespace, "not cacheable, skipping");
        }
    }
}

impl CompletionListener for StorePublisher {
    fn on_completion(&self, completion: &Completion) {
        match completion {
            Completion::ReadSucceeded { value, .. }
            | Completion::WriteSucceeded { value, .. } => self.publish(value),
            Completion::WriteFailed { .. } => {}
        }
    }
}
