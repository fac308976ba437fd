mod completion;
mod coordinator;
mod key;
mod snapshot;
mod subscription;
mod tag;

pub use completion::{Completion, CompletionListener};
pub use coordinator::QueryCoordinator;
pub use key::{ParamsError, QueryKey};
pub use snapshot::{QuerySnapshot, QueryStatus, SharedValue};
pub use subscription::{Subscription, SubscriptionError};
pub use tag::Tag;
