use std::sync::Arc;

use error::OpError;

use crate::{QueryKey, snapshot::SharedValue};

/// Typed completion event, fanned out synchronously to every registered
/// listener after the corresponding operation settles.
#[derive(Clone)]
pub enum Completion {
    ReadSucceeded {
        query: QueryKey,
        value: SharedValue,
    },
    WriteSucceeded {
        operation: &'static str,
        value: SharedValue,
    },
    WriteFailed {
        operation: &'static str,
        error: Arc<OpError>,
    },
}

pub trait CompletionListener: Send + Sync {
    fn on_completion(&self, completion: &Completion);
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadSucceeded { query, .. } => f
                .debug_struct("ReadSucceeded")
                .field("query", query)
                .finish_non_exhaustive(),
            Self::WriteSucceeded { operation, .. } => f
                .debug_struct("WriteSucceeded")
                .field("operation", operation)
                .finish_non_exhaustive(),
            Self::WriteFailed { operation, error } => f
                .debug_struct("WriteFailed")
                .field("operation", operation)
                .field("error", error)
                .finish(),
        }
    }
}
