/// Failure value of a remote operation, as reported by the invoker.
/// Surfaced once to every observer; never retried by the core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    #[error("remote operation failed with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl OpError {
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
