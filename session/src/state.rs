use crate::AccessToken;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    SignedOut,
    Resuming,
    SignedIn(AccessToken),
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        match self {
            Self::SignedIn(token) => Some(token),
            _ => None,
        }
    }
}

/// One-shot guard for the startup resume attempt. Once `Attempted`,
/// `Resuming` is never entered again for the lifetime of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResumeAttempt {
    NotAttempted,
    Attempted,
}
