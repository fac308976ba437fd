use crate::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Screens only a signed-in user may see.
    Authenticated,
    /// Sign-in / sign-up screens, hidden from signed-in users.
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Placeholder,
    RedirectToLogin,
    RedirectToHome,
}

/// Pure function of the current session state; guards never do I/O.
pub fn evaluate(mode: AccessMode, state: &SessionState) -> GuardOutcome {
    match (mode, state) {
        (_, SessionState::Resuming) => GuardOutcome::Placeholder,
        (AccessMode::Authenticated, SessionState::SignedIn(_)) => GuardOutcome::Render,
        (AccessMode::Authenticated, SessionState::SignedOut) => GuardOutcome::RedirectToLogin,
        (AccessMode::Anonymous, SessionState::SignedIn(_)) => GuardOutcome::RedirectToHome,
        (AccessMode::Anonymous, SessionState::SignedOut) => GuardOutcome::Render,
    }
}
