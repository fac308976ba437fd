use std::sync::Mutex;

use error::OpError;
use tokio::sync::watch;

use crate::{AccessToken, SessionState, state::ResumeAttempt};

/// Process-wide authentication state machine:
/// signed-out -> resuming -> signed-in | signed-out, with login and
/// logout transitions afterwards. Constructed once at startup.
pub struct SessionGate {
    state: watch::Sender<SessionState>,
    resume: Mutex<ResumeAttempt>,
}

impl SessionGate {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::SignedOut);
        Self {
            state,
            resume: Mutex::new(ResumeAttempt::NotAttempted),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn access_token(&self) -> Option<AccessToken> {
        self.state.borrow().access_token().cloned()
    }

    /// Runs the cookie-based resume attempt, exactly once per gate
    /// lifetime. Every later call (including concurrent re-entry) is a
    /// no-op that reports the current state.
    #[tracing::instrument(skip_all)]
    pub async fn startup<R, Fut>(&self, resume: R) -> SessionState
    where
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken, OpError>>,
    {
        {
            let mut attempt = match self.resume.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match *attempt {
                ResumeAttempt::Attempted => {
                    tracing::debug!("startup already ran");
                    return self.state();
                }
                ResumeAttempt::NotAttempted => *attempt = ResumeAttempt::Attempted,
            }
        }

        self.state.send_replace(SessionState::Resuming);

        match resume().await {
            Ok(token) => {
                tracing::info!(?token, "session resumed");
                self.state.send_replace(SessionState::SignedIn(token));
            }
            Err(err) => {
                // no valid session cookie, the user has to log in
                tracing::info!(%err, "resume failed");
                self.state.send_replace(SessionState::SignedOut);
            }
        }

        self.state()
    }

    #[tracing::instrument(skip_all)]
    pub fn login_succeeded(&self, token: AccessToken) {
        tracing::info!(?token, "signed in");
        self.state.send_replace(SessionState::SignedIn(token));
    }

    /// Local sign-out is unconditional: the UI gates on local state, so a
    /// failing remote call is logged and otherwise ignored.
    #[tracing::instrument(skip_all)]
    pub async fn logout<R, Fut>(&self, remote: R)
    where
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), OpError>>,
    {
        if let Err(err) = remote().await {
            tracing::warn!(%err, "remote logout failed, signing out locally anyway");
        }
        self.state.send_replace(SessionState::SignedOut);
        tracing::info!("signed out");
    }
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}
