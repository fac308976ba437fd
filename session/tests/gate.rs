use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use error::OpError;
use session::{AccessToken, SessionGate, SessionState};
use time::Duration;

fn token(secret: &str) -> AccessToken {
    AccessToken::new(secret, Duration::hours(1))
}

#[tokio::test]
async fn startup_resumes_the_session_on_success() {
    let gate = SessionGate::new();
    assert_eq!(gate.state(), SessionState::SignedOut);

    let state = gate.startup(|| async { Ok(token("abc")) }).await;

    assert!(state.is_signed_in());
    assert_eq!(gate.access_token().unwrap().reveal(), "abc");
}

#[tokio::test]
async fn startup_signs_out_when_resume_fails() {
    let gate = SessionGate::new();

    let state = gate
        .startup(|| async { Err(OpError::remote(401, "no session cookie")) })
        .await;

    assert_eq!(state, SessionState::SignedOut);
    assert_eq!(gate.access_token(), None);
}

#[tokio::test]
async fn startup_runs_the_resume_operation_at_most_once() {
    let gate = SessionGate::new();
    let attempts = Arc::new(AtomicUsize::new(0));

    let resume = || {
        let attempts = Arc::clone(&attempts);
        async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            Err(OpError::remote(401, "no session cookie"))
        }
    };

    gate.startup(&resume).await;
    gate.startup(&resume).await;

    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert_eq!(gate.state(), SessionState::SignedOut);
}

#[tokio::test]
async fn startup_after_login_does_not_disturb_the_session() {
    let gate = SessionGate::new();
    gate.login_succeeded(token("abc"));

    // a late startup must neither resume nor sign anyone out
    let state = gate
        .startup(|| async { Err(OpError::remote(401, "nope")) })
        .await;

    assert!(state.is_signed_in());
    assert_eq!(gate.access_token().unwrap().reveal(), "abc");
}

#[tokio::test]
async fn login_transitions_to_signed_in() {
    let gate = SessionGate::new();

    gate.login_succeeded(token("xyz"));

    assert!(gate.state().is_signed_in());
    assert_eq!(gate.access_token().unwrap().reveal(), "xyz");
}

#[tokio::test]
async fn logout_clears_the_session() {
    let gate = SessionGate::new();
    gate.login_succeeded(token("abc"));

    gate.logout(|| async { Ok(()) }).await;

    assert_eq!(gate.state(), SessionState::SignedOut);
    assert_eq!(gate.access_token(), None);
}

#[tokio::test]
async fn logout_clears_the_session_even_when_the_remote_call_fails() {
    let gate = SessionGate::new();
    gate.login_succeeded(token("abc"));

    gate.logout(|| async { Err(OpError::Transport("connection refused".to_string())) })
        .await;

    assert_eq!(gate.state(), SessionState::SignedOut);
}

#[tokio::test]
async fn subscribers_observe_transitions() {
    let gate = SessionGate::new();
    let mut states = gate.subscribe();

    gate.login_succeeded(token("abc"));
    states.changed().await.unwrap();
    assert!(states.borrow_and_update().is_signed_in());

    gate.logout(|| async { Ok(()) }).await;
    states.changed().await.unwrap();
    assert_eq!(*states.borrow_and_update(), SessionState::SignedOut);
}

#[test]
fn token_debug_never_leaks_the_secret() {
    let token = token("super-secret-value");

    let printed = format!("{token:?}");

    assert!(!printed.contains("super-secret-value"));
    assert!(printed.contains("REDACTED"));
}

#[test]
fn token_expiry_follows_the_server_lease() {
    let expired = AccessToken::new("abc", Duration::milliseconds(-1));
    let live = AccessToken::new("abc", Duration::hours(1));

    assert!(expired.is_expired());
    assert!(!live.is_expired());
}
