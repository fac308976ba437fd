use session::{AccessMode, AccessToken, GuardOutcome, SessionState, evaluate};
use time::Duration;

fn signed_in() -> SessionState {
    SessionState::SignedIn(AccessToken::new("abc", Duration::hours(1)))
}

#[test]
fn authenticated_screens_render_only_when_signed_in() {
    assert_eq!(
        evaluate(AccessMode::Authenticated, &signed_in()),
        GuardOutcome::Render
    );
    assert_eq!(
        evaluate(AccessMode::Authenticated, &SessionState::SignedOut),
        GuardOutcome::RedirectToLogin
    );
}

#[test]
fn anonymous_screens_redirect_signed_in_users_away() {
    assert_eq!(
        evaluate(AccessMode::Anonymous, &SessionState::SignedOut),
        GuardOutcome::Render
    );
    assert_eq!(
        evaluate(AccessMode::Anonymous, &signed_in()),
        GuardOutcome::RedirectToHome
    );
}

#[test]
fn resuming_always_shows_the_placeholder() {
    assert_eq!(
        evaluate(AccessMode::Authenticated, &SessionState::Resuming),
        GuardOutcome::Placeholder
    );
    assert_eq!(
        evaluate(AccessMode::Anonymous, &SessionState::Resuming),
        GuardOutcome::Placeholder
    );
}
