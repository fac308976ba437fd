use time::{Duration, OffsetDateTime};

/// Opaque credential handed out by the server on login/resume. The caller
/// attaches it to its own requests; this crate never injects it anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_at: OffsetDateTime,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            expires_at: OffsetDateTime::now_utc() + expires_in,
        }
    }

    pub fn reveal(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() > self.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<REDACTED>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
