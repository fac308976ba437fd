use serde::Deserialize;
use session::{AccessToken, SessionState};
use time::Duration;

use crate::{ApiError, context::AppContext, invoker::RemoteRequest};

/// What the backend returns from login and resume.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub access_token_expires_in_ms: i64,
}

impl AuthResponse {
    fn into_token(self) -> AccessToken {
        AccessToken::new(
            self.access_token,
            Duration::milliseconds(self.access_token_expires_in_ms),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MessageResponse {
    message: String,
}

impl AppContext {
    /// One-shot session bootstrap: attempts a cookie-based resume against
    /// the backend. Safe to call again; only the first call does anything.
    #[tracing::instrument(skip_all)]
    pub async fn startup(&self) -> SessionState {
        self.session()
            .startup(|| async {
                let response: AuthResponse = self
                    .send(RemoteRequest::post(self.config().url("auth/resume")))
                    .await?;
                Ok(response.into_token())
            })
            .await
    }

    #[tracing::instrument(fields(?email), skip_all)]
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let request = RemoteRequest::post(self.config().url("auth/signup"))
            .with_body(serde_json::json!({ "email": email, "password": password }));

        let response = self
            .queries()
            .run_mutation("auth_signup", Vec::<String>::new(), || {
                self.send::<MessageResponse>(request)
            })
            .await?;

        Ok(response.message)
    }

    #[tracing::instrument(fields(?email), skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = RemoteRequest::post(self.config().url("auth/login"))
            .with_body(serde_json::json!({ "email": email, "password": password }));

        let response = self
            .queries()
            .run_mutation("auth_login", Vec::<String>::new(), || {
                self.send::<AuthResponse>(request)
            })
            .await?;

        self.session().login_succeeded(response.into_token());

        Ok(())
    }

    /// Signs out locally no matter what the backend says.
    #[tracing::instrument(skip_all)]
    pub async fn logout(&self) {
        let request = RemoteRequest::post(self.config().url("auth/logout"));

        self.session()
            .logout(|| async {
                let _: serde_json::Value = self.send(request).await?;
                Ok(())
            })
            .await;
    }
}
