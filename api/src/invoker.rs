use std::pin::Pin;

use error::OpError;
use http::Method;
use serde::de::DeserializeOwned;
use session::AccessToken;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Abstract request description. Whether it turns into HTTP, local
/// storage, or a test stub is the invoker's business, not this crate's.
#[derive(Debug, Clone)]
pub struct RemoteRequest {
    pub method: Method,
    pub url: String,
    pub params: Option<serde_json::Value>,
    pub body: Option<serde_json::Value>,
    pub token: Option<AccessToken>,
}

impl RemoteRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: None,
            body: None,
            token: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_token(mut self, token: Option<AccessToken>) -> Self {
        self.token = token;
        self
    }
}

/// The eventual-result contract every remote operation is coordinated
/// through.
pub trait RemoteInvoker: Send + Sync {
    fn invoke(&self, request: RemoteRequest) -> BoxFuture<Result<serde_json::Value, OpError>>;
}

pub(crate) fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, OpError> {
    serde_json::from_value(value).map_err(|err| OpError::Decode(err.to_string()))
}
