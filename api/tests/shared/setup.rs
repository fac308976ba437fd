use std::sync::Arc;

use api::{ApiConfig, AppContext, RemoteInvoker};
use serde_json::{Value, json};
use store::RecordId;

use super::stub::StubRemote;

pub const BASE: &str = "http://stub/";

pub fn app(stub: &Arc<StubRemote>) -> AppContext {
    AppContext::new(ApiConfig::new(BASE), Arc::clone(stub) as Arc<dyn RemoteInvoker>)
}

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn cat_json(id: RecordId, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
    })
}

pub fn auth_json(token: &str) -> Value {
    json!({
        "access_token": token,
        "access_token_expires_in_ms": 3_600_000,
    })
}
