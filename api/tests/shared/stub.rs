use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use api::{BoxFuture, RemoteInvoker, RemoteRequest};
use error::OpError;
use http::Method;
use serde_json::Value;
use tokio::sync::Notify;

/// In-memory stand-in for the backend: canned responses per route, a call
/// log for assertions, and optional gates to hold responses in flight.
pub struct StubRemote {
    routes: Mutex<HashMap<String, VecDeque<Result<Value, OpError>>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<RemoteRequest>>,
}

impl StubRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn key(method: &Method, url: &str) -> String {
        format!("{method} {url}")
    }

    /// Queues a response. The last queued response for a route is sticky.
    pub fn respond(&self, method: Method, url: &str, response: Result<Value, OpError>) {
        self.routes
            .lock()
            .unwrap()
            .entry(Self::key(&method, url))
            .or_default()
            .push_back(response);
    }

    /// Holds this route's responses until the returned gate is notified.
    pub fn gate(&self, method: Method, url: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(Self::key(&method, url), Arc::clone(&gate));
        gate
    }

    pub fn calls_to(&self, method: Method, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|request| request.method == method && request.url == url)
            .count()
    }

    pub fn last_token(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|request| request.token.as_ref())
            .map(|token| token.reveal().to_string())
    }
}

impl RemoteInvoker for StubRemote {
    fn invoke(&self, request: RemoteRequest) -> BoxFuture<Result<Value, OpError>> {
        let key = Self::key(&request.method, &request.url);
        self.calls.lock().unwrap().push(request);

        let gate = self.gates.lock().unwrap().get(&key).cloned();

        let response = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
                Some(queue) => queue
                    .front()
                    .cloned()
                    .unwrap_or_else(|| Err(OpError::Transport(format!("drained route: {key}")))),
                None => Err(OpError::Transport(format!("unstubbed route: {key}"))),
            }
        };

        Box::pin(async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            response
        })
    }
}
