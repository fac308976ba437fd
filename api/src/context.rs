use std::sync::Arc;

use error::OpError;
use query::QueryCoordinator;
use serde::de::DeserializeOwned;
use session::SessionGate;
use store::EntityStore;

use crate::{
    ApiConfig,
    cats::Cat,
    invoker::{BoxFuture, RemoteInvoker, RemoteRequest, decode},
    publish::StorePublisher,
    slideshows::Slideshow,
};

pub const CATS: &str = "cats";
pub const SLIDESHOWS: &str = "slideshows";

/// Everything the screens talk to, constructed once at process start and
/// passed around explicitly. Holds the entity store (with its partitions
/// registered), the query coordinator (with the store bridge listening),
/// the session gate, and the remote boundary.
pub struct AppContext {
    store: Arc<EntityStore>,
    queries: QueryCoordinator,
    session: Arc<SessionGate>,
    invoker: Arc<dyn RemoteInvoker>,
    config: ApiConfig,
}

impl AppContext {
    pub fn new(config: ApiConfig, invoker: Arc<dyn RemoteInvoker>) -> Self {
        let store = Arc::new(EntityStore::new());
        store.ensure_partition::<Cat>(CATS);
        store.ensure_partition::<Slideshow>(SLIDESHOWS);

        let queries = QueryCoordinator::new();
        queries.add_listener(Arc::new(StorePublisher::new(Arc::clone(&store))));

        Self {
            store,
            queries,
            session: Arc::new(SessionGate::new()),
            invoker,
            config,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn queries(&self) -> &QueryCoordinator {
        &self.queries
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub(crate) fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Re-runnable fetch closure for queries. The access token is read
    /// fresh on every attempt, so refetches after a re-login carry the
    /// new credential.
    pub(crate) fn fetch_json<T>(
        &self,
        request: RemoteRequest,
    ) -> impl Fn() -> BoxFuture<Result<T, OpError>> + Send + Sync + Clone + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let invoker = Arc::clone(&self.invoker);
        let session = Arc::clone(&self.session);
        move || -> BoxFuture<Result<T, OpError>> {
            let request = request.clone().with_token(session.access_token());
            let pending = invoker.invoke(request);
            Box::pin(async move { decode(pending.await?) })
        }
    }

    /// One-shot send for mutations.
    pub(crate) async fn send<T>(&self, request: RemoteRequest) -> Result<T, OpError>
    where
        T: DeserializeOwned,
    {
        let request = request.with_token(self.session.access_token());
        decode(self.invoker.invoke(request).await?)
    }
}
