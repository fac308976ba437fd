use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock, RwLockReadGuard};

use dashmap::DashMap;
use error::OpError;
use tokio::sync::watch;

use crate::{
    Tag,
    completion::{Completion, CompletionListener},
    key::QueryKey,
    snapshot::{QuerySnapshot, QueryStatus, SharedValue},
    subscription::Subscription,
};

type FetchOutcome = Result<(SharedValue, Vec<String>), OpError>;
type BoxFetch = Pin<Box<dyn Future<Output = FetchOutcome> + Send>>;
type Fetcher = Arc<dyn Fn() -> BoxFetch + Send + Sync>;

struct QueryEntry {
    state: watch::Sender<QuerySnapshot>,
    tags: Vec<String>,
    fetch: Fetcher,
}

struct Shared {
    entries: DashMap<QueryKey, QueryEntry>,
    listeners: RwLock<Vec<Arc<dyn CompletionListener>>>,
}

/// Coordinates remote reads and writes: de-duplicates concurrent identical
/// reads, caches settled results per descriptor, and re-runs reads whose
/// tags a completed write invalidated. One instance process-wide; handles
/// are cheap to clone.
pub struct QueryCoordinator {
    shared: Arc<Shared>,
}

impl QueryCoordinator {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                entries: DashMap::new(),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn CompletionListener>) {
        let mut listeners = match self.shared.listeners.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        listeners.push(listener);
    }

    /// Runs a read, or joins one already running under the same key.
    ///
    /// For all concurrent calls with an equal key exactly one underlying
    /// operation executes; a settled entry is served as-is (cache-first,
    /// use `refetch` to force a re-run). The fetch is driven on a spawned
    /// task, so dropping every subscription never cancels it. On success
    /// the entry is re-tagged with `tagger(&result)`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key), skip_all)
    )]
    pub fn run_query<V, T, G, F, Fut>(
        &self,
        key: QueryKey,
        tagger: G,
        fetch: F,
    ) -> Subscription<V>
    where
        V: Clone + Send + Sync + 'static,
        T: Tag,
        G: Fn(&V) -> Vec<T> + Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V, OpError>> + Send + 'static,
    {
        let tagger = Arc::new(tagger);
        let fetcher: Fetcher = Arc::new(move || {
            let tagger = Arc::clone(&tagger);
            let pending = fetch();
            Box::pin(async move {
                let value = pending.await?;
                let tags = tagger(&value)
                    .into_iter()
                    .map(|tag| tag.id().to_string())
                    .collect();
                Ok((Arc::new(value) as SharedValue, tags))
            })
        });

        let receiver = match self.shared.entries.entry(key.clone()) {
            dashmap::Entry::Occupied(entry) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    status = ?entry.get().state.borrow().status(),
                    "joining existing entry"
                );

                entry.get().state.subscribe()
            }
            dashmap::Entry::Vacant(slot) => {
                let (sender, receiver) = watch::channel(QuerySnapshot::idle());
                sender.send_replace(QuerySnapshot::pending(None));
                slot.insert(QueryEntry {
                    state: sender,
                    tags: Vec::new(),
                    fetch: Arc::clone(&fetcher),
                });

                #[cfg(feature = "tracing")]
                tracing::debug!("issuing new query");

                self.spawn_fetch(key, fetcher);
                receiver
            }
        };

        Subscription::new(receiver)
    }

    /// Cache-bypassing re-run of an existing entry with its original
    /// operation. Returns false for unknown keys and for entries that are
    /// already in flight.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?key), skip_all, ret)
    )]
    pub fn refetch(&self, key: &QueryKey) -> bool {
        let Some(entry) = self.shared.entries.get_mut(key) else {
            return false;
        };
        if entry.state.borrow().status() == QueryStatus::Pending {
            return false;
        }

        let last_value = entry.state.borrow().last_value();
        entry.state.send_replace(QuerySnapshot::pending(last_value));
        let fetch = Arc::clone(&entry.fetch);
        drop(entry);

        self.spawn_fetch(key.clone(), fetch);
        true
    }

    /// Runs a write. On success every settled entry whose tags intersect
    /// `invalidates` is re-fetched in the background; on failure nothing
    /// is invalidated and the error is returned once.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "debug", fields(?operation), skip_all)
    )]
    pub async fn run_mutation<V, T, R, Fut>(
        &self,
        operation: &'static str,
        invalidates: Vec<T>,
        run: R,
    ) -> Result<V, OpError>
    where
        V: Clone + Send + Sync + 'static,
        T: Tag,
        R: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, OpError>>,
    {
        match run().await {
            Ok(value) => {
                self.shared.emit(&Completion::WriteSucceeded {
                    operation,
                    value: Arc::new(value.clone()),
                });
                self.invalidate(&invalidates);
                Ok(value)
            }
            Err(error) => {
                self.shared.emit(&Completion::WriteFailed {
                    operation,
                    error: Arc::new(error.clone()),
                });
                Err(error)
            }
        }
    }

    /// Re-fetches every settled entry whose tag set intersects `tags`.
    pub fn invalidate<T: Tag>(&self, tags: &[T]) {
        let mut stale = Vec::new();
        for entry in self.shared.entries.iter() {
            let hit = entry
                .tags
                .iter()
                .any(|entry_tag| tags.iter().any(|tag| tag.id() == entry_tag.as_str()));
            if hit {
                stale.push(entry.key().clone());
            }
        }

        for key in stale {
            #[cfg(feature = "tracing")]
            tracing::debug!(?key, "invalidated, scheduling refetch");

            self.refetch(&key);
        }
    }

    /// Joins an existing entry without triggering anything.
    pub fn subscribe<V>(&self, key: &QueryKey) -> Option<Subscription<V>>
    where
        V: Clone + Send + Sync + 'static,
    {
        let entry = self.shared.entries.get(key)?;
        Some(Subscription::new(entry.state.subscribe()))
    }

    pub fn status(&self, key: &QueryKey) -> Option<QueryStatus> {
        self.shared
            .entries
            .get(key)
            .map(|entry| entry.state.borrow().status())
    }

    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.shared
            .entries
            .get(key)
            .map(|entry| entry.state.receiver_count())
            .unwrap_or(0)
    }

    /// Drops a cached entry. Entries are otherwise kept for the lifetime
    /// of the coordinator.
    pub fn evict(&self, key: &QueryKey) -> bool {
        self.shared.entries.remove(key).is_some()
    }

    fn spawn_fetch(&self, key: QueryKey, fetch: Fetcher) {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            let outcome = fetch().await;
            shared.settle(key, outcome);
        });
    }
}

impl Shared {
    fn settle(&self, key: QueryKey, outcome: FetchOutcome) {
        match outcome {
            Ok((value, tags)) => {
                {
                    // entry may have been evicted mid-flight
                    let Some(mut entry) = self.entries.get_mut(&key) else {
                        return;
                    };
                    entry.tags = tags;
                    entry
                        .state
                        .send_replace(QuerySnapshot::success(Arc::clone(&value)));
                }
                self.emit(&Completion::ReadSucceeded { query: key, value });
            }
            Err(error) => {
                let Some(entry) = self.entries.get(&key) else {
                    return;
                };
                let last_value = entry.state.borrow().last_value();
                entry
                    .state
                    .send_replace(QuerySnapshot::failure(last_value, Arc::new(error)));
            }
        }
    }

    fn emit(&self, completion: &Completion) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?completion, "emitting completion");

        for listener in self.read_listeners().iter() {
            listener.on_completion(completion);
        }
    }

    fn read_listeners(&self) -> RwLockReadGuard<'_, Vec<Arc<dyn CompletionListener>>> {
        match self.listeners.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clone for QueryCoordinator {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for QueryCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
