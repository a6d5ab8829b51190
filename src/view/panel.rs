//! Panel task and state

use futures_util::future::BoxFuture;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::client::ClientResult;
use crate::context::{resolve_identifier_async, IdentifierStore, RestaurantContext, RestaurantId};

/// Fetch-and-reshape function run for each resolved identifier
pub type Loader<T> = Arc<dyn Fn(RestaurantId) -> BoxFuture<'static, ClientResult<T>> + Send + Sync>;

/// What a panel does when its fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure and show the empty/zero state
    Degrade,
    /// Keep the previous data and expose the error message
    Surface,
}

/// Render-ready state of a panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelState<T> {
    /// Identifier the data belongs to; `None` renders the empty state
    pub restaurant_id: Option<RestaurantId>,
    pub data: T,
    pub loading: bool,
    /// Only ever set under [`FailurePolicy::Surface`]
    pub error: Option<String>,
}

impl<T: Default> PanelState<T> {
    fn initial() -> Self {
        Self {
            restaurant_id: None,
            data: T::default(),
            loading: true,
            error: None,
        }
    }

    fn empty() -> Self {
        Self {
            restaurant_id: None,
            data: T::default(),
            loading: false,
            error: None,
        }
    }
}

/// Publishes state unless the panel has been disposed.
///
/// The gate is held for the whole write, so once `close` returns no
/// further state can land.
struct Publisher<T> {
    tx: watch::Sender<PanelState<T>>,
    gate: Arc<Mutex<bool>>,
}

impl<T> Publisher<T> {
    fn publish(&self, update: impl FnOnce(&mut PanelState<T>)) -> bool {
        let open = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        if !*open {
            return false;
        }
        self.tx.send_modify(update);
        true
    }
}

fn close(gate: &Mutex<bool>) {
    *gate.lock().unwrap_or_else(|e| e.into_inner()) = false;
}

/// A live view-model bound to a restaurant context
pub struct Panel<T> {
    name: &'static str,
    state: watch::Receiver<PanelState<T>>,
    refresh: Arc<Notify>,
    gate: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl<T> Panel<T>
where
    T: Default + Clone + Send + Sync + 'static,
{
    /// Start the panel task. Must be called from within a tokio runtime.
    pub fn spawn(
        name: &'static str,
        context: &RestaurantContext,
        store: Arc<dyn IdentifierStore>,
        policy: FailurePolicy,
        loader: Loader<T>,
    ) -> Self {
        let (tx, state) = watch::channel(PanelState::initial());
        let refresh = Arc::new(Notify::new());
        let gate = Arc::new(Mutex::new(true));

        let publisher = Publisher {
            tx,
            gate: Arc::clone(&gate),
        };

        let task = tokio::spawn(run(
            name,
            context.subscribe(),
            store,
            policy,
            loader,
            publisher,
            Arc::clone(&refresh),
        ));

        Self {
            name,
            state,
            refresh,
            gate,
            task,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PanelState<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published state
    pub fn subscribe(&self) -> watch::Receiver<PanelState<T>> {
        self.state.clone()
    }

    /// Wait until the panel is not loading and return that state
    pub async fn settled(&self) -> PanelState<T> {
        let mut rx = self.state.clone();
        let result = rx.wait_for(|s| !s.loading).await.map(|s| s.clone());
        match result {
            Ok(state) => state,
            Err(_) => self.state(),
        }
    }

    /// Re-run the fetch for the current identifier
    pub fn refresh(&self) {
        tracing::debug!(panel = self.name, "refresh requested");
        self.refresh.notify_one();
    }

    /// Stop the panel. Equivalent to dropping it.
    pub fn dispose(self) {}
}

impl<T> Drop for Panel<T> {
    fn drop(&mut self) {
        close(&self.gate);
        self.task.abort();
    }
}

async fn run<T>(
    name: &'static str,
    mut context: watch::Receiver<Option<RestaurantId>>,
    store: Arc<dyn IdentifierStore>,
    policy: FailurePolicy,
    loader: Loader<T>,
    publisher: Publisher<T>,
    refresh: Arc<Notify>,
) where
    T: Default + Clone + Send + Sync + 'static,
{
    'resolve: loop {
        let explicit = context.borrow_and_update().clone();

        match resolve_identifier_async(explicit, Arc::clone(&store)).await {
            None => {
                tracing::debug!(panel = name, "no restaurant selected, showing empty state");
                if !publisher.publish(|s| *s = PanelState::empty()) {
                    return;
                }
            }
            Some(id) => {
                let switching = publisher.tx.borrow().restaurant_id.as_ref() != Some(&id);
                let target = id.clone();
                let published = publisher.publish(|s| {
                    if switching {
                        s.data = T::default();
                        s.error = None;
                    }
                    s.restaurant_id = Some(target);
                    s.loading = true;
                });
                if !published {
                    return;
                }

                let fetch = loader(id.clone());
                tokio::pin!(fetch);

                let result = tokio::select! {
                    result = &mut fetch => result,
                    Ok(()) = context.changed() => {
                        tracing::debug!(panel = name, restaurant_id = %id, "restaurant changed, dropping in-flight fetch");
                        continue 'resolve;
                    }
                    _ = refresh.notified() => continue 'resolve,
                };

                let applied = match result {
                    Ok(data) => publisher.publish(|s| {
                        s.data = data;
                        s.loading = false;
                        s.error = None;
                    }),
                    Err(e) => {
                        tracing::warn!(panel = name, restaurant_id = %id, "fetch failed: {}", e);
                        match policy {
                            FailurePolicy::Degrade => publisher.publish(|s| {
                                s.data = T::default();
                                s.loading = false;
                                s.error = None;
                            }),
                            FailurePolicy::Surface => publisher.publish(|s| {
                                s.loading = false;
                                s.error = Some(e.to_string());
                            }),
                        }
                    }
                };
                if !applied {
                    return;
                }
            }
        }

        tokio::select! {
            Ok(()) = context.changed() => {}
            _ = refresh.notified() => {}
        }
    }
}
