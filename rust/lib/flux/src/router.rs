use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use crate::store::StateStore;
use crate::trie::Trie;

/// Boxed future returned by a registered request handler.
pub type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type-erased request payload.
pub type Payload = Arc<dyn Any + Send + Sync>;

type Handler = Arc<dyn Fn(String, Payload, Arc<StateStore>) -> BoxFuture + Send + Sync>;

/// Routes request paths to async handlers.
///
/// Patterns use the same wildcards as subscriptions. When several
/// handlers match one path they run one after another, each awaited
/// before the next starts.
pub struct Router {
    handlers: Trie<Handler>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            handlers: Trie::new(),
        }
    }

    /// Register `handler` under `pattern`.
    pub fn on<F, Fut>(&self, pattern: &str, handler: F)
    where
        F: Fn(String, Payload, Arc<StateStore>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let erased: Handler = Arc::new(
            move |path: String, payload: Payload, store: Arc<StateStore>| -> BoxFuture {
                Box::pin(handler(path, payload, store))
            },
        );
        self.handlers.insert(pattern, erased);
    }

    /// Run every handler matching `path`. Unrouted paths are a no-op.
    pub async fn dispatch(&self, path: &str, payload: Payload, store: Arc<StateStore>) {
        let handlers = self.handlers.match_topic(path);
        if handlers.is_empty() {
            debug!(path, "no handler for request");
            return;
        }
        for handler in handlers {
            handler(path.to_string(), Arc::clone(&payload), Arc::clone(&store)).await;
        }
    }

    /// Whether `pattern` itself was registered.
    pub fn has_handler(&self, pattern: &str) -> bool {
        self.handlers.has_pattern(pattern)
    }

    /// Whether any registered pattern matches the concrete `path`.
    pub fn matches(&self, path: &str) -> bool {
        !self.handlers.match_topic(path).is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
