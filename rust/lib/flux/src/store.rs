use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::trie::Trie;
use crate::value::{StateValue, SubscriptionId};

/// Callback invoked with the changed path and its new value.
pub type ChangeHandler = Arc<dyn Fn(&str, &StateValue) + Send + Sync>;

/// Path-addressed state with change subscriptions.
///
/// Writers go through `set`, `set_value` or `update`; each write notifies
/// every subscriber whose pattern matches the path. Notification happens
/// on the writer's thread after the value lock is released, so a
/// subscriber may read the store again.
pub struct StateStore {
    values: RwLock<HashMap<String, StateValue>>,
    subscribers: Trie<Subscriber>,
    next_id: AtomicU64,
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    handler: ChangeHandler,
}

impl StateStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            subscribers: Trie::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StateValue>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StateValue>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, path: &str, value: &StateValue) {
        let subscribers = self.subscribers.match_topic(path);
        trace!(path, subscribers = subscribers.len(), "state changed");
        for sub in subscribers {
            (sub.handler)(path, value);
        }
    }

    /// Store `value` at `path` and notify subscribers.
    pub fn set<T: Any + Send + Sync>(&self, path: &str, value: T) {
        self.set_value(path, StateValue::new(value));
    }

    pub fn set_value(&self, path: &str, value: StateValue) {
        self.write().insert(path.to_string(), value.clone());
        self.notify(path, &value);
    }

    /// Current value at `path`.
    pub fn get(&self, path: &str) -> Option<StateValue> {
        self.read().get(path).cloned()
    }

    /// Current value at `path` cloned out as `T`.
    ///
    /// `None` if nothing is stored or the stored type is not `T`.
    pub fn get_cloned<T: Any + Clone>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|v| v.cloned::<T>())
    }

    /// Read-modify-write the `T` at `path`.
    ///
    /// Starts from `init()` when the path is empty or holds another type.
    /// The write lock is held while `f` runs; subscribers are notified
    /// after it is released. Returns whatever `f` returns.
    pub fn update<T, R, I, F>(&self, path: &str, init: I, f: F) -> R
    where
        T: Any + Clone + Send + Sync,
        I: FnOnce() -> T,
        F: FnOnce(&mut T) -> R,
    {
        let (value, out) = {
            let mut values = self.write();
            let mut current = values
                .get(path)
                .and_then(|v| v.cloned::<T>())
                .unwrap_or_else(init);
            let out = f(&mut current);
            let value = StateValue::new(current);
            values.insert(path.to_string(), value.clone());
            (value, out)
        };
        self.notify(path, &value);
        out
    }

    /// Drop the value at `path`. Subscribers are not notified.
    pub fn remove(&self, path: &str) -> Option<StateValue> {
        self.write().remove(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.read().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register `handler` for every path matching `pattern`.
    pub fn subscribe<F>(&self, pattern: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&str, &StateValue) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.insert(
            pattern,
            Subscriber {
                id,
                handler: Arc::new(handler),
            },
        );
        id
    }

    /// Remove the subscription `id` registered under `pattern`.
    pub fn unsubscribe(&self, pattern: &str, id: SubscriptionId) -> bool {
        self.subscribers.remove(pattern, |sub| sub.id == id)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
