use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Topic trie with MQTT-style wildcards, shared by the state store
/// (subscriptions), the router (request handlers) and i18n (translators).
///
/// - `+` stands for exactly one level.
/// - `#` stands for zero or more trailing levels and must come last.
///
/// ```ignore
/// let trie = Trie::new();
/// trie.insert("scrap/lines", 1);
/// trie.insert("scrap/+", 2);
/// trie.insert("#", 3);
/// assert_eq!(trie.match_topic("scrap/lines").len(), 3);
/// ```
pub struct Trie<T> {
    root: RwLock<Node<T>>,
}

struct Node<T> {
    exact: HashMap<String, Node<T>>,
    one: Option<Box<Node<T>>>,
    rest: Vec<T>,
    here: Vec<T>,
}

impl<T> Node<T> {
    fn empty() -> Self {
        Self {
            exact: HashMap::new(),
            one: None,
            rest: Vec::new(),
            here: Vec::new(),
        }
    }

    fn find(&self, pattern: &str) -> Option<&Node<T>> {
        let mut node = self;
        for seg in levels(pattern) {
            node = match seg {
                "+" => node.one.as_deref()?,
                seg => node.exact.get(seg)?,
            };
        }
        Some(node)
    }
}

impl<T: Clone> Node<T> {
    fn collect(&self, levels: &[&str], out: &mut Vec<T>) {
        out.extend(self.rest.iter().cloned());
        let Some((first, tail)) = levels.split_first() else {
            out.extend(self.here.iter().cloned());
            return;
        };
        if let Some(child) = self.exact.get(*first) {
            child.collect(tail, out);
        }
        if let Some(child) = &self.one {
            child.collect(tail, out);
        }
    }
}

/// Split a path into levels. The empty path has no levels.
fn levels(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl<T: Clone> Trie<T> {
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::empty()),
        }
    }

    /// Store `value` under `pattern`.
    ///
    /// Anything after a `#` level is ignored.
    pub fn insert(&self, pattern: &str, value: T) {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let mut node = &mut *root;
        for seg in levels(pattern) {
            match seg {
                "#" => {
                    node.rest.push(value);
                    return;
                }
                "+" => node = &mut **node.one.get_or_insert_with(|| Box::new(Node::empty())),
                seg => node = node.exact.entry(seg.to_string()).or_insert_with(Node::empty),
            }
        }
        node.here.push(value);
    }

    /// All values whose pattern matches the concrete `topic`.
    ///
    /// Order: `#` values before deeper matches, exact before `+` at each level.
    pub fn match_topic(&self, topic: &str) -> Vec<T> {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        let topic_levels: Vec<&str> = levels(topic).collect();
        let mut out = Vec::new();
        root.collect(&topic_levels, &mut out);
        out
    }

    /// Drop values stored under exactly `pattern` for which `pred` holds.
    /// Returns whether anything was removed.
    pub fn remove<F>(&self, pattern: &str, pred: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        let mut root = self.root.write().unwrap_or_else(PoisonError::into_inner);
        let mut node = &mut *root;
        for seg in levels(pattern) {
            let next = match seg {
                "#" => {
                    let before = node.rest.len();
                    node.rest.retain(|v| !pred(v));
                    return node.rest.len() < before;
                }
                "+" => node.one.as_deref_mut(),
                seg => node.exact.get_mut(seg),
            };
            match next {
                Some(n) => node = n,
                None => return false,
            }
        }
        let before = node.here.len();
        node.here.retain(|v| !pred(v));
        node.here.len() < before
    }

    /// Whether a value was inserted under exactly `pattern` (no wildcard expansion).
    pub fn has_pattern(&self, pattern: &str) -> bool {
        let root = self.root.read().unwrap_or_else(PoisonError::into_inner);
        match pattern.rsplit_once('/') {
            Some((parent, "#")) => root.find(parent).is_some_and(|n| !n.rest.is_empty()),
            _ if pattern == "#" => !root.rest.is_empty(),
            _ => root.find(pattern).is_some_and(|n| !n.here.is_empty()),
        }
    }
}

impl<T: Clone> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}
