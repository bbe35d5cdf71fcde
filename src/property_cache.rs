use crate::property::PropertyDescriptor;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Resolved descriptor lists keyed by class (or script class) name.
///
/// Property shapes are static for a build, so entries are never invalidated.
/// With a limit set, the least recently used class is evicted first.
pub struct PropertyCache {
    entries: HashMap<String, Arc<[PropertyDescriptor]>>,
    recency: VecDeque<String>,
    limit: Option<usize>,
    hits: u64,
    misses: u64,
}

impl Default for PropertyCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PropertyCache {
    pub fn new(limit: Option<usize>) -> Self {
        Self { entries: HashMap::new(), recency: VecDeque::new(), limit: limit.map(|l| l.max(1)), hits: 0, misses: 0 }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(class)
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Cached list for `class`, computing it on first use.
    pub fn get_or_insert_with<F>(&mut self, class: &str, compute: F) -> Arc<[PropertyDescriptor]>
    where
        F: FnOnce() -> Vec<PropertyDescriptor>,
    {
        if let Some(cached) = self.entries.get(class) {
            let cached = Arc::clone(cached);
            self.hits += 1;
            self.touch(class);
            return cached;
        }
        self.misses += 1;
        let list: Arc<[PropertyDescriptor]> = Arc::from(compute().into_boxed_slice());
        self.entries.insert(class.to_string(), Arc::clone(&list));
        self.recency.push_back(class.to_string());
        self.enforce_limit();
        list
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    fn touch(&mut self, class: &str) {
        if self.recency.back().map(String::as_str) == Some(class) {
            return;
        }
        if let Some(pos) = self.recency.iter().position(|entry| entry == class) {
            if let Some(key) = self.recency.remove(pos) {
                self.recency.push_back(key);
            }
        }
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        while self.entries.len() > limit {
            let Some(oldest) = self.recency.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            log::debug!("[inspector] evicted cached property list for '{oldest}'");
        }
    }
}
