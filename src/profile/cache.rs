use super::model::{Context, SelectorKey};
use std::collections::{HashMap, VecDeque};

pub(super) const DEFAULT_CAPACITY: usize = 64;

/// Bounded cache of resolved contexts. Lookups refresh recency; inserts
/// evict the least-recently used entry once the capacity is reached.
#[derive(Debug)]
pub(super) struct ContextCache {
    capacity: usize,
    entries: HashMap<SelectorKey, Context>,
    recency: VecDeque<SelectorKey>,
}

impl ContextCache {
    pub(super) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            recency: VecDeque::new(),
        }
    }

    pub(super) fn lookup(&mut self, key: &SelectorKey) -> Option<&Context> {
        if self.entries.contains_key(key) {
            self.touch(key);
        }
        self.entries.get(key)
    }

    pub(super) fn store(&mut self, key: SelectorKey, ctx: Context) {
        if self.entries.insert(key.clone(), ctx).is_some() {
            self.touch(&key);
            return;
        }

        self.recency.push_back(key);
        if self.entries.len() > self.capacity
            && let Some(oldest) = self.recency.pop_front()
        {
            self.entries.remove(&oldest);
        }
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    fn touch(&mut self, key: &SelectorKey) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
            self.recency.push_back(key.clone());
        }
    }
}
