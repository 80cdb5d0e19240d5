use super::cache::{ContextCache, DEFAULT_CAPACITY};
use super::model::{Context, SelectorKey};

/// Holder of the one active context plus the cache of previously resolved
/// contexts. Constructed once at startup and threaded by `&mut` through
/// the call chain.
#[derive(Debug)]
pub struct Profile {
    active: Option<Context>,
    cache: ContextCache,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    pub fn new() -> Self {
        Self::with_cache_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            active: None,
            cache: ContextCache::new(capacity),
        }
    }

    /// A profile hydrated from a previously persisted context.
    pub fn with_active(ctx: Context) -> Self {
        let mut profile = Self::new();
        profile.set_active(ctx);
        profile
    }

    pub fn active(&self) -> Option<&Context> {
        self.active.as_ref()
    }

    /// Replaces the active context unconditionally. Cached entries are
    /// left untouched.
    pub fn set_active(&mut self, ctx: Context) {
        self.active = Some(ctx);
    }

    pub fn clear_active(&mut self) -> Option<Context> {
        self.active.take()
    }

    /// Returns the context resolved earlier for an identical selector, if
    /// any. Metadata is not refreshed, so the subscription state may be
    /// stale.
    pub fn cache_lookup(&mut self, key: &SelectorKey) -> Option<Context> {
        self.cache.lookup(key).cloned()
    }

    pub fn cache_store(&mut self, key: SelectorKey, ctx: Context) {
        self.cache.store(key, ctx);
    }
}
