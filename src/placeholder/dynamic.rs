//! Memoizing resolver around a generator function

use std::fmt;

use dashmap::DashMap;
use tracing::trace;

use super::replacement::Replacement;
use super::resolver::PlaceholderResolver;

/// Calls a generator for unknown keys and caches what it returns
///
/// Only replacements are cached; a `None` from the generator is returned as is and the
/// generator will be asked again on the next call for that key. The generator runs without
/// any cache lock held, so two threads missing the same key at once may both call it. The
/// cache then keeps whichever result was inserted last.
pub struct DynamicResolver<F> {
    generator: F,
    cache: DashMap<String, Replacement>,
}

impl<F> DynamicResolver<F>
where
    F: Fn(&str) -> Option<Replacement> + Send + Sync,
{
    pub fn new(generator: F) -> Self {
        Self {
            generator,
            cache: DashMap::new(),
        }
    }

    /// Number of keys with a cached replacement
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

impl<F> PlaceholderResolver for DynamicResolver<F>
where
    F: Fn(&str) -> Option<Replacement> + Send + Sync,
{
    fn resolve(&self, key: &str) -> Option<Replacement> {
        if let Some(cached) = self.cache.get(key) {
            trace!(key, "dynamic placeholder cache hit");
            return Some(cached.value().clone());
        }

        let Some(generated) = (self.generator)(key) else {
            trace!(key, "dynamic placeholder generator had no replacement");
            return None;
        };

        trace!(key, payload = generated.type_name(), "caching dynamic placeholder");
        self.cache.insert(key.to_string(), generated.clone());
        Some(generated)
    }
}

impl<F> fmt::Debug for DynamicResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicResolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
