//! The resolver contract and the factories that build and compose resolvers

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use tracing::debug;

use super::dynamic::DynamicResolver;
use super::grouped::GroupedResolver;
use super::map::{MapResolver, PlaceholderMap};
use super::replacement::{Placeholder, Replacement};

/// Resolves placeholder keys to replacements
///
/// `resolve` may be called many times for the same key during a single render, for example
/// to check whether a tag is a placeholder at all before substituting it. Implementations
/// should therefore return fixed or cached replacements rather than build new ones on every
/// call.
pub trait PlaceholderResolver: Send + Sync {
    /// Returns the replacement for `key`, or `None` if this resolver has nothing for it
    fn resolve(&self, key: &str) -> Option<Replacement>;
}

impl<F> PlaceholderResolver for F
where
    F: Fn(&str) -> Option<Replacement> + Send + Sync,
{
    fn resolve(&self, key: &str) -> Option<Replacement> {
        self(key)
    }
}

/// Shared handle to any resolver
pub type SharedResolver = Arc<dyn PlaceholderResolver>;

/// Resolver that never has a replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResolver;

impl PlaceholderResolver for EmptyResolver {
    fn resolve(&self, _key: &str) -> Option<Replacement> {
        None
    }
}

static EMPTY: OnceLock<SharedResolver> = OnceLock::new();

/// The shared resolver that resolves nothing
pub fn empty() -> SharedResolver {
    EMPTY.get_or_init(|| Arc::new(EmptyResolver)).clone()
}

/// Resolve from a shared map
///
/// The map is adopted, not copied: entries inserted into or removed from it later are
/// visible to the returned resolver.
pub fn map(map: PlaceholderMap) -> SharedResolver {
    Arc::new(MapResolver::new(map))
}

/// Resolve from a fixed list of placeholders
///
/// When two placeholders share a key, the later one wins. An empty list yields [`empty()`].
pub fn placeholder_list(placeholders: &[Placeholder]) -> SharedResolver {
    if placeholders.is_empty() {
        return empty();
    }
    self::placeholders(placeholders.iter().cloned())
}

/// Resolve from any sequence of placeholders
///
/// The entries are copied into a private map; the later of two entries with the same key
/// wins. A sequence with no entries yields [`empty()`].
pub fn placeholders<I>(placeholders: I) -> SharedResolver
where
    I: IntoIterator<Item = Placeholder>,
{
    let entries: HashMap<String, Replacement> = placeholders
        .into_iter()
        .map(Placeholder::into_parts)
        .collect();

    if entries.is_empty() {
        return empty();
    }

    debug!(entries = entries.len(), "built placeholder resolver");
    Arc::new(MapResolver::new(Arc::new(RwLock::new(entries))))
}

/// Resolve from several resolvers, the first one with an answer wins
///
/// A single resolver is returned as is. Any other count, including none, is grouped.
pub fn combining(resolvers: &[SharedResolver]) -> SharedResolver {
    if let [only] = resolvers {
        return Arc::clone(only);
    }
    debug!(children = resolvers.len(), "built grouped resolver");
    Arc::new(GroupedResolver::new(resolvers.to_vec()))
}

/// Resolve from a sequence of resolvers in iteration order
///
/// The sequence is collected up front, so later changes to its source do not reach the
/// returned resolver. No resolvers yields [`empty()`] and a single one is returned as is.
pub fn combining_iter<I>(resolvers: I) -> SharedResolver
where
    I: IntoIterator<Item = SharedResolver>,
{
    let mut resolvers: Vec<SharedResolver> = resolvers.into_iter().collect();
    match resolvers.len() {
        0 => empty(),
        1 => resolvers.swap_remove(0),
        children => {
            debug!(children, "built grouped resolver");
            Arc::new(GroupedResolver::new(resolvers))
        }
    }
}

/// Resolve by calling `generator`, caching every replacement it produces
///
/// A `None` from the generator is not cached, so it will be asked again next time.
pub fn dynamic<F>(generator: F) -> SharedResolver
where
    F: Fn(&str) -> Option<Replacement> + Send + Sync + 'static,
{
    Arc::new(DynamicResolver::new(generator))
}
