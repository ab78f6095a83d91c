//! Map-backed resolver

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::replacement::Replacement;
use super::resolver::PlaceholderResolver;

/// A key to replacement map that can be shared with, and mutated behind, a resolver
pub type PlaceholderMap = Arc<RwLock<HashMap<String, Replacement>>>;

/// Build a [`PlaceholderMap`] from entries, later duplicates winning
pub fn shared_map<I, K>(entries: I) -> PlaceholderMap
where
    I: IntoIterator<Item = (K, Replacement)>,
    K: Into<String>,
{
    let map = entries
        .into_iter()
        .map(|(key, replacement)| (key.into(), replacement))
        .collect();
    Arc::new(RwLock::new(map))
}

/// Resolves by looking keys up in a [`PlaceholderMap`]
///
/// Each call reads whatever the map holds at that moment.
#[derive(Debug, Clone)]
pub struct MapResolver {
    map: PlaceholderMap,
}

impl MapResolver {
    pub fn new(map: PlaceholderMap) -> Self {
        Self { map }
    }

    /// The map this resolver reads from
    pub fn backing(&self) -> &PlaceholderMap {
        &self.map
    }
}

impl PlaceholderResolver for MapResolver {
    fn resolve(&self, key: &str) -> Option<Replacement> {
        self.map.read().get(key).cloned()
    }
}
