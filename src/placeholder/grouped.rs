//! Resolver that tries several resolvers in order

use std::fmt;

use super::replacement::Replacement;
use super::resolver::{PlaceholderResolver, SharedResolver};

/// Asks each child in turn and returns the first replacement found
///
/// Earlier children take priority over later ones. Children are consulted on every call; the
/// group itself caches nothing.
pub struct GroupedResolver {
    resolvers: Vec<SharedResolver>,
}

impl GroupedResolver {
    pub fn new(resolvers: Vec<SharedResolver>) -> Self {
        Self { resolvers }
    }

    pub fn children(&self) -> &[SharedResolver] {
        &self.resolvers
    }
}

impl PlaceholderResolver for GroupedResolver {
    fn resolve(&self, key: &str) -> Option<Replacement> {
        self.resolvers.iter().find_map(|resolver| resolver.resolve(key))
    }
}

impl fmt::Debug for GroupedResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupedResolver")
            .field("children", &self.resolvers.len())
            .finish()
    }
}
