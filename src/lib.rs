//! Placeholder Resolver - name to replacement resolution for tagged markup
//!
//! This library provides the resolvers a markup engine consults when it meets a `<key>`
//! tag, ways to compose them, and a small renderer that substitutes tags in plain text.
//!
//! # Example
//!
//! ```rust
//! use placeholder_resolver::placeholder::{self, Replacement};
//! use placeholder_resolver::render;
//!
//! let names = placeholder::map(placeholder::shared_map([("name", Replacement::text("Steve"))]));
//! let clock = placeholder::dynamic(|key: &str| (key == "time").then(|| Replacement::text("12:00")));
//! let resolver = placeholder::combining(&[names, clock]);
//!
//! let out = render("<name> at <time>", &*resolver).unwrap();
//! assert_eq!(out, "Steve at 12:00");
//! ```

pub mod error;
pub mod placeholder;
pub mod placeholder_file;
pub mod tag;

pub use error::{Span, TagError};
pub use placeholder::{PlaceholderResolver, Replacement, SharedResolver};
pub use placeholder_file::{PlaceholderFile, PlaceholderFileError};

/// Default limit for markup replacements expanding further markup
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Default limit for markup replacements expanded in one render
pub const DEFAULT_MAX_EXPANSIONS: usize = 4096;

/// Configuration for tag rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Report tags that could not be substituted instead of only keeping them
    pub strict: bool,
    /// How many levels of markup replacements may be expanded
    pub max_depth: usize,
    /// How many markup replacements one render may expand in total
    pub max_expansions: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the markup expansion depth limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the total markup expansion limit
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

/// Substitute placeholder tags with default configuration
///
/// Tags the resolver has nothing for are left in the output as written.
pub fn render(source: &str, resolver: &dyn PlaceholderResolver) -> Result<String, Vec<TagError>> {
    render_with_config(source, resolver, RenderConfig::default())
}

/// Substitute placeholder tags with custom configuration
pub fn render_with_config(
    source: &str,
    resolver: &dyn PlaceholderResolver,
    config: RenderConfig,
) -> Result<String, Vec<TagError>> {
    tag::expand(source, resolver, &config)
}
