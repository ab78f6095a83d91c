//! Placeholder resolution for tagged markup
//!
//! A [`PlaceholderResolver`] maps a tag name to a [`Replacement`], or reports that it has
//! nothing for that name. Resolvers compose: a fixed map, a memoized generator and any
//! number of ordered fallbacks can be stacked behind one handle and handed to the tag
//! renderer.
//!
//! # Example
//!
//! ```rust
//! use placeholder_resolver::placeholder::{self, Placeholder, Replacement};
//!
//! let names = placeholder::placeholder_list(&[Placeholder::text("name", "Steve").unwrap()]);
//! let clock = placeholder::dynamic(|key: &str| {
//!     (key == "time").then(|| Replacement::text("12:00"))
//! });
//! let resolver = placeholder::combining(&[names, clock]);
//!
//! assert_eq!(resolver.resolve("name").unwrap().as_text(), Some("Steve"));
//! assert_eq!(resolver.resolve("time").unwrap().as_text(), Some("12:00"));
//! assert!(resolver.resolve("other").is_none());
//! ```

mod dynamic;
mod grouped;
mod map;
mod replacement;
mod resolver;

pub use dynamic::DynamicResolver;
pub use grouped::GroupedResolver;
pub use map::{shared_map, MapResolver, PlaceholderMap};
pub use replacement::{is_valid_key, Markup, Placeholder, PlaceholderError, Replacement};
pub use resolver::{
    combining, combining_iter, dynamic, empty, map, placeholder_list, placeholders,
    EmptyResolver, PlaceholderResolver, SharedResolver,
};
