//! Tag expansion against a resolver

use tracing::{debug, trace};

use super::lexer::{lex, Token};
use crate::error::{Span, TagError};
use crate::placeholder::{PlaceholderResolver, Replacement};
use crate::RenderConfig;

/// Expand every placeholder tag in `source`
///
/// Text replacements are inserted as is and markup replacements are expanded again, with
/// any errors inside them reported against the tag that pulled them in. A tag that cannot
/// be substituted is written back unchanged; in strict mode it is also reported.
///
/// Markup that nests deeper than `max_depth`, or a render that expands more than
/// `max_expansions` markup replacements in total, abandons the top-level tag being expanded:
/// its partial output is discarded, the tag is written back and a single error is reported.
pub fn expand(
    source: &str,
    resolver: &dyn PlaceholderResolver,
    config: &RenderConfig,
) -> Result<String, Vec<TagError>> {
    let mut expander = Expander {
        resolver,
        config,
        out: String::with_capacity(source.len()),
        errors: Vec::new(),
        expansions: 0,
        aborted: false,
    };
    expander.expand(source, None, 0);

    if expander.errors.is_empty() {
        Ok(expander.out)
    } else {
        Err(expander.errors)
    }
}

struct Expander<'a> {
    resolver: &'a dyn PlaceholderResolver,
    config: &'a RenderConfig,
    out: String,
    errors: Vec<TagError>,
    /// Markup replacements expanded so far in this render
    expansions: usize,
    /// Set when a limit is hit; unwinds to the top-level tag
    aborted: bool,
}

impl Expander<'_> {
    fn expand(&mut self, source: &str, origin: Option<&Span>, depth: usize) {
        for (token, span) in lex(source) {
            if self.aborted {
                return;
            }
            match token {
                Token::Text(text) => self.out.push_str(&text),
                Token::EscapedOpen => self.out.push('<'),
                Token::EscapedBackslash => self.out.push('\\'),
                Token::Tag(key) => match origin {
                    Some(origin) => self.substitute(key, origin.clone(), depth),
                    None => self.substitute_top_level(key, span),
                },
            }
        }
    }

    fn substitute_top_level(&mut self, key: String, span: Span) {
        let mark = self.out.len();
        self.substitute(key.clone(), span, 0);
        if self.aborted {
            self.aborted = false;
            self.out.truncate(mark);
            self.keep_tag(&key);
        }
    }

    fn substitute(&mut self, key: String, span: Span, depth: usize) {
        let Some(replacement) = self.resolver.resolve(&key) else {
            trace!(key = %key, "unresolved placeholder");
            self.keep_tag(&key);
            if self.config.strict {
                self.errors.push(TagError::Unresolved { key, span });
            }
            return;
        };

        if let Some(text) = replacement.as_text() {
            self.out.push_str(text);
        } else if let Some(markup) = replacement.as_markup() {
            if depth >= self.config.max_depth {
                let limit = self.config.max_depth;
                self.abort(TagError::DepthExceeded { key, span, limit });
                return;
            }
            if self.expansions >= self.config.max_expansions {
                let limit = self.config.max_expansions;
                self.abort(TagError::ExpansionLimit { key, span, limit });
                return;
            }
            self.expansions += 1;
            self.expand(markup.as_str(), Some(&span), depth + 1);
        } else {
            self.unrenderable(key, span, &replacement);
        }
    }

    fn abort(&mut self, error: TagError) {
        debug!(key = error.key(), "abandoning markup expansion: {}", error);
        self.errors.push(error);
        self.aborted = true;
    }

    fn unrenderable(&mut self, key: String, span: Span, replacement: &Replacement) {
        trace!(key = %key, payload = replacement.type_name(), "placeholder is not text");
        self.keep_tag(&key);
        if self.config.strict {
            self.errors.push(TagError::Unrenderable {
                key,
                type_name: replacement.type_name(),
                span,
            });
        }
    }

    fn keep_tag(&mut self, key: &str) {
        self.out.push('<');
        self.out.push_str(key);
        self.out.push('>');
    }
}
