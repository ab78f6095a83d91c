//! Error types for tag rendering

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Unresolved placeholder <{key}> at {span:?}")]
    Unresolved { key: String, span: Span },

    #[error("Placeholder <{key}> at {span:?} resolved to {type_name}, which cannot be rendered as text")]
    Unrenderable {
        key: String,
        type_name: &'static str,
        span: Span,
    },

    #[error("Placeholder <{key}> at {span:?} exceeded the markup expansion depth of {limit}")]
    DepthExceeded {
        key: String,
        span: Span,
        limit: usize,
    },

    #[error("Placeholder <{key}> at {span:?} exceeded the limit of {limit} markup expansions")]
    ExpansionLimit {
        key: String,
        span: Span,
        limit: usize,
    },
}

impl TagError {
    /// Span of the tag in the rendered source
    pub fn span(&self) -> &Span {
        match self {
            TagError::Unresolved { span, .. }
            | TagError::Unrenderable { span, .. }
            | TagError::DepthExceeded { span, .. }
            | TagError::ExpansionLimit { span, .. } => span,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            TagError::Unresolved { key, .. }
            | TagError::Unrenderable { key, .. }
            | TagError::DepthExceeded { key, .. }
            | TagError::ExpansionLimit { key, .. } => key,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// The report is uncoloured.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let (message, label) = match self {
            TagError::Unresolved { key, .. } => (
                format!("Unresolved placeholder <{}>", key),
                "no resolver has a replacement for this tag".to_string(),
            ),
            TagError::Unrenderable { key, type_name, .. } => (
                format!("Placeholder <{}> cannot be rendered as text", key),
                format!("resolved to {}", type_name),
            ),
            TagError::DepthExceeded { key, limit, .. } => (
                format!("Placeholder <{}> expands too deeply", key),
                format!("markup nested more than {} levels", limit),
            ),
            TagError::ExpansionLimit { key, limit, .. } => (
                format!("Placeholder <{}> expands too much", key),
                format!("render already expanded {} markup replacements", limit),
            ),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, self.span().start)
            .with_config(Config::default().with_color(false))
            .with_message(message)
            .with_label(Label::new((filename, self.span().clone())).with_message(label))
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
