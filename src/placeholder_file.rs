//! Placeholder files
//!
//! A placeholder file is a TOML document listing text and markup placeholders, so a set of
//! substitutions can be kept next to the templates that use them.
//!
//! ```toml
//! [metadata]
//! name = "greeting"
//!
//! [text]
//! name = "Steve"
//!
//! [markup]
//! welcome = "Welcome, <name>!"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::placeholder::{self, Placeholder, PlaceholderError, SharedResolver};

/// Errors that can occur when loading or parsing placeholder files
#[derive(Error, Debug)]
pub enum PlaceholderFileError {
    #[error("Failed to read placeholder file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse placeholder TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid placeholder: {0}")]
    InvalidPlaceholder(#[from] PlaceholderError),
}

/// Placeholders loaded from a file
#[derive(Debug, Clone)]
pub struct PlaceholderFile {
    /// Optional name for the placeholder set
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Text placeholders first, then markup, each sorted by key
    pub placeholders: Vec<Placeholder>,
}

/// TOML structure for deserializing placeholder files
#[derive(Deserialize)]
struct TomlPlaceholderFile {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    text: BTreeMap<String, String>,
    #[serde(default)]
    markup: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl PlaceholderFile {
    /// Load placeholders from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PlaceholderFileError> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            placeholders = file.placeholders.len(),
            "loaded placeholder file"
        );
        Ok(file)
    }

    /// Load placeholders from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, PlaceholderFileError> {
        let parsed: TomlPlaceholderFile = toml::from_str(content)?;

        let text = parsed
            .text
            .into_iter()
            .map(|(key, value)| Placeholder::text(key, value));
        let markup = parsed
            .markup
            .into_iter()
            .map(|(key, value)| Placeholder::markup(key, value));
        let placeholders = text.chain(markup).collect::<Result<Vec<_>, _>>()?;

        Ok(PlaceholderFile {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            placeholders,
        })
    }

    /// Build a resolver over these placeholders
    ///
    /// A markup entry overrides a text entry with the same key.
    pub fn resolver(&self) -> SharedResolver {
        placeholder::placeholder_list(&self.placeholders)
    }
}
