//! Named form templates over a key-value storage collaborator.
//!
//! The core never requires persistence — the surrounding app may offer it
//! as a convenience. All templates live as one JSON array under a single
//! well-known key, so any string key-value backend works (browser
//! localStorage, a settings file, an in-memory map in tests).

use crate::model::FormDefinition;
use crate::schema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The well-known storage key holding the template collection.
pub const TEMPLATES_KEY: &str = "formTemplates";

/// A saved, named form definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub definition: FormDefinition,
}

/// Minimal storage seam the vault persists through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory backend, used in tests and as a session-only fallback.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template name was empty or whitespace-only.
    BlankName,
    /// Refused to persist or export an empty definition.
    EmptyForm,
    /// Underlying storage or serialization failure.
    Storage(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::BlankName => write!(f, "template name must not be blank"),
            TemplateError::EmptyForm => write!(f, "the form definition is empty"),
            TemplateError::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for TemplateError {}

/// Produce the downloadable export payload for a definition.
///
/// The empty-form refusal lives here, at the tool level — the model itself
/// happily represents an empty definition.
pub fn export_json(definition: &FormDefinition) -> Result<String, TemplateError> {
    if definition.is_empty() {
        return Err(TemplateError::EmptyForm);
    }
    schema::to_json_pretty(definition).map_err(|e| TemplateError::Storage(e.to_string()))
}

/// Reads and writes the template collection through a [`KeyValueStore`].
pub struct TemplateVault<S> {
    store: S,
}

impl<S: KeyValueStore> TemplateVault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Append a named template to the collection.
    pub fn save(&mut self, name: &str, definition: &FormDefinition) -> Result<(), TemplateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::BlankName);
        }
        if definition.is_empty() {
            return Err(TemplateError::EmptyForm);
        }

        let mut templates = self.load_all();
        templates.push(Template {
            name: name.to_string(),
            definition: definition.clone(),
        });
        let payload =
            serde_json::to_string(&templates).map_err(|e| TemplateError::Storage(e.to_string()))?;
        self.store.set(TEMPLATES_KEY, payload);
        log::debug!("saved template {name:?} ({} total)", templates.len());
        Ok(())
    }

    /// Every saved template. A missing or corrupt collection yields the
    /// empty list — storage is a convenience, never a source of truth.
    pub fn load_all(&self) -> Vec<Template> {
        let Some(raw) = self.store.get(TEMPLATES_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(templates) => templates,
            Err(err) => {
                log::warn!("discarding corrupt template collection: {err}");
                Vec::new()
            }
        }
    }

    /// The most recently saved template with this name, if any.
    pub fn find(&self, name: &str) -> Option<Template> {
        self.load_all().into_iter().rev().find(|t| t.name == name)
    }
}
