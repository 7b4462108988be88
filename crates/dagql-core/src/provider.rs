//! Provider capability facts.
//!
//! Capabilities are supplied by the caller (typically from a config file) and
//! treated as opaque facts. Nothing here knows about specific providers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What a behavioral-analytics provider can express in one funnel query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCapability {
    /// Provider can drop cohort members who visited a node, in-query.
    #[serde(default)]
    pub supports_native_exclude: bool,
    #[serde(default)]
    pub supports_visited: bool,
    #[serde(default)]
    pub supports_ordered: bool,
    /// Longest funnel (number of steps) a single query may carry. `None` = unbounded.
    #[serde(default)]
    pub max_funnel_length: Option<u32>,
}

impl ProviderCapability {
    /// Provider with native exclusion; the compiler emits one `exclude` query.
    pub fn native_exclude() -> Self {
        Self {
            supports_native_exclude: true,
            supports_visited: true,
            supports_ordered: true,
            max_funnel_length: None,
        }
    }

    /// Ordered-funnel provider without exclusion; needs inclusion-exclusion.
    pub fn funnel_only() -> Self {
        Self {
            supports_native_exclude: false,
            supports_visited: true,
            supports_ordered: true,
            max_funnel_length: None,
        }
    }

    pub fn with_max_funnel_length(mut self, limit: u32) -> Self {
        self.max_funnel_length = Some(limit);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("provider capability document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown provider `{name}` (known: {known})")]
    UnknownProvider { name: String, known: String },
}

/// Lookup table `provider name -> capability`.
///
/// Names are matched case-insensitively; the first spelling seen is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderRegistry {
    providers: IndexMap<String, ProviderCapability>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: IndexMap<String, ProviderCapability> = serde_json::from_str(json)?;
        let mut registry = Self::new();
        for (name, capability) in raw {
            registry.insert(&name, capability);
        }
        Ok(registry)
    }

    /// Register or replace a provider.
    pub fn insert(&mut self, name: &str, capability: ProviderCapability) {
        match self.find_key(name) {
            Some(key) => {
                self.providers.insert(key, capability);
            }
            None => {
                self.providers.insert(name.to_owned(), capability);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProviderCapability> {
        let key = self.find_key(name)?;
        self.providers.get(&key)
    }

    /// Like [`get`](Self::get), with an error naming the known providers.
    pub fn require(&self, name: &str) -> Result<&ProviderCapability, RegistryError> {
        self.get(name).ok_or_else(|| RegistryError::UnknownProvider {
            name: name.to_owned(),
            known: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn find_key(&self, name: &str) -> Option<String> {
        let name = name.trim();
        self.providers
            .keys()
            .find(|k| k.eq_ignore_ascii_case(name))
            .cloned()
    }
}
