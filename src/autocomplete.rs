//! Prefix completion over the cached name catalog.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every creature name in the active range, in catalog order.
///
/// Loaded once per session and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NameIndex {
    names: Vec<String>,
}

impl NameIndex {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Names starting with `prefix`, ignoring case and surrounding whitespace.
    ///
    /// An empty prefix yields nothing. The iterator borrows the index, so it
    /// can be recreated at will.
    pub fn filter<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = prefix.trim().to_lowercase();
        let active = !prefix.is_empty();
        self.names
            .iter()
            .filter(move |name| active && name.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
    }

    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        self.filter(prefix).map(str::to_string).collect()
    }
}
