//! Rendered output of one snapshot

use std::collections::BTreeMap;

/// One rendered, non-empty snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSnippet {
    /// File extension taken from the template, without the dot.
    pub extension: String,
    /// Rendered text.
    pub content: String,
}

/// Every non-empty snippet of one snapshot, keyed and ordered by snippet name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    snippets: BTreeMap<String, RenderedSnippet>,
}

impl RenderedDocument {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snippets: BTreeMap::new(),
        }
    }

    /// Adds a snippet, replacing any previous one of the same name.
    pub fn insert(&mut self, name: impl Into<String>, snippet: RenderedSnippet) {
        self.snippets.insert(name.into(), snippet);
    }

    /// Returns the rendered text of a snippet.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.snippets.get(name).map(|s| s.content.as_str())
    }

    /// Returns a snippet with its extension.
    #[must_use]
    pub fn snippet(&self, name: &str) -> Option<&RenderedSnippet> {
        self.snippets.get(name)
    }

    /// Returns true if a snippet of that name was rendered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.snippets.contains_key(name)
    }

    /// Iterates snippets in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RenderedSnippet)> {
        self.snippets.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Returns the snippet names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.snippets.keys().map(String::as_str).collect()
    }

    /// Returns the number of snippets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    /// Returns true if no snippet was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Flattens into a name-to-text map.
    #[must_use]
    pub fn into_texts(self) -> BTreeMap<String, String> {
        self.snippets
            .into_iter()
            .map(|(name, s)| (name, s.content))
            .collect()
    }
}
