//! URL-backed addressable filter state.
//!
//! [`UrlState`] mirrors criterion values into the query string of a page URL,
//! the way a browser page rewrites `location.search` with a history replace.
//! Only the current entry is ever rewritten; nothing is pushed.

use log::debug;
use url::Url;

use crate::engine::StateMirror;

/// Error type for location parsing
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Invalid page URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlState {
    url: Url,
    /// The URL as last committed with [`StateMirror::replace`].
    current_entry: String,
    replacements: usize,
}

impl UrlState {
    pub fn new(url: Url) -> Self {
        let current_entry = url.to_string();
        Self {
            url,
            current_entry,
            replacements: 0,
        }
    }

    pub fn parse(input: &str) -> Result<Self, LocationError> {
        let url = Url::parse(input).map_err(|source| LocationError::InvalidUrl {
            url: input.to_string(),
            source,
        })?;
        Ok(Self::new(url))
    }

    /// The working URL, including changes not yet committed.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL of the current history entry.
    pub fn current_entry(&self) -> &str {
        &self.current_entry
    }

    /// Number of times the current history entry was replaced.
    pub fn replacements(&self) -> usize {
        self.replacements
    }

    fn pairs(&self) -> Vec<(String, String)> {
        self.url.query_pairs().into_owned().collect()
    }

    fn write_pairs(&mut self, pairs: &[(String, String)]) {
        if pairs.is_empty() {
            self.url.set_query(None);
            return;
        }

        self.url
            .query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
}

impl StateMirror for UrlState {
    fn get(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Replace the first `key` in place and drop any later duplicates, or append.
    fn set(&mut self, key: &str, value: &str) {
        let mut found = false;
        let mut pairs: Vec<(String, String)> = self
            .pairs()
            .into_iter()
            .filter_map(|(k, v)| {
                if k != key {
                    return Some((k, v));
                }
                if found {
                    return None;
                }
                found = true;
                Some((k, value.to_string()))
            })
            .collect();

        if !found {
            pairs.push((key.to_string(), value.to_string()));
        }
        self.write_pairs(&pairs);
    }

    fn delete(&mut self, key: &str) {
        let pairs: Vec<(String, String)> =
            self.pairs().into_iter().filter(|(k, _)| k != key).collect();
        self.write_pairs(&pairs);
    }

    fn replace(&mut self) {
        self.current_entry = self.url.to_string();
        self.replacements += 1;
        debug!("Replaced history entry with {}", self.current_entry);
    }

    fn take_fragment(&mut self) -> Option<String> {
        let fragment = self.url.fragment().filter(|f| !f.is_empty())?.to_string();
        self.url.set_fragment(None);
        Some(fragment)
    }
}
