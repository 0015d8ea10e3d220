use serde::{Deserialize, Serialize};

use super::torrent::ANONYMOUS;

/// Text fields scraped from a torrent's detail page.
///
/// `title` is required when decoding; a record without one is treated as a
/// failed fetch rather than an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub title: String,

    #[serde(default = "default_submitter")]
    pub submitter: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,
}

impl DetailRecord {
    /// Creates a detail record with an anonymous submitter and no category or description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            submitter: ANONYMOUS.to_string(),
            category: String::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_submitter(mut self, submitter: impl Into<String>) -> Self {
        self.submitter = submitter.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns `true` when the page named a real uploader account.
    #[must_use]
    pub fn has_named_submitter(&self) -> bool {
        !self.submitter.is_empty() && self.submitter != ANONYMOUS
    }
}

impl Default for DetailRecord {
    fn default() -> Self {
        Self::new("")
    }
}

fn default_submitter() -> String {
    ANONYMOUS.to_string()
}
