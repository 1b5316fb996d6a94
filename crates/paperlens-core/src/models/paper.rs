use serde::{Deserialize, Serialize};

use crate::lenient;

/// Metadata for one paper, as returned by the search step and fed to the
/// summarizer. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    #[serde(default)]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::string_or_list")]
    pub author: Vec<String>,

    /// The abstract.
    #[serde(default)]
    pub summary: String,

    #[serde(default)]
    pub link: String,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub published: String,

    #[serde(default, deserialize_with = "lenient::string_or_list")]
    pub categories: Vec<String>,
}

impl PaperMetadata {
    pub fn authors_line(&self) -> String {
        self.author.join(", ")
    }

    pub fn categories_line(&self) -> String {
        self.categories.join(", ")
    }
}
