//! Record and Dataset types for the country directory.

use serde::{Deserialize, Serialize};

/// A single country in the directory.
///
/// The display name is the key used for matching and selection. It is
/// unique within one fetch and never empty; the fetch boundary enforces
/// the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Common display name, e.g. "France".
    pub name: String,

    /// Capital city, if the country has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,

    /// Flag image reference.
    #[serde(default)]
    pub flag_url: String,
}

impl Record {
    /// Create a new record with no capital.
    pub fn new(name: impl Into<String>, flag_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capital: None,
            flag_url: flag_url.into(),
        }
    }

    /// Set the capital.
    pub fn with_capital(mut self, capital: impl Into<String>) -> Self {
        self.capital = Some(capital.into());
        self
    }

    /// Case-insensitive prefix test against the display name.
    ///
    /// An empty query matches every record.
    pub fn name_starts_with(&self, query: &str) -> bool {
        self.name.to_lowercase().starts_with(&query.to_lowercase())
    }

    /// Exact (case-sensitive) display name comparison.
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

/// The full, ordered record list from one fetch.
pub type Dataset = Vec<Record>;
