//! REST Countries v3.1 wire format.
//!
//! Only the fields the browser shows are modelled; everything else in the
//! payload is ignored. Mapping into `Record` happens here so the engine never
//! sees the remote shape.

use std::collections::HashSet;

use atlas_core::{Dataset, FetchError, Record};
use serde::Deserialize;

/// One country as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryWire {
    pub name: NameWire,

    /// Zero or more capitals; null for some territories.
    #[serde(default)]
    pub capital: Option<Vec<String>>,

    #[serde(default)]
    pub flags: FlagsWire,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameWire {
    pub common: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlagsWire {
    #[serde(default)]
    pub png: Option<String>,

    #[serde(default)]
    pub svg: Option<String>,
}

impl CountryWire {
    /// Map to a record. Returns None when the name is blank.
    pub fn into_record(self) -> Option<Record> {
        let name = self.name.common.trim();
        if name.is_empty() {
            return None;
        }

        let capital = self
            .capital
            .and_then(|c| c.into_iter().map(|s| s.trim().to_string()).find(|s| !s.is_empty()));
        let flag_url = self.flags.png.or(self.flags.svg).unwrap_or_default();

        Some(Record {
            name: name.to_string(),
            capital,
            flag_url,
        })
    }
}

/// Map wire countries to a dataset, keeping source order.
///
/// Blank names are dropped. Duplicate names are kept; the engine tolerates
/// them.
pub fn to_dataset(countries: Vec<CountryWire>) -> Dataset {
    let total = countries.len();
    let mut seen = HashSet::new();
    let mut dataset = Vec::with_capacity(total);

    for country in countries {
        match country.into_record() {
            Some(record) => {
                if !seen.insert(record.name.clone()) {
                    tracing::warn!("Duplicate country name '{}'", record.name);
                }
                dataset.push(record);
            }
            None => tracing::warn!("Dropping country with empty name"),
        }
    }

    if dataset.len() != total {
        tracing::debug!("Kept {} of {} countries", dataset.len(), total);
    }
    dataset
}

/// Parse a JSON payload into a dataset.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, FetchError> {
    let countries: Vec<CountryWire> =
        serde_json::from_slice(bytes).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(to_dataset(countries))
}
