use std::path::PathBuf;

use serde_derive::Deserialize;

/// Runtime settings, usually read from a RON file:
///
/// ```ron
/// (
///     data_dir: "./strive-data",
///     fiscal_year: 2025,
///     contact_aliases: [("aws", "AWS")],
///     log_json: false,
/// )
/// ```
///
/// Every field is optional; missing fields take the default value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StriveConfig {
    /// Directory holding one JSON file per storage key.
    pub data_dir: PathBuf,
    /// Only entries due in this year are accepted by the ledger.
    pub fiscal_year: i32,
    /// Extra contact filter keys, on top of the built-in ones.
    pub contact_aliases: Vec<(String, String)>,
    pub log_json: bool,
}

impl Default for StriveConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("strive-data"),
            fiscal_year: 2025,
            contact_aliases: Vec::new(),
            log_json: false,
        }
    }
}
