use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors related to loading and validating the tap configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config must provide a 'sheets' list or a top-level 'sheet_id'")]
    NoSheetsConfigured,
}

/// OAuth client material handed to the external auth layer.
/// Token acquisition and refresh happen outside this crate.
#[derive(Clone, Debug, Deserialize)]
pub struct OauthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Configuration of a single sheet entry. Built once when the config is
/// loaded and immutable afterwards; discovery derives everything else.
#[derive(Clone, Debug, Deserialize)]
pub struct SheetConfig {
    /// Spreadsheet ID or sharing URL
    pub sheet_id: String,
    /// Optional rename of the output stream
    #[serde(default)]
    pub output_name: Option<String>,
    /// Optional tab to read instead of the first visible one
    #[serde(default)]
    pub child_sheet_name: Option<String>,
    /// Optional primary key columns, in declaration order
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Optional data range in A1 notation
    #[serde(default)]
    pub range: Option<String>,
}

/// Top-level tap configuration.
///
/// A config either carries a `sheets` list or describes a single sheet with
/// the same fields at the top level; `effective_sheets` resolves both forms.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TapConfig {
    #[serde(default)]
    pub oauth_credentials: Option<OauthCredentials>,
    #[serde(default)]
    pub sheets: Vec<SheetConfig>,
    #[serde(default)]
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub output_name: Option<String>,
    #[serde(default)]
    pub child_sheet_name: Option<String>,
    #[serde(default)]
    pub key_properties: Vec<String>,
    #[serde(default)]
    pub range: Option<String>,
}

impl TapConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::ParseError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Returns the configured sheet entries: the `sheets` list when present,
    /// otherwise the single entry described by the top-level fields.
    pub fn effective_sheets(&self) -> Result<Vec<SheetConfig>, ConfigError> {
        if !self.sheets.is_empty() {
            return Ok(self.sheets.clone());
        }
        let sheet_id = self
            .sheet_id
            .clone()
            .ok_or(ConfigError::NoSheetsConfigured)?;
        Ok(vec![SheetConfig {
            sheet_id,
            output_name: self.output_name.clone(),
            child_sheet_name: self.child_sheet_name.clone(),
            key_properties: self.key_properties.clone(),
            range: self.range.clone(),
        }])
    }
}
