use crate::schema::normalize_field_name;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Per-stream field selection flags recorded by the consuming catalog.
///
/// Field names are keyed as the catalog stored them, which may be raw header
/// text or already-normalized names; [`SelectionMetadata::selected_columns`]
/// re-normalizes defensively so both spellings address the same column.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SelectionMetadata {
    /// Field name to selected flag
    #[serde(default)]
    pub fields: HashMap<String, bool>,
}

impl SelectionMetadata {
    /// Computes the set of selected, normalized column names.
    ///
    /// An empty result means no explicit selection was recorded, which
    /// downstream consumers treat as "select every discovered field".
    pub fn selected_columns(&self) -> HashSet<String> {
        self.fields
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(name, _)| normalize_field_name(name))
            .collect()
    }
}

/// Selection metadata for all streams, keyed by stream name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Catalog {
    /// Stream name to its selection metadata
    #[serde(default)]
    pub streams: HashMap<String, SelectionMetadata>,
}

impl Catalog {
    /// Returns the selection for one stream; streams absent from the catalog
    /// have no explicit selection and fall back to select-all.
    pub fn selection_for(&self, stream_name: &str) -> SelectionMetadata {
        self.streams.get(stream_name).cloned().unwrap_or_default()
    }
}
