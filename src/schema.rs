use indexmap::IndexMap;
use serde_json::{json, Value};

/// Normalizes a raw header cell into a field name: surrounding whitespace is
/// trimmed and every internal whitespace run collapses to one underscore.
/// Normalizing an already-normalized name yields the same name.
pub fn normalize_field_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Declared type of a schema field. Header-driven discovery only ever
/// declares strings; value-based type inference is a downstream concern.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FieldType {
    String,
}

impl FieldType {
    /// Returns the JSON Schema type name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
        }
    }
}

/// A named, typed field in a stream schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Normalized field name
    pub name: String,
    /// Declared field type
    pub kind: FieldType,
}

/// Ordered record schema of one stream, inferred from its header row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamSchema {
    fields: Vec<Field>,
}

impl StreamSchema {
    /// Infers a schema from a raw header row.
    ///
    /// Blank cells produce no field; every other cell becomes a string-typed
    /// field under its normalized name, in column order. Duplicate
    /// normalized names are kept as-is here and resolve last-write-wins when
    /// the schema is rendered or records are built.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let fields = header
            .iter()
            .map(|cell| normalize_field_name(cell.as_ref()))
            .filter(|name| !name.is_empty())
            .map(|name| Field {
                name,
                kind: FieldType::String,
            })
            .collect();
        StreamSchema { fields }
    }

    /// Fields in column order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field names in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Renders the schema as a JSON Schema object for downstream consumers.
    /// Property order follows column order; fields are nullable strings since
    /// absent trailing cells normalize to empty values.
    pub fn to_json(&self) -> Value {
        let properties: IndexMap<&str, Value> = self
            .fields
            .iter()
            .map(|field| (field.name.as_str(), json!({ "type": [field.kind.as_str(), "null"] })))
            .collect();
        json!({
            "type": "object",
            "properties": properties,
        })
    }
}
