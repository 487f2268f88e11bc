//! Per-stream reading: one [`SheetStream`] per discovered sheet entry,
//! producing a lazy sequence of normalized records.

use crate::catalog::SelectionMetadata;
use crate::schema::StreamSchema;
use crate::sheets::client::SheetsApi;
use crate::stream::records::{normalize_rows, NormalizedRows};
use thiserror::Error;
use tracing::info;

pub mod discover;
pub mod records;

/// Errors related to reading a discovered stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Sheet values response for stream '{0}' contained no rows")]
    EmptyValues(String),
}

/// Receives the authoritative schema of a stream before its first record.
///
/// Consumers may have cached the schema at discovery time; the stream
/// publishes the schema derived from the freshly fetched header exactly once
/// per read so they observe the version the records actually conform to.
pub trait SchemaSink {
    fn publish(&mut self, stream_name: &str, schema: &StreamSchema);
}

/// A discovered output stream bound to one configured sheet entry.
///
/// All addressing data is resolved at discovery time and immutable
/// afterwards.
#[derive(Clone, Debug)]
pub struct SheetStream {
    /// Output stream name
    pub name: String,
    /// Schema inferred from the header row at discovery time
    pub schema: StreamSchema,
    /// Declared primary key columns, unvalidated against the schema
    pub primary_keys: Vec<String>,
    /// Canonical spreadsheet ID
    pub spreadsheet_id: String,
    /// Tab to read within the spreadsheet
    pub child_sheet_name: String,
    /// Configured data range in A1 notation, if any
    pub range: Option<String>,
}

impl SheetStream {
    /// Path segment addressing this stream's values: the child sheet name,
    /// with the configured range appended as `!{range}` when present.
    pub fn values_segment(&self) -> String {
        match &self.range {
            Some(range) => format!("{}!{}", self.child_sheet_name, range),
            None => self.child_sheet_name.clone(),
        }
    }

    /// Fetches the stream's full data range and returns its records.
    ///
    /// The first returned row is the header; the remaining rows become
    /// records, filtered by the catalog selection. Before the iterator is
    /// handed back, the schema re-derived from the fetched header is
    /// published through `sink`. The result is lazy, finite, and single-pass.
    pub fn read_records<C: SheetsApi + ?Sized, S: SchemaSink + ?Sized>(
        &self,
        client: &C,
        selection: &SelectionMetadata,
        sink: &mut S,
    ) -> Result<NormalizedRows, crate::error::TapError> {
        let response = client.get_values(&self.spreadsheet_id, &self.values_segment())?;
        let mut rows = response.values.into_iter();
        let header = rows
            .next()
            .ok_or_else(|| StreamError::EmptyValues(self.name.clone()))?;
        info!(
            "Stream '{}': fetched {} data row(s) from '{}'",
            self.name,
            rows.len(),
            response.range
        );

        let schema = StreamSchema::from_header(&header);
        sink.publish(&self.name, &schema);

        let selected = selection.selected_columns();
        Ok(normalize_rows(&header, rows.collect(), &selected))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeSheetsApi, RecordingSink};
    use super::*;
    use crate::stream::records::Record;

    fn stream(range: Option<&str>) -> SheetStream {
        SheetStream {
            name: "people".to_owned(),
            schema: StreamSchema::from_header(&["Name", "Age"]),
            primary_keys: vec![],
            spreadsheet_id: "sheet-1".to_owned(),
            child_sheet_name: "Tab One".to_owned(),
            range: range.map(str::to_owned),
        }
    }

    #[test]
    fn values_segment_without_range() {
        assert_eq!(stream(None).values_segment(), "Tab One");
    }

    #[test]
    fn values_segment_with_range() {
        assert_eq!(stream(Some("A1:B5")).values_segment(), "Tab One!A1:B5");
    }

    #[test]
    fn read_records_publishes_schema_then_yields_rows() {
        let client = FakeSheetsApi::new().with_values(
            "sheet-1",
            "Tab One",
            "Tab One!A1:B3",
            &[&["Name", "Age"], &["Ada", "36"], &["Grace"]],
        );
        let mut sink = RecordingSink::default();
        let stream = stream(None);

        let records: Vec<Record> = stream
            .read_records(&client, &SelectionMetadata::default(), &mut sink)
            .unwrap()
            .collect();

        assert_eq!(sink.published.len(), 1);
        assert_eq!(sink.published[0].0, "people");
        let names: Vec<&str> = sink.published[0].1.field_names().collect();
        assert_eq!(names, vec!["Name", "Age"]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name").unwrap(), "Ada");
        assert_eq!(records[0].get("Age").unwrap(), "36");
        assert_eq!(records[1].get("Age").unwrap(), "");
    }

    #[test]
    fn read_records_applies_catalog_selection() {
        let client = FakeSheetsApi::new().with_values(
            "sheet-1",
            "Tab One",
            "Tab One!A1:B2",
            &[&["Name", "Age"], &["Ada", "36"]],
        );
        let mut sink = RecordingSink::default();
        let selection: SelectionMetadata =
            serde_json::from_str(r#"{"fields": {"Age": true}}"#).unwrap();

        let records: Vec<Record> = stream(None)
            .read_records(&client, &selection, &mut sink)
            .unwrap()
            .collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0].get("Age").unwrap(), "36");
    }

    #[test]
    fn read_records_fails_on_empty_values() {
        let client = FakeSheetsApi::new().with_values("sheet-1", "Tab One", "Tab One", &[]);
        let mut sink = RecordingSink::default();

        let result = stream(None).read_records(&client, &SelectionMetadata::default(), &mut sink);
        assert!(result.is_err());
        assert!(sink.published.is_empty());
    }
}
