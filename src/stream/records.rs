use crate::schema::normalize_field_name;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// One output record: an ordered mapping from normalized column name to
/// cell value. Only selected, named columns appear; values are always
/// strings, with `""` standing in for absent cells.
pub type Record = IndexMap<String, String>;

/// Lazy, single-pass iterator over normalized records, one per raw row.
pub struct NormalizedRows {
    /// Normalized name per header position; `None` marks a masked-out column
    columns: Vec<Option<String>>,
    rows: std::vec::IntoIter<Vec<String>>,
}

/// Reshapes raw rows into schema-conforming records.
///
/// Every header cell is normalized positionally; a column is included when
/// its header is non-blank and its normalized name is selected. An empty
/// `selection` selects every named column. Rows may be shorter than the
/// header (the API omits trailing empty cells) and pair missing values with
/// `""`; values beyond the header are dropped.
pub fn normalize_rows<S: AsRef<str>>(
    header: &[S],
    rows: Vec<Vec<String>>,
    selection: &HashSet<String>,
) -> NormalizedRows {
    let normalized: Vec<String> = header
        .iter()
        .map(|cell| normalize_field_name(cell.as_ref()))
        .collect();

    let effective: HashSet<&str> = if selection.is_empty() {
        normalized
            .iter()
            .filter(|name| !name.is_empty())
            .map(String::as_str)
            .collect()
    } else {
        selection.iter().map(String::as_str).collect()
    };

    let columns = normalized
        .iter()
        .map(|name| {
            (!name.is_empty() && effective.contains(name.as_str())).then(|| name.clone())
        })
        .collect();

    NormalizedRows {
        columns,
        rows: rows.into_iter(),
    }
}

impl Iterator for NormalizedRows {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let row = self.rows.next()?;
        if row.len() > self.columns.len() {
            debug!(
                "Dropping {} trailing value(s) of a row longer than the header",
                row.len() - self.columns.len()
            );
        }
        let mut record = Record::new();
        for (index, name) in self.columns.iter().enumerate() {
            let Some(name) = name else { continue };
            let value = row.get(index).cloned().unwrap_or_default();
            // Duplicate normalized names resolve last-write-wins.
            record.insert(name.clone(), value);
        }
        Some(record)
    }
}
