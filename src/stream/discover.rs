use crate::config::{SheetConfig, TapConfig};
use crate::error::TapError;
use crate::schema::StreamSchema;
use crate::sheets::client::SheetsApi;
use crate::sheets::id::resolve_spreadsheet_id;
use crate::sheets::range::first_line_range;
use crate::stream::{SheetStream, StreamError};
use tracing::info;

/// Discovers the output streams for every configured sheet entry.
///
/// Each entry costs one values request for its header line, plus one
/// metadata request when no `output_name` is configured. Entries whose
/// resolved stream name is empty are skipped; any resolution, range, or
/// fetch failure aborts the run with a diagnostic naming the entry.
pub fn discover_streams<C: SheetsApi + ?Sized>(
    config: &TapConfig,
    client: &C,
) -> Result<Vec<SheetStream>, TapError> {
    let mut streams = Vec::new();
    for sheet in config.effective_sheets()? {
        if let Some(stream) = discover_stream(&sheet, client)? {
            streams.push(stream);
        }
    }
    Ok(streams)
}

/// Discovers a single sheet entry; `None` when its stream name is empty.
fn discover_stream<C: SheetsApi + ?Sized>(
    sheet: &SheetConfig,
    client: &C,
) -> Result<Option<SheetStream>, TapError> {
    let spreadsheet_id = resolve_spreadsheet_id(&sheet.sheet_id)?;

    // Fetch only the header line, over the same column bounds the full
    // range fetch will use later.
    let header_range = first_line_range(sheet.range.as_deref())?;
    let segment = format!(
        "{}!{}",
        sheet.child_sheet_name.as_deref().unwrap_or(""),
        header_range
    );
    let header_response = client.get_values(&spreadsheet_id, &segment)?;
    let header = header_response
        .values
        .first()
        .ok_or_else(|| StreamError::EmptyValues(sheet.sheet_id.clone()))?;
    let schema = StreamSchema::from_header(header);

    let name = match &sheet.output_name {
        Some(name) => name.clone(),
        None => client.get_file_metadata(&spreadsheet_id)?.title,
    }
    .replace(' ', "_");
    if name.is_empty() {
        info!("Skipping sheet '{}': empty stream name", sheet.sheet_id);
        return Ok(None);
    }

    let child_sheet_name = match &sheet.child_sheet_name {
        Some(child) => child.clone(),
        None => first_visible_child_sheet(&header_response.range),
    };

    info!(
        "Discovered stream '{name}' ({} field(s), tab '{child_sheet_name}')",
        schema.fields().len()
    );
    Ok(Some(SheetStream {
        name,
        schema,
        primary_keys: sheet.key_properties.clone(),
        spreadsheet_id,
        child_sheet_name,
        range: sheet.range.clone(),
    }))
}

/// Derives the tab name from the addressable range of a values response,
/// e.g. `"Sheet1!A1:C1"` names `"Sheet1"`.
fn first_visible_child_sheet(range: &str) -> String {
    range
        .rsplit_once('!')
        .map(|(sheet, _)| sheet)
        .unwrap_or(range)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TapError;
    use crate::stream::testing::FakeSheetsApi;

    const ID_ONE: &str = "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms";
    const ID_TWO: &str = "2CyjNWt1YSB6oGNeLwCeCAkhnVVrqumct85PhwF3vqnt";

    fn config(sheets: &str) -> TapConfig {
        serde_json::from_str(&format!(r#"{{"sheets": {sheets}}}"#)).unwrap()
    }

    #[test]
    fn discovers_two_streams() {
        let client = FakeSheetsApi::new()
            .with_values(ID_ONE, "!1:1", "People!A1:B1", &[&["Name", "Age"]])
            .with_title(ID_ONE, "Team Roster")
            .with_values(ID_TWO, "!1:1", "Data!A1:A1", &[&["Id"]])
            .with_title(ID_TWO, "Inventory");
        let config = config(&format!(
            r#"[{{"sheet_id": "{ID_ONE}"}}, {{"sheet_id": "{ID_TWO}", "key_properties": ["Id"]}}]"#
        ));

        let streams = discover_streams(&config, &client).unwrap();
        assert_eq!(streams.len(), 2);

        assert_eq!(streams[0].name, "Team_Roster");
        assert_eq!(streams[0].child_sheet_name, "People");
        let names: Vec<&str> = streams[0].schema.field_names().collect();
        assert_eq!(names, vec!["Name", "Age"]);

        assert_eq!(streams[1].name, "Inventory");
        assert_eq!(streams[1].primary_keys, vec!["Id".to_owned()]);
    }

    #[test]
    fn explicit_output_name_skips_metadata_lookup() {
        let client = FakeSheetsApi::new().with_values(
            ID_ONE,
            "!1:1",
            "Sheet1!A1:B1",
            &[&["Name", "Age"]],
        );
        let config = config(&format!(
            r#"[{{"sheet_id": "{ID_ONE}", "output_name": "my output"}}]"#
        ));

        let streams = discover_streams(&config, &client).unwrap();
        assert_eq!(streams[0].name, "my_output");
        assert!(client
            .requests
            .borrow()
            .iter()
            .all(|request| !request.starts_with("files/")));
    }

    #[test]
    fn configured_range_narrows_header_fetch() {
        let client = FakeSheetsApi::new().with_values(
            ID_ONE,
            "Data!C4:G4",
            "Data!C4:G4",
            &[&["X", "Y"]],
        );
        let config = config(&format!(
            r#"[{{"sheet_id": "{ID_ONE}", "child_sheet_name": "Data", "range": "C4:G14", "output_name": "rows"}}]"#
        ));

        let streams = discover_streams(&config, &client).unwrap();
        assert_eq!(streams[0].range.as_deref(), Some("C4:G14"));
        assert_eq!(
            client.requests.borrow()[0],
            format!("{ID_ONE}/values/Data!C4:G4")
        );
    }

    #[test]
    fn empty_stream_name_is_skipped() {
        let client = FakeSheetsApi::new()
            .with_values(ID_ONE, "!1:1", "Sheet1!A1:B1", &[&["Name"]])
            .with_title(ID_ONE, "");
        let config = config(&format!(r#"[{{"sheet_id": "{ID_ONE}"}}]"#));

        let streams = discover_streams(&config, &client).unwrap();
        assert!(streams.is_empty());
    }

    #[test]
    fn unresolvable_sheet_id_aborts_discovery() {
        let client = FakeSheetsApi::new();
        let config = config(r#"[{"sheet_id": "definitely not an id"}]"#);

        let result = discover_streams(&config, &client);
        assert!(matches!(result, Err(TapError::SpreadsheetIdError(_))));
    }

    #[test]
    fn invalid_range_aborts_discovery() {
        let client = FakeSheetsApi::new();
        let config = config(&format!(
            r#"[{{"sheet_id": "{ID_ONE}", "range": "not a range"}}]"#
        ));

        let result = discover_streams(&config, &client);
        assert!(matches!(result, Err(TapError::RangeError(_))));
    }

    #[test]
    fn child_sheet_derived_from_response_range() {
        assert_eq!(first_visible_child_sheet("People!A1:B1"), "People");
        assert_eq!(first_visible_child_sheet("'My Tab'!A1:B1"), "'My Tab'");
        assert_eq!(first_visible_child_sheet("no-bang"), "no-bang");
    }
}
