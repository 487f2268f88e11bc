//! HTTP boundary for the Google Sheets and Drive endpoints.
//!
//! All remote access goes through the [`SheetsApi`] trait so discovery and
//! stream reading can run against an in-memory implementation in tests. The
//! real implementation is a blocking [`ureq`] client; retries, backoff, and
//! token refresh belong to the surrounding framework, not to this crate.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default base URL of the spreadsheet values API.
pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Default base URL of the file metadata API.
pub const DRIVE_FILES_BASE_URL: &str = "https://www.googleapis.com/drive/v2/files";

/// Errors related to remote spreadsheet access.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid endpoint URL '{0}'")]
    EndpointError(String),

    #[error("GET {url} failed: {source}")]
    RequestError {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("GET {url} returned a malformed body: {source}")]
    MalformedBody {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Response body of the values endpoint.
///
/// `values` is required: a payload without it is malformed and fails the
/// request rather than being repaired. The first inner array is the header
/// row; trailing empty cells are omitted by the API, so inner rows may be
/// shorter than the header.
#[derive(Clone, Debug, Deserialize)]
pub struct ValueRange {
    /// The concrete range the service resolved, e.g. `"Sheet1!A1:C5"`
    pub range: String,
    /// Row-major cell values, header row first
    pub values: Vec<Vec<String>>,
}

/// Response body of the file metadata endpoint, reduced to the title.
#[derive(Clone, Debug, Deserialize)]
pub struct FileMetadata {
    /// Display name of the spreadsheet document
    pub title: String,
}

/// Blocking access to the two remote endpoints this connector needs.
pub trait SheetsApi {
    /// Fetches cell values for `segment`, a `{child_sheet}!{a1_range}` path
    /// component (either part may be empty).
    fn get_values(&self, spreadsheet_id: &str, segment: &str) -> Result<ValueRange, ClientError>;

    /// Fetches document metadata for a resolved spreadsheet ID.
    fn get_file_metadata(&self, spreadsheet_id: &str) -> Result<FileMetadata, ClientError>;
}

/// [`SheetsApi`] implementation over a blocking HTTP agent.
pub struct HttpSheetsClient {
    agent: ureq::Agent,
    values_base: Url,
    metadata_base: Url,
    access_token: Option<String>,
}

impl HttpSheetsClient {
    /// Creates a client against the production Google endpoints.
    ///
    /// `access_token` is attached as a bearer token when present; acquiring
    /// and refreshing it is the caller's concern.
    pub fn new(access_token: Option<String>) -> Result<Self, ClientError> {
        Self::with_base_urls(SHEETS_BASE_URL, DRIVE_FILES_BASE_URL, access_token)
    }

    /// Creates a client against custom base URLs, used to point at a local
    /// server in tests.
    pub fn with_base_urls(
        values_base: &str,
        metadata_base: &str,
        access_token: Option<String>,
    ) -> Result<Self, ClientError> {
        Ok(HttpSheetsClient {
            agent: ureq::Agent::new_with_defaults(),
            values_base: parse_base_url(values_base)?,
            metadata_base: parse_base_url(metadata_base)?,
            access_token,
        })
    }

    /// Builds the values endpoint URL `{base}/{id}/values/{segment}` with
    /// percent-encoded path segments (child sheet names may contain spaces).
    fn values_url(&self, spreadsheet_id: &str, segment: &str) -> Result<Url, ClientError> {
        let mut url = self.values_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::EndpointError(self.values_base.to_string()))?
            .push(spreadsheet_id)
            .push("values")
            .push(segment);
        Ok(url)
    }

    /// Builds the metadata endpoint URL `{base}/{id}`.
    fn metadata_url(&self, spreadsheet_id: &str) -> Result<Url, ClientError> {
        let mut url = self.metadata_base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::EndpointError(self.metadata_base.to_string()))?
            .push(spreadsheet_id);
        Ok(url)
    }

    /// Issues a blocking GET and deserializes the JSON body.
    /// Non-success statuses surface as request errors; no retries here.
    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, ClientError> {
        debug!("GET {url}");
        let mut request = self.agent.get(url.as_str());
        if let Some(token) = &self.access_token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let body = request
            .call()
            .and_then(|response| response.into_body().read_to_string())
            .map_err(|source| ClientError::RequestError {
                url: url.to_string(),
                source: Box::new(source),
            })?;
        serde_json::from_str(&body).map_err(|source| ClientError::MalformedBody {
            url: url.to_string(),
            source,
        })
    }
}

impl SheetsApi for HttpSheetsClient {
    fn get_values(&self, spreadsheet_id: &str, segment: &str) -> Result<ValueRange, ClientError> {
        let url = self.values_url(spreadsheet_id, segment)?;
        self.get_json(&url)
    }

    fn get_file_metadata(&self, spreadsheet_id: &str) -> Result<FileMetadata, ClientError> {
        let url = self.metadata_url(spreadsheet_id)?;
        self.get_json(&url)
    }
}

fn parse_base_url(base: &str) -> Result<Url, ClientError> {
    Url::parse(base).map_err(|_| ClientError::EndpointError(base.to_owned()))
}
