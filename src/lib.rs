//! # Google Sheets Tap
//!
//! A synchronous extraction connector that reads tabular data from Google
//! Sheets and emits it as structured records with an inferred schema, for
//! ingestion by a downstream data pipeline.
//!
//! ## Features
//!
//! - **Flexible addressing**: Accept bare spreadsheet IDs or full sharing
//!   URLs, and optional data ranges in A1 notation
//! - **Schema inference**: Build an ordered record schema from the header
//!   row with a single cheap header-line fetch per sheet
//! - **Column selection**: Honor catalog selection metadata, with
//!   header-name normalization applied on both sides
//! - **Sparse rows**: Normalize partial rows the values API returns into
//!   complete records with empty-string fill
//! - **Schema re-publication**: Push the authoritative schema to an
//!   attached sink before the first record of each stream
//!
//! ## Workflow
//!
//! [`stream::discover::discover_streams`] turns a [`config::TapConfig`]
//! into one [`stream::SheetStream`] per configured sheet entry; each
//! stream's `read_records` then yields its normalized records. Catalog
//! persistence, state checkpointing, record-message emission, token
//! refresh, and retry policy all belong to the surrounding framework.

pub mod catalog;
pub mod config;
pub mod error;
pub mod schema;
pub mod sheets;
pub mod stream;

pub use crate::catalog::{Catalog, SelectionMetadata};
pub use crate::config::{SheetConfig, TapConfig};
pub use crate::error::TapError;
pub use crate::schema::{normalize_field_name, StreamSchema};
pub use crate::sheets::client::{HttpSheetsClient, SheetsApi};
pub use crate::stream::discover::discover_streams;
pub use crate::stream::records::Record;
pub use crate::stream::{SchemaSink, SheetStream};
