use thiserror::Error;

/// Main error type for the tap.
/// Aggregates errors from configuration, addressing, transport, and stream
/// reading; all of them propagate upward uncaught.
#[derive(Error, Debug)]
pub enum TapError {
    #[error("{0}")]
    ConfigError(#[from] crate::config::ConfigError),

    #[error("{0}")]
    SpreadsheetIdError(#[from] crate::sheets::id::SpreadsheetIdError),

    #[error("{0}")]
    RangeError(#[from] crate::sheets::range::RangeError),

    #[error("{0}")]
    ClientError(#[from] crate::sheets::client::ClientError),

    #[error("{0}")]
    StreamError(#[from] crate::stream::StreamError),
}
