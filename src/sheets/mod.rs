//! Addressing and transport for the remote spreadsheet service:
//! identifier resolution, A1 range handling, and the HTTP client.

pub mod client;
pub mod id;
pub mod range;
