//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. `Transport` is produced by the host when the
//! round-trip itself fails (connection refused, timeout).

use thiserror::Error;

/// Errors returned by `TodoClient` and by the host transport.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404, the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}
