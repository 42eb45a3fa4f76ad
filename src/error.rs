//! Error types for the token probe.
//!
//! Every probe failure is reported to the operator as a single labeled
//! `Failed` line; the variants here keep the underlying causes apart for
//! logging and for tests.

use thiserror::Error;

/// Errors raised while setting up or running a single token probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Transport-level failure: DNS, connect, TLS handshake, timeout,
    /// or a broken response stream.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success HTTP status.
    #[error("token endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON in response body: {source} (body: {body})")]
    Decode {
        source: serde_json::Error,
        body: String,
    },

    /// The configured token endpoint URL could not be parsed.
    #[error("invalid token endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, ProbeError>;
