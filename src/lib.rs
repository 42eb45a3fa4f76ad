//! baidu-token-probe
//!
//! One-shot diagnostic for the Baidu OAuth 2.0 token endpoint: try each
//! candidate credential pair once, print every response, and let the
//! operator decide which secret is the real one. Not a client library;
//! the crate surface exists for the binary and its integration tests.

pub mod candidates;
pub mod cli;
pub mod error;
pub mod probe;

pub use candidates::{CandidateSet, Credential};
pub use error::ProbeError;
pub use probe::{ProbeOutcome, ProbeSettings, TokenProbe};
