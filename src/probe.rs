//! The token probe itself.
//!
//! One probe is one HTTPS GET against the OAuth token endpoint with
//! `grant_type=client_credentials`. The response body is decoded as JSON
//! and printed whole; classification only drives the summary line, the
//! probe never acts on specific fields beyond looking for `access_token`
//! and `error`.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::candidates::Credential;
use crate::error::{ProbeError, Result};

/// Baidu's OAuth 2.0 token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://aip.baidubce.com/oauth/2.0/token";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// How much of an unparseable body is kept in the error message.
const BODY_SNIPPET_LEN: usize = 200;

/// Settings shared by every probe in one run.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub token_url: Url,
    /// When false, certificate chain and hostname validation are disabled
    /// for the run. This matches the original debugging script and is off
    /// by default on purpose; see the `--verify-tls` flag.
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl ProbeSettings {
    pub fn new(token_url: &str, verify_tls: bool, timeout: Duration) -> Result<Self> {
        let token_url = Url::parse(token_url).map_err(|source| ProbeError::InvalidEndpoint {
            url: token_url.to_string(),
            source,
        })?;
        Ok(Self {
            token_url,
            verify_tls,
            timeout,
        })
    }
}

/// What one probe produced. `Token`, `Denied` and `Opaque` all carry the
/// full decoded body; the distinction only feeds the summary.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The body contained an `access_token`.
    Token { body: Value },
    /// The body contained an `error` code.
    Denied { body: Value },
    /// Valid JSON with neither field.
    Opaque { body: Value },
    /// Transport, TLS, HTTP-status or JSON-decode failure.
    Failed { reason: String },
}

impl ProbeOutcome {
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Token { body } | Self::Denied { body } | Self::Opaque { body } => Some(body),
            Self::Failed { .. } => None,
        }
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token { .. })
    }
}

/// The two JSON shapes the endpoint answers with.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TokenResponse {
    Granted {
        access_token: String,
        #[serde(default)]
        expires_in: Option<u64>,
    },
    Denied {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

/// Issues token requests. Holds one `reqwest::Client`, built once and
/// reused across the sequential probes; it is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct TokenProbe {
    client: Client,
    token_url: Url,
}

impl TokenProbe {
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        if !settings.verify_tls {
            warn!("TLS certificate validation is disabled for this run");
        }
        let client = Client::builder()
            .danger_accept_invalid_certs(!settings.verify_tls)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            client,
            token_url: settings.token_url.clone(),
        })
    }

    /// Run one probe. Never returns an error: every failure is folded
    /// into `ProbeOutcome::Failed` so the caller can print it and move on
    /// to the next candidate.
    pub async fn run(&self, credential: &Credential) -> ProbeOutcome {
        debug!(
            label = %credential.label,
            api_key = %credential.api_key,
            secret = credential.masked_secret(),
            "probing token endpoint"
        );
        match self.request_token(credential).await {
            Ok(body) => classify(body),
            Err(err) => ProbeOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }

    async fn request_token(&self, credential: &Credential) -> Result<Value> {
        // Query serialization percent-encodes the values, so `&` or `%`
        // inside a candidate secret cannot break parameter boundaries.
        let response = self
            .client
            .get(self.token_url.clone())
            .query(&[
                ("grant_type", "client_credentials"),
                ("client_id", credential.api_key.as_str()),
                ("client_secret", credential.secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "token endpoint responded");

        if !status.is_success() {
            return Err(ProbeError::Status {
                status,
                body: snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ProbeError::Decode {
            source,
            body: snippet(&body),
        })
    }
}

/// Sort a decoded body into an outcome by the two fields the endpoint is
/// known to use.
fn classify(body: Value) -> ProbeOutcome {
    match serde_json::from_value::<TokenResponse>(body.clone()) {
        Ok(TokenResponse::Granted { .. }) => ProbeOutcome::Token { body },
        Ok(TokenResponse::Denied { .. }) => ProbeOutcome::Denied { body },
        Err(_) => ProbeOutcome::Opaque { body },
    }
}

fn snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_LEN {
        body.to_string()
    } else {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < BODY_SNIPPET_LEN)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    }
}
