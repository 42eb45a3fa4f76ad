//! Candidate credential pairs for a probe run.
//!
//! The original debugging session had exactly two secrets on the table,
//! identical except for a lowercase "l" vs an uppercase "I". The defaults
//! here reproduce that setup: edit the placeholders in place, or supply
//! real values through flags or environment variables.

use thiserror::Error;

/// Placeholder API key, meant to be replaced before a real run.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_BAIDU_API_KEY_HERE";

/// Placeholder secret candidates, labeled by the ambiguous character.
pub const PLACEHOLDER_SECRETS: [(&str, &str); 2] = [
    ("lowercase l", "YOUR_BAIDU_SECRET_KEY_HERE"),
    ("uppercase I", "YOUR_BAIDU_SECRET_KEY_HERE"),
];

/// Environment variable overriding the API key.
pub const ENV_API_KEY: &str = "BAIDU_API_KEY";

/// Environment variable overriding the secret candidates, as a
/// comma-separated list of `LABEL=SECRET` pairs.
pub const ENV_SECRET_CANDIDATES: &str = "BAIDU_SECRET_CANDIDATES";

/// One credential pair to try against the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub label: String,
    pub api_key: String,
    pub secret: String,
}

impl Credential {
    pub fn new(
        label: impl Into<String>,
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    /// Masked form of the secret for log output. The real value never
    /// appears in logs.
    pub fn masked_secret(&self) -> &'static str {
        if self.secret.is_empty() {
            "EMPTY"
        } else {
            "***"
        }
    }
}

/// The ordered list of credentials for one run. Each entry is probed
/// exactly once, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    credentials: Vec<Credential>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CandidateError {
    #[error("invalid secret candidate '{value}', expected LABEL=SECRET")]
    InvalidPair { value: String },

    #[error("secret candidate has an empty label: '{value}'")]
    EmptyLabel { value: String },
}

impl CandidateSet {
    /// Resolve the candidate set from CLI flags and the process
    /// environment. Flags win over environment variables, which win over
    /// the in-source placeholders.
    pub fn resolve(
        api_key: Option<String>,
        secrets: &[String],
    ) -> Result<Self, CandidateError> {
        let env_api_key = std::env::var(ENV_API_KEY).ok();
        let env_secrets = std::env::var(ENV_SECRET_CANDIDATES).ok();
        Self::resolve_from(api_key, secrets, env_api_key, env_secrets)
    }

    /// Pure resolution step, separated from environment access so it can
    /// be tested without mutating process state.
    pub fn resolve_from(
        api_key: Option<String>,
        secrets: &[String],
        env_api_key: Option<String>,
        env_secrets: Option<String>,
    ) -> Result<Self, CandidateError> {
        let api_key = api_key
            .or(env_api_key)
            .unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string());

        let labeled: Vec<(String, String)> = if !secrets.is_empty() {
            secrets
                .iter()
                .map(|s| parse_labeled_secret(s))
                .collect::<Result<_, _>>()?
        } else if let Some(env_value) = env_secrets {
            env_value
                .split(',')
                .map(|s| parse_labeled_secret(s.trim()))
                .collect::<Result<_, _>>()?
        } else {
            PLACEHOLDER_SECRETS
                .iter()
                .map(|(label, secret)| (label.to_string(), secret.to_string()))
                .collect()
        };

        let credentials = labeled
            .into_iter()
            .map(|(label, secret)| Credential::new(label, api_key.clone(), secret))
            .collect();

        Ok(Self { credentials })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.iter()
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// Split a `LABEL=SECRET` argument. The secret may itself contain `=`,
/// only the first one separates.
pub fn parse_labeled_secret(value: &str) -> Result<(String, String), CandidateError> {
    let mut parts = value.splitn(2, '=');
    let label = parts.next().unwrap_or_default().trim();
    let secret = match parts.next() {
        Some(secret) => secret,
        None => {
            return Err(CandidateError::InvalidPair {
                value: value.to_string(),
            })
        }
    };
    if label.is_empty() {
        return Err(CandidateError::EmptyLabel {
            value: value.to_string(),
        });
    }
    Ok((label.to_string(), secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_labeled_secret_splits_on_first_equals() {
        let (label, secret) = parse_labeled_secret("uppercase I=abc=def").unwrap();
        assert_eq!(label, "uppercase I");
        assert_eq!(secret, "abc=def");
    }

    #[test]
    fn parse_labeled_secret_rejects_missing_separator() {
        let err = parse_labeled_secret("no-separator").unwrap_err();
        assert_eq!(
            err,
            CandidateError::InvalidPair {
                value: "no-separator".to_string()
            }
        );
    }

    #[test]
    fn parse_labeled_secret_rejects_empty_label() {
        let err = parse_labeled_secret("=secret").unwrap_err();
        assert!(matches!(err, CandidateError::EmptyLabel { .. }));
    }

    #[test]
    fn defaults_reproduce_the_original_two_candidates() {
        let set = CandidateSet::resolve_from(None, &[], None, None).unwrap();
        assert_eq!(set.len(), 2);
        let labels: Vec<_> = set.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["lowercase l", "uppercase I"]);
        assert!(set.iter().all(|c| c.api_key == PLACEHOLDER_API_KEY));
    }

    #[test]
    fn flags_win_over_environment() {
        let set = CandidateSet::resolve_from(
            Some("flag-key".to_string()),
            &["only=flag-secret".to_string()],
            Some("env-key".to_string()),
            Some("a=1,b=2".to_string()),
        )
        .unwrap();
        assert_eq!(set.len(), 1);
        let cred = set.iter().next().unwrap();
        assert_eq!(cred.api_key, "flag-key");
        assert_eq!(cred.secret, "flag-secret");
    }

    #[test]
    fn environment_candidates_are_comma_separated() {
        let set = CandidateSet::resolve_from(
            None,
            &[],
            Some("env-key".to_string()),
            Some("lowercase l=sec-l, uppercase I=sec-I".to_string()),
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        let secrets: Vec<_> = set.iter().map(|c| c.secret.as_str()).collect();
        assert_eq!(secrets, vec!["sec-l", "sec-I"]);
    }

    #[test]
    fn secrets_are_masked_in_display_form() {
        let cred = Credential::new("label", "key", "super-secret");
        assert_eq!(cred.masked_secret(), "***");
        let empty = Credential::new("label", "key", "");
        assert_eq!(empty.masked_secret(), "EMPTY");
    }
}
