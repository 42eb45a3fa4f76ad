//! Command line surface.
//!
//! Every flag is optional; the defaults reproduce the original
//! edit-in-place script: Baidu endpoint, TLS validation off, two
//! placeholder secret candidates.

use clap::Parser;

use crate::probe::{DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "baidu-token-probe",
    version,
    about = "Probe the Baidu OAuth token endpoint with candidate credential pairs"
)]
pub struct Cli {
    /// API key (public client identifier). Falls back to BAIDU_API_KEY,
    /// then to the in-source placeholder.
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Secret candidate to try, as LABEL=SECRET. Repeatable; candidates
    /// are probed in the order given. Falls back to
    /// BAIDU_SECRET_CANDIDATES (comma-separated LABEL=SECRET pairs), then
    /// to the two in-source placeholders.
    #[arg(long = "secret", value_name = "LABEL=SECRET")]
    pub secrets: Vec<String>,

    /// Token endpoint to probe.
    #[arg(long, value_name = "URL", default_value = DEFAULT_TOKEN_URL)]
    pub token_url: String,

    /// Validate TLS certificates. Off by default: the probe deliberately
    /// mirrors the original debugging script, which disabled validation.
    #[arg(long)]
    pub verify_tls: bool,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_original_script() {
        let cli = Cli::parse_from(["baidu-token-probe"]);
        assert_eq!(cli.token_url, DEFAULT_TOKEN_URL);
        assert!(!cli.verify_tls);
        assert_eq!(cli.timeout_secs, 15);
        assert!(cli.api_key.is_none());
        assert!(cli.secrets.is_empty());
    }

    #[test]
    fn secret_flag_is_repeatable() {
        let cli = Cli::parse_from([
            "baidu-token-probe",
            "--secret",
            "lowercase l=abcl",
            "--secret",
            "uppercase I=abcI",
        ]);
        assert_eq!(cli.secrets.len(), 2);
        assert_eq!(cli.secrets[0], "lowercase l=abcl");
    }
}
