use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use baidu_token_probe::candidates::CandidateSet;
use baidu_token_probe::cli::Cli;
use baidu_token_probe::probe::{ProbeOutcome, ProbeSettings, TokenProbe};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

/// Setup errors (bad flags, bad URL) come back as `Err` and exit 1.
/// Probe failures do not: every candidate is tried, every result printed,
/// and the run still counts as a success.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = ProbeSettings::new(
        &cli.token_url,
        cli.verify_tls,
        Duration::from_secs(cli.timeout_secs),
    )?;
    let candidates = CandidateSet::resolve(cli.api_key.clone(), &cli.secrets)
        .context("failed to resolve credential candidates")?;
    let probe = TokenProbe::new(&settings)?;

    println!("--- Starting Token Test ---");

    let mut granted: Vec<String> = Vec::new();
    for credential in candidates.iter() {
        let outcome = probe.run(credential).await;
        match &outcome {
            ProbeOutcome::Failed { reason } => {
                println!("Testing {} Failed: {}", credential.label, reason);
            }
            ProbeOutcome::Token { body }
            | ProbeOutcome::Denied { body }
            | ProbeOutcome::Opaque { body } => {
                println!("Testing {}: {}", credential.label, body);
                if outcome.is_token() {
                    granted.push(credential.label.clone());
                }
            }
        }
    }

    println!("--- End Token Test ---");

    match granted.as_slice() {
        [] => println!("No candidate produced an access token."),
        labels => println!("Access token granted for: {}", labels.join(", ")),
    }

    Ok(())
}
