use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use s3_exposure_remediation::{
    RemediationError, RemediationService, Whitelist, WHITELIST_ENV_VAR,
};

/// Exit code for a failed invocation (malformed event, upstream failure).
const EXIT_INVOCATION_FAILED: u8 = 1;
/// Exit code for startup failures (missing or malformed configuration).
const EXIT_CONFIGURATION: u8 = 2;

/// Handle one S3 bucket change event and revert any public exposure it introduced.
#[derive(Parser, Debug)]
#[command(name = "s3-exposure-remediation", version, about, long_about = None)]
struct Cli {
    /// Path to the event JSON document; `-` reads from stdin
    #[arg(short, long, default_value = "-")]
    event: PathBuf,

    /// Comma-delimited bucket names exempted from remediation
    #[arg(long, env = WHITELIST_ENV_VAR)]
    whitelist: Option<String>,

    /// AWS region override for the S3 and STS clients
    #[arg(long)]
    region: Option<String>,

    /// Pretty-print the outcome
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();
}

fn load_whitelist(raw: Option<&str>) -> Result<Whitelist, RemediationError> {
    match raw {
        Some(raw) => Whitelist::parse(raw),
        None => Whitelist::from_env(),
    }
}

fn read_event(path: &Path) -> Result<serde_json::Value> {
    let text = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read event from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?
    };

    serde_json::from_str(&text)
        .map_err(|e| RemediationError::malformed(format!("event is not valid JSON: {e}")))
        .map_err(anyhow::Error::from)
}

async fn run(cli: Cli, whitelist: Whitelist) -> Result<()> {
    let envelope = read_event(&cli.event)?;

    let service = RemediationService::new(Arc::new(whitelist), cli.region).await;
    let outcome = service.handle(&envelope).await?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&outcome)
    } else {
        serde_json::to_string(&outcome)
    }
    .context("Failed to serialize outcome")?;
    println!("{rendered}");

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // The whitelist is validated once, before any event is looked at.
    let whitelist = match load_whitelist(cli.whitelist.as_deref()) {
        Ok(whitelist) => whitelist,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_CONFIGURATION);
        }
    };
    info!("Loaded whitelist with {} bucket(s)", whitelist.len());

    match run(cli, whitelist).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Remediation failed: {e:#}");
            ExitCode::from(EXIT_INVOCATION_FAILED)
        }
    }
}
