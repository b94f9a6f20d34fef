//! pr-activity CLI entrypoint: loads one pull request's activity and writes
//! it to stdout as JSON Lines.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pr_activity::export::{write_jsonl, write_pull_request};
use pr_activity::{
    ActivityConfig, ActivityIntake, IntakeError, PersonalAccessToken, PullRequestLocator,
    ReqwestGateway,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if let Some(info) = error.exhausted_rate_limit() {
                tracing::warn!(
                    limit = info.limit(),
                    reset_at = info.reset_at(),
                    seconds_until_reset = info.seconds_until_reset(),
                    "GitHub rate limit exhausted"
                );
            }
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run() -> Result<(), IntakeError> {
    let config = load_config()?;

    let pr_url = config.require_pr_url()?;
    let token_value = config.resolve_token()?;

    let locator = PullRequestLocator::parse(pr_url)?;
    let token = PersonalAccessToken::new(token_value)?;

    let gateway = ReqwestGateway::for_token(&token, &locator)?;
    let intake = if config.skip_checks {
        ActivityIntake::new(&gateway).without_checks()
    } else {
        ActivityIntake::new(&gateway)
    };

    let cancel = CancellationToken::new();
    if let Some(timeout) = config.timeout() {
        arm_deadline(cancel.clone(), timeout);
    }

    let activity = intake.load(&locator, &cancel).await?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    if config.with_pull_request {
        write_pull_request(&mut stdout, &activity.pull_request)?;
    }
    write_jsonl(&mut stdout, &activity.events)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<ActivityConfig, IntakeError> {
    ActivityConfig::load().map_err(|error| IntakeError::Configuration {
        message: error.to_string(),
    })
}

/// Cancels `cancel` once `timeout` has elapsed.
fn arm_deadline(cancel: CancellationToken, timeout: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;
        tracing::warn!(
            timeout_seconds = timeout.as_secs(),
            "deadline reached; cancelling outstanding requests"
        );
        cancel.cancel();
    });
}
