//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pr-activity.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PR_ACTIVITY_PR_URL`, `PR_ACTIVITY_TOKEN`,
//!    `PR_ACTIVITY_TIMEOUT_SECONDS`, or the `GITHUB_TOKEN`/`GH_TOKEN` fallback
//! 4. **Command-line arguments** – `--pr-url`/`-u`, `--token`/`-t`,
//!    `--timeout-seconds`, `--skip-checks`/`-s`, and
//!    `--with-pull-request`/`-p`
//!
//! # Configuration File
//!
//! ```toml
//! pr_url = "https://github.com/owner/repo/pull/123"
//! token = "ghp_example"
//! timeout_seconds = 120
//! skip_checks = false
//! with_pull_request = true
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::error::IntakeError;

/// Environment variables consulted, in order, when no token is configured.
const TOKEN_FALLBACK_VARIABLES: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pr_activity::ActivityConfig;
///
/// let config = ActivityConfig::load().expect("failed to load configuration");
/// let pr_url = config.require_pr_url().expect("PR URL required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PR_ACTIVITY",
    discovery(
        dotfile_name = ".pr-activity.toml",
        config_file_name = "pr-activity.toml",
        app_name = "pr-activity"
    )
)]
pub struct ActivityConfig {
    /// GitHub pull request URL to load.
    ///
    /// Can be provided via:
    /// - CLI: `--pr-url <URL>` or `-u <URL>`
    /// - Environment: `PR_ACTIVITY_PR_URL`
    /// - Config file: `pr_url = "..."`
    #[ortho_config(cli_short = 'u')]
    pub pr_url: Option<String>,

    /// Personal access token for GitHub API authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PR_ACTIVITY_TOKEN`, then `GITHUB_TOKEN` or `GH_TOKEN`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Overall deadline for loading one pull request, in seconds.
    ///
    /// When it passes, in-flight requests are cancelled and the load fails.
    /// Zero disables the deadline. Defaults to five minutes.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Leaves commit statuses and check runs out of the output.
    ///
    /// Can be provided via:
    /// - CLI: `--skip-checks` / `-s`
    /// - Config file: `skip_checks = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment, so there is no environment variable for this flag.
    #[ortho_config(cli_short = 's')]
    pub skip_checks: bool,

    /// Writes the pull request metadata as the first output line.
    ///
    /// Can be provided via:
    /// - CLI: `--with-pull-request` / `-p`
    /// - Config file: `with_pull_request = true`
    #[ortho_config(cli_short = 'p')]
    pub with_pull_request: bool,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            pr_url: None,
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            skip_checks: false,
            with_pull_request: false,
        }
    }
}

impl ActivityConfig {
    /// Resolves the token from configuration or the `GITHUB_TOKEN` and
    /// `GH_TOKEN` environment variables, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, IntakeError> {
        self.token
            .clone()
            .or_else(|| {
                TOKEN_FALLBACK_VARIABLES
                    .iter()
                    .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
            })
            .ok_or(IntakeError::MissingToken)
    }

    /// Returns the pull request URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingPullRequestUrl`] when no URL is configured.
    pub fn require_pr_url(&self) -> Result<&str, IntakeError> {
        self.pr_url
            .as_deref()
            .ok_or(IntakeError::MissingPullRequestUrl)
    }

    /// Returns the load deadline, or `None` when it is disabled.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        if self.timeout_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_seconds))
        }
    }
}

#[cfg(test)]
mod tests;
