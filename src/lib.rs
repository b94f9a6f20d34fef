//! Pull request activity intake for GitHub.
//!
//! The library walks every activity source of a single pull request through
//! the GitHub REST API and normalises the heterogeneous payloads into one
//! chronologically ordered stream of [`Event`]s, ready to be exported as
//! JSON Lines.
//!
//! # Example
//!
//! ```no_run
//! use pr_activity::{ActivityIntake, PersonalAccessToken, PullRequestLocator, ReqwestGateway};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), pr_activity::IntakeError> {
//! let locator = PullRequestLocator::parse("https://github.com/octo/repo/pull/7")?;
//! let token = PersonalAccessToken::new("ghp_example")?;
//! let gateway = ReqwestGateway::for_token(&token, &locator)?;
//!
//! let activity = ActivityIntake::new(&gateway)
//!     .load(&locator, &CancellationToken::new())
//!     .await?;
//! println!("{} events", activity.events.len());
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod config;
pub mod export;
pub mod github;

pub use activity::{Event, EventKind};
pub use config::ActivityConfig;
pub use github::{
    ActivityIntake, IntakeError, PersonalAccessToken, PullRequestActivity, PullRequestLocator,
    ReqwestGateway,
};
