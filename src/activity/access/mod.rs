//! Write-access classification for event actors.
//!
//! GitHub attaches an author-association hint to comments, reviews, and some
//! timeline entries. The hint settles most cases without a request; the
//! ambiguous associations fall back to the collaborator permission endpoint.

use tokio_util::sync::CancellationToken;

use crate::github::error::IntakeError;
use crate::github::gateway::GitHubGateway;
use crate::github::locator::PullRequestLocator;
use crate::github::models::ApiPermission;

/// Repository permission level reported by the collaborator endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Full administrative access.
    Admin,
    /// Manage the repository without admin rights.
    Maintain,
    /// Push access.
    Write,
    /// Manage issues and pull requests without push access.
    Triage,
    /// Read-only access.
    Read,
    /// No access, or a level this crate does not recognise.
    None,
}

impl Permission {
    /// Parses GitHub's permission string; unknown values map to
    /// [`Permission::None`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "admin" => Self::Admin,
            "maintain" => Self::Maintain,
            "write" => Self::Write,
            "triage" => Self::Triage,
            "read" => Self::Read,
            _ => Self::None,
        }
    }

    /// Whether the level allows pushing to the repository.
    #[must_use]
    pub const fn grants_write(self) -> bool {
        matches!(self, Self::Admin | Self::Maintain | Self::Write)
    }
}

/// What an author-association hint says about write access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationDecision {
    /// The association implies write access.
    Granted,
    /// The association rules write access out.
    Denied,
    /// The association is ambiguous; ask the permission endpoint.
    Lookup,
}

/// Decides write access from an author association where possible.
///
/// # Example
///
/// ```
/// use pr_activity::activity::{AssociationDecision, decide_from_association};
///
/// assert_eq!(decide_from_association("OWNER"), AssociationDecision::Granted);
/// assert_eq!(decide_from_association("CONTRIBUTOR"), AssociationDecision::Lookup);
/// ```
#[must_use]
pub fn decide_from_association(association: &str) -> AssociationDecision {
    match association {
        "OWNER" | "MEMBER" | "COLLABORATOR" => AssociationDecision::Granted,
        "FIRST_TIMER" | "FIRST_TIME_CONTRIBUTOR" | "MANNEQUIN" => AssociationDecision::Denied,
        _ => AssociationDecision::Lookup,
    }
}

/// Resolves whether an actor had write access to the pull request's
/// repository.
///
/// Lookups are not cached; every ambiguous association costs one request.
pub struct WriteAccessClassifier<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    gateway: &'client Gateway,
    locator: &'client PullRequestLocator,
}

impl<'client, Gateway> WriteAccessClassifier<'client, Gateway>
where
    Gateway: GitHubGateway + ?Sized,
{
    /// Creates a classifier for the repository the locator points at.
    #[must_use]
    pub const fn new(gateway: &'client Gateway, locator: &'client PullRequestLocator) -> Self {
        Self { gateway, locator }
    }

    /// Returns whether `login` had write access, given its association.
    ///
    /// A failed lookup is logged and treated as no write access.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Cancelled`] when `cancel` fires during a
    /// lookup.
    pub async fn has_write_access(
        &self,
        login: &str,
        association: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, IntakeError> {
        match decide_from_association(association) {
            AssociationDecision::Granted => Ok(true),
            AssociationDecision::Denied => Ok(false),
            AssociationDecision::Lookup => self.lookup(login, cancel).await,
        }
    }

    async fn lookup(&self, login: &str, cancel: &CancellationToken) -> Result<bool, IntakeError> {
        let path = self.locator.permission_path(login);
        let outcome = self
            .gateway
            .get(&path, cancel)
            .await
            .and_then(|response| response.decode::<ApiPermission>());

        match outcome {
            Ok(found) => {
                let permission = Permission::parse(&found.permission);
                tracing::debug!(login, ?permission, "resolved collaborator permission");
                Ok(permission.grants_write())
            }
            Err(error) if error.is_cancelled() => Err(error),
            Err(error) => {
                tracing::warn!(login, %error, "permission lookup failed; assuming no write access");
                Ok(false)
            }
        }
    }
}
