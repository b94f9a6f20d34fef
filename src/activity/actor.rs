//! Actor resolution and bot detection.

use crate::github::models::{ApiApp, ApiUser};

/// Login recorded when a record carries no acting user.
pub const UNKNOWN_ACTOR: &str = "unknown";

/// Account type GitHub reports for automated identities.
const BOT_ACCOUNT_TYPE: &str = "Bot";

/// The user an event is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    /// Login name; [`UNKNOWN_ACTOR`] when the record had no user.
    pub login: String,
    /// Whether the login belongs to an automated identity.
    pub bot: bool,
}

impl Actor {
    /// Placeholder for records without an acting user.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            login: UNKNOWN_ACTOR.to_owned(),
            bot: false,
        }
    }
}

/// Returns true when the account `type` marks an automated identity.
#[must_use]
pub fn is_bot(account_type: Option<&str>) -> bool {
    account_type == Some(BOT_ACCOUNT_TYPE)
}

/// Returns the user when it is present and carries a login.
pub(crate) fn known_user(user: Option<&ApiUser>) -> Option<&ApiUser> {
    user.filter(|candidate| !candidate.login.is_empty())
}

/// Attributes a record to its user, falling back to [`Actor::unknown`].
pub(crate) fn resolve_actor(user: Option<&ApiUser>) -> Actor {
    known_user(user).map_or_else(Actor::unknown, |known| Actor {
        login: known.login.clone(),
        bot: is_bot(known.account_type.as_deref()),
    })
}

/// Attributes a check run to the owner of the app that produced it.
///
/// An app owner always counts as a bot. Without an owner the login is empty.
pub(crate) fn app_owner_actor(app: Option<&ApiApp>) -> Actor {
    app.and_then(|found| found.owner.as_ref())
        .map_or_else(Actor::default, |owner| Actor {
            login: owner.login.clone(),
            bot: true,
        })
}
