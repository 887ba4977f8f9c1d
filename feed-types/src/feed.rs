//! Feed variants for the synchronization core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independently-paginated remote resource stream.
///
/// Each variant is fetched, cursored and merged on its own; there is no
/// ordering or completion relationship across feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FeedType {
    /// Activity from everyone the user follows.
    Home,
    /// Replies and mentions directed at the user.
    UserActivity,
    /// Private one-to-one messages.
    PersonalMessages,
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Home => "home",
            Self::UserActivity => "user-activity",
            Self::PersonalMessages => "personal-messages",
        };
        write!(f, "{}", name)
    }
}
