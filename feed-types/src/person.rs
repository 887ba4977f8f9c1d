//! The person entity.

use crate::PersonId;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;

/// A remote account holder.
///
/// Immutable after construction. Equality and hashing are by [`PersonId`]
/// only: two values with the same id are interchangeable even when their
/// profile fields differ (e.g. a display name changed between fetches).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    id: PersonId,
    username: String,
    display_name: String,
    avatar: Url,
    location: String,
    following: bool,
}

impl Person {
    /// Create a Person from a parsed remote payload.
    pub fn new(
        id: PersonId,
        username: impl Into<String>,
        display_name: impl Into<String>,
        avatar: Url,
        location: impl Into<String>,
        following: bool,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            avatar,
            location: location.into(),
            following,
        }
    }

    /// The stable remote identity.
    pub fn id(&self) -> &PersonId {
        &self.id
    }

    /// The account handle (login name).
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The human-readable name.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The avatar image location.
    pub fn avatar(&self) -> &Url {
        &self.avatar
    }

    /// The free-form profile location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Whether the session's user follows this person.
    pub fn following(&self) -> bool {
        self.following
    }

    /// The name to show in lists: the handle when the host prefers
    /// usernames, the display name otherwise.
    pub fn display_value(&self, prefer_username: bool) -> &str {
        if prefer_username {
            &self.username
        } else {
            &self.display_name
        }
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
