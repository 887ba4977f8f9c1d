//! Identity and ordering types for the feed synchronization core.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The stable remote identity of a person.
///
/// Two [`Person`](crate::Person) values with equal ids are interchangeable
/// regardless of their other fields.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(String);

impl PersonId {
    /// Create a PersonId from a server-assigned identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonId({})", self.0)
    }
}

/// The unique identity of an item within a feed.
///
/// Server-assigned for fetched items, client-generated (UUID v4) for
/// optimistic local items. Ids compare as plain strings; the descending
/// string order is the newest-first total order used for display, since
/// optimistic items may carry no date.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Create an ItemId from a server-assigned identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a fresh client-generated ItemId for an optimistic item.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

/// An opaque pagination watermark for one feed.
///
/// Holds the server-defined `date` token of the last item of the most
/// recently fetched page, and is passed back as the "since" parameter of
/// the next fetch. The value is never interpreted by the client.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor(String);

impl Cursor {
    /// Create a Cursor from an item's date token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the watermark token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.0)
    }
}
