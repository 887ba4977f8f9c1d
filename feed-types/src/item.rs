//! The item entity.

use crate::{ItemId, Person};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One message in a feed.
///
/// Immutable after construction. Equality and hashing are by [`ItemId`]
/// only, which is what the merge step deduplicates on.
///
/// There are two construction paths: [`Item::new`] for items parsed from a
/// remote payload (server-assigned id and date) and [`Item::local`] for
/// optimistic posts (client-generated id, empty date).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    sender: Person,
    recipients: Vec<Person>,
    message: String,
    date: String,
}

impl Item {
    /// Create an Item from a parsed remote payload.
    pub fn new(
        id: ItemId,
        sender: Person,
        recipients: Vec<Person>,
        message: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            sender,
            recipients,
            message: message.into(),
            date: date.into(),
        }
    }

    /// Synthesize a local item for an optimistic post.
    ///
    /// The id is a fresh UUID and the date is empty; the server assigns the
    /// real values once the post is confirmed and re-fetched.
    pub fn local(message: impl Into<String>, to: Person, from: Person) -> Self {
        Self {
            id: ItemId::random(),
            sender: from,
            recipients: vec![to],
            message: message.into(),
            date: String::new(),
        }
    }

    /// The unique identity of this item.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Who authored the item.
    pub fn sender(&self) -> &Person {
        &self.sender
    }

    /// Who the item is addressed to.
    pub fn recipients(&self) -> &[Person] {
        &self.recipients
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The server-defined ordering token. Empty for optimistic local items.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The recipient of a one-to-one item, if it has exactly one.
    pub fn sole_recipient(&self) -> Option<&Person> {
        match self.recipients.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
