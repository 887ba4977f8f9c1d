//! Conversation projections over a personal-message feed.
//!
//! These are the pure computations behind a conversation-list view:
//! - The distinct senders of a feed, in first-occurrence order
//! - A preview row per sender (the sender plus their most recent item)
//! - The filtered item list of a single one-to-one conversation
//!
//! All functions expect the item slice the way display code holds it:
//! newest first by id (the tie-break total order, since optimistic items
//! may carry no date).

use feed_types::{Item, Person};
use std::collections::HashSet;

/// The distinct senders of a slice of items, preserving the order in
/// which each sender first occurs.
pub fn unique_senders(items: &[Item]) -> Vec<Person> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(Item::sender)
        .filter(|sender| seen.insert(sender.id().clone()))
        .cloned()
        .collect()
}

/// One conversation-list row: a sender and their most recent item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationPreview {
    /// The conversation partner.
    pub person: Person,
    /// Their most recent item, for the preview line.
    pub latest: Item,
}

/// Compute one preview row per distinct sender.
///
/// With a newest-first input slice, the first item seen for each sender is
/// their most recent one, so rows come out in most-recently-active order.
pub fn conversation_previews(items: &[Item]) -> Vec<ConversationPreview> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.sender().id().clone()))
        .map(|item| ConversationPreview {
            person: item.sender().clone(),
            latest: item.clone(),
        })
        .collect()
}

/// The items belonging to a one-to-one conversation with `person`: those
/// they sent, plus those addressed solely to them.
pub fn conversation_with(items: &[Item], person: &Person) -> Vec<Item> {
    items
        .iter()
        .filter(|item| {
            item.sender() == person || item.sole_recipient().is_some_and(|to| to == person)
        })
        .cloned()
        .collect()
}
