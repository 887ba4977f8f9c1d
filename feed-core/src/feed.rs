//! Per-feed pagination and merge state.
//!
//! This module provides the accumulated state of one feed:
//! - The fetch cursor (the "since" watermark for the next page)
//! - The append-accumulated item collection
//! - The dedup/merge rule that keeps item ids unique across overlapping
//!   fetch windows
//!
//! The state is pure: `feed-client` calls the transport, then applies the
//! returned page here.

use feed_types::{Cursor, FeedType, Item, Person, PersonId};
use std::collections::HashSet;

/// Collapse a collection to the first occurrence of each item id,
/// preserving the relative order of first occurrence.
///
/// This is the merge primitive: concatenating an overlapping page onto the
/// existing collection and running this pass can never duplicate an id,
/// and earlier items keep their original relative positions.
pub fn dedup_by_id(items: &mut Vec<Item>) {
    let mut seen = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.id().clone()));
}

/// The pagination state and accumulated items of one feed.
///
/// Items accumulate across fetches; they are never replaced wholesale.
/// The cursor always holds the `date` of the last item of the most
/// recently fetched *page* (not of the merged collection), matching the
/// server's "since" parameter semantics.
#[derive(Debug, Clone)]
pub struct FeedState {
    feed: FeedType,
    cursor: Option<Cursor>,
    items: Vec<Item>,
}

impl FeedState {
    /// Create an empty state with no cursor (first fetch returns the
    /// newest window).
    pub fn new(feed: FeedType) -> Self {
        Self {
            feed,
            cursor: None,
            items: Vec::new(),
        }
    }

    /// Create a state resuming from a persisted cursor.
    pub fn with_cursor(feed: FeedType, cursor: Cursor) -> Self {
        Self {
            feed,
            cursor: Some(cursor),
            items: Vec::new(),
        }
    }

    /// The feed this state belongs to.
    pub fn feed(&self) -> FeedType {
        self.feed
    }

    /// The current pagination watermark, if any page has been applied.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// The accumulated items in first-seen order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of accumulated items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A snapshot of the items sorted by id descending (newest first),
    /// regardless of insertion order.
    pub fn sorted_items(&self) -> Vec<Item> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.id().cmp(a.id()));
        items
    }

    /// Merge a fetched page into the collection.
    ///
    /// A non-empty page advances the cursor to the date of the *page's*
    /// last item; an empty page leaves the cursor untouched. The page is
    /// concatenated onto the existing items and collapsed to
    /// first-occurrence-per-id, so re-fetching an overlapping window can
    /// never create duplicates.
    pub fn apply_page(&mut self, page: &[Item]) {
        if let Some(last) = page.last() {
            self.cursor = Some(Cursor::new(last.date()));
        }
        self.items.extend_from_slice(page);
        dedup_by_id(&mut self.items);
    }

    /// Append a locally synthesized item without a dedup pass.
    ///
    /// The caller guarantees a fresh id (see `Item::local`).
    pub fn insert_local(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Drop every item authored by the given person.
    ///
    /// Returns how many items were removed.
    pub fn purge_sender(&mut self, sender: &PersonId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.sender().id() != sender);
        before - self.items.len()
    }

    /// Find an accumulated item's sender by account handle.
    ///
    /// Used to attribute optimistic posts to the session's own user.
    pub fn sender_by_username(&self, username: &str) -> Option<&Person> {
        self.items
            .iter()
            .map(Item::sender)
            .find(|sender| sender.username() == username)
    }
}
