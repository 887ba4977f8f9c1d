//! Per-feed fetch driver.
//!
//! A [`FeedSynchronizer`] owns one feed's [`FeedState`] and the shared
//! session transport. It performs the fetch/merge cycle: read the cursor,
//! call the transport *outside* the state lock, merge the returned page,
//! and hand the newly returned items back to the owning coordinator as
//! the notification delta.

use crate::transport::{Transport, TransportError};
use feed_core::FeedState;
use feed_types::{Cursor, FeedType, Item, Person, PersonId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Pagination state and item collection of one feed, bound to a transport.
///
/// The state lock is never held across the transport await. Two
/// overlapping `fetch()` calls can therefore both read the old cursor and
/// both advance it; each merge is individually dedup-safe, but cursor
/// advancement is last-write-wins rather than deterministic by request
/// order. The owning coordinator accepts this (feeds are refreshed, not
/// replayed).
pub struct FeedSynchronizer {
    feed: FeedType,
    transport: Arc<dyn Transport>,
    state: Mutex<FeedState>,
}

impl FeedSynchronizer {
    /// Create a synchronizer with an empty collection and no cursor.
    pub fn new(feed: FeedType, transport: Arc<dyn Transport>) -> Self {
        Self {
            feed,
            transport,
            state: Mutex::new(FeedState::new(feed)),
        }
    }

    /// The feed this synchronizer owns.
    pub fn feed(&self) -> FeedType {
        self.feed
    }

    /// Fetch the next page and merge it into the collection.
    ///
    /// Returns the newly returned items (the page, not the merged
    /// collection) for the owner to fan out. A failed fetch leaves the
    /// state untouched and surfaces the error to the owner.
    pub async fn fetch(&self) -> Result<Vec<Item>, TransportError> {
        let since = { self.state.lock().await.cursor().cloned() };

        let page = self.transport.fetch(self.feed, since.as_ref()).await?;

        let mut state = self.state.lock().await;
        state.apply_page(&page);
        debug!(
            feed = %self.feed,
            page = page.len(),
            total = state.len(),
            "merged fetched page"
        );
        Ok(page)
    }

    /// Append a locally synthesized item (optimistic post).
    pub async fn add_local(&self, item: Item) {
        self.state.lock().await.insert_local(item);
    }

    /// Drop every item authored by the given person.
    ///
    /// Returns how many items were removed.
    pub async fn purge_sender(&self, sender: &PersonId) -> usize {
        self.state.lock().await.purge_sender(sender)
    }

    /// A snapshot of the merged collection, newest first by id.
    pub async fn items(&self) -> Vec<Item> {
        self.state.lock().await.sorted_items()
    }

    /// The current pagination watermark.
    pub async fn cursor(&self) -> Option<Cursor> {
        self.state.lock().await.cursor().cloned()
    }

    /// Find a sender in the collection by account handle.
    pub async fn sender_by_username(&self, username: &str) -> Option<Person> {
        self.state.lock().await.sender_by_username(username).cloned()
    }
}
