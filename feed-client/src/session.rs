//! Session-level coordination: feed composition and observer fan-out.
//!
//! A [`SessionCoordinator`] owns one authenticated session: a fixed set of
//! [`FeedSynchronizer`]s created at construction, the shared transport,
//! and a dynamically registered set of display observers. All public
//! operations route through here; the coordinator validates, delegates to
//! the transport, updates the relevant feed state, and fans the change out
//! to every observer synchronously, in registration order.

use crate::synchronizer::FeedSynchronizer;
use crate::transport::{Transport, TransportError};
use feed_types::{FeedType, Item, Person};
use futures_util::future::join_all;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Errors from coordinator operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The feed was not configured on this coordinator at construction.
    #[error("no synchronizer configured for feed {0}")]
    UnknownFeed(FeedType),

    /// An optimistic post could not be attributed: no accumulated item in
    /// the target feed identifies the session's own user. The very first
    /// message of an empty conversation hits this.
    #[error("no item in feed {feed} identifies the current user {username}")]
    NoLocalIdentity {
        /// The feed the post targeted.
        feed: FeedType,
        /// The session's account handle.
        username: String,
    },

    /// The transport reported a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A display collaborator interested in feed changes.
///
/// Observers are registered by their own stable [`id`](Self::id) and are
/// never owned by the coordinator: a display must explicitly unregister
/// before its own teardown. Callbacks run synchronously on the notifying
/// turn and are the only delivery path for UI refresh signals, so they
/// must not block for long.
pub trait SessionDisplay: Send + Sync {
    /// Stable registration identity.
    fn id(&self) -> &str;

    /// Called with the delta items of one feed notification.
    ///
    /// An empty `items` slice signals "this feed mutated, re-read its full
    /// state via [`SessionCoordinator::items_for_feed`]".
    fn items_loaded(&self, coordinator: &SessionCoordinator, items: &[Item], feed: FeedType);
}

/// One authenticated session and its feeds.
pub struct SessionCoordinator {
    transport: Arc<dyn Transport>,
    feeds: Vec<FeedSynchronizer>,
    observers: Mutex<Vec<Arc<dyn SessionDisplay>>>,
}

impl SessionCoordinator {
    /// Create a coordinator with one synchronizer per requested feed.
    ///
    /// The feed set is fixed for the coordinator's lifetime.
    pub fn new(transport: Arc<dyn Transport>, feeds: &[FeedType]) -> Self {
        let synchronizers = feeds
            .iter()
            .map(|&feed| FeedSynchronizer::new(feed, Arc::clone(&transport)))
            .collect();
        Self {
            transport,
            feeds: synchronizers,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Human-readable session title.
    pub fn title(&self) -> String {
        self.transport.title()
    }

    /// The account handle this session is authenticated as.
    pub fn username(&self) -> String {
        self.transport.username()
    }

    /// Register an observer. Notifications are delivered in registration
    /// order.
    pub fn add_observer(&self, observer: Arc<dyn SessionDisplay>) {
        self.observers.lock().unwrap().push(observer);
    }

    /// Unregister the observer with the given id. No-op when absent.
    pub fn remove_observer(&self, id: &str) {
        let mut observers = self.observers.lock().unwrap();
        if let Some(index) = observers.iter().position(|o| o.id() == id) {
            observers.remove(index);
        }
    }

    /// Fetch every owned feed concurrently.
    ///
    /// Each feed's completion independently triggers its own observer
    /// fan-out; there is no cross-feed barrier and no "all feeds loaded"
    /// signal. A failed feed is logged and produces no notification.
    pub async fn fetch(&self) {
        join_all(self.feeds.iter().map(|feed| self.fetch_feed(feed))).await;
    }

    async fn fetch_feed(&self, synchronizer: &FeedSynchronizer) {
        match synchronizer.fetch().await {
            Ok(delta) => self.notify(&delta, synchronizer.feed()),
            Err(error) => warn!(
                feed = %synchronizer.feed(),
                %error,
                "feed fetch failed; observers not notified"
            ),
        }
    }

    /// Post a message and append it optimistically.
    ///
    /// The optimistic item is appended and fanned out before the remote
    /// post is awaited, so a slow transport never delays local state. The
    /// remote failure is logged, not surfaced. The item's sender is
    /// resolved by scanning the target feed for an item authored by the
    /// session's own user; when none exists the post cannot be attributed
    /// and fails with [`SessionError::NoLocalIdentity`] without touching
    /// the transport.
    pub async fn post(
        &self,
        feed: FeedType,
        message: &str,
        to: &Person,
    ) -> Result<(), SessionError> {
        let synchronizer = self.synchronizer(feed)?;
        let username = self.transport.username();
        let sender = synchronizer
            .sender_by_username(&username)
            .await
            .ok_or(SessionError::NoLocalIdentity { feed, username })?;

        let item = Item::local(message, to.clone(), sender);
        synchronizer.add_local(item.clone()).await;
        self.notify(std::slice::from_ref(&item), feed);

        if let Err(error) = self.transport.post(feed, message, to).await {
            warn!(%feed, %error, "remote post failed; keeping optimistic state");
        }
        Ok(())
    }

    /// Delete an item on the server.
    ///
    /// No local removal happens here: the next fetch (or an external
    /// confirmation) reconciles the collection. Failures are logged.
    pub async fn remove(&self, item: &Item, feed: FeedType) {
        if let Err(error) = self.transport.remove(item, feed).await {
            warn!(%feed, item = %item.id(), %error, "remote removal failed");
        }
    }

    /// Block a person and purge their items from every feed.
    ///
    /// The local purge runs (and its empty-list notifications fire)
    /// before the transport call is awaited, so a slow transport never
    /// delays it; a transport failure is logged, not surfaced.
    pub async fn block(&self, person: &Person) {
        self.purge_everywhere(person).await;
        if let Err(error) = self.transport.block(person).await {
            warn!(person = %person.id(), %error, "remote block failed");
        }
    }

    /// Report a person as spam and purge their items from every feed.
    pub async fn report_spam(&self, person: &Person) {
        self.purge_everywhere(person).await;
        if let Err(error) = self.transport.report_spam(person).await {
            warn!(person = %person.id(), %error, "remote spam report failed");
        }
    }

    /// The merged items of a feed, newest first by id.
    pub async fn items_for_feed(&self, feed: FeedType) -> Result<Vec<Item>, SessionError> {
        Ok(self.synchronizer(feed)?.items().await)
    }

    fn synchronizer(&self, feed: FeedType) -> Result<&FeedSynchronizer, SessionError> {
        self.feeds
            .iter()
            .find(|s| s.feed() == feed)
            .ok_or(SessionError::UnknownFeed(feed))
    }

    async fn purge_everywhere(&self, person: &Person) {
        for synchronizer in &self.feeds {
            synchronizer.purge_sender(person.id()).await;
            // Empty delta: "feed mutated, re-read full state".
            self.notify(&[], synchronizer.feed());
        }
    }

    fn notify(&self, items: &[Item], feed: FeedType) {
        let observers: Vec<_> = self.observers.lock().unwrap().clone();
        for observer in observers {
            observer.items_loaded(self, items, feed);
        }
    }
}
