//! Mock transport for testing.
//!
//! Allows queueing fetch pages per feed and capturing write operations
//! for verification.

use super::{Transport, TransportError};
use async_trait::async_trait;
use feed_types::{Cursor, FeedType, Item, ItemId, Person, PersonId};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Mock transport for testing.
///
/// Allows queueing fetch pages per feed and capturing write operations
/// for verification. Clones share state, so a test can hold one handle
/// while the coordinator owns another.
#[derive(Debug)]
pub struct MockTransport {
    username: String,
    title: String,
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    pages: HashMap<FeedType, VecDeque<Vec<Item>>>,
    fetch_calls: Vec<(FeedType, Option<Cursor>)>,
    posts: Vec<(FeedType, String, PersonId)>,
    removals: Vec<(ItemId, FeedType)>,
    blocks: Vec<PersonId>,
    spam_reports: Vec<PersonId>,
    fail_next_fetch: Option<String>,
    fail_next_post: Option<String>,
    fail_next_remove: Option<String>,
    fail_next_block: Option<String>,
    fail_next_report: Option<String>,
}

impl MockTransport {
    /// Create a new mock transport authenticated as "mock-user".
    pub fn new() -> Self {
        Self::with_username("mock-user")
    }

    /// Create a new mock transport authenticated as the given account.
    pub fn with_username(username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            title: format!("@{}", username),
            username,
            inner: Arc::new(Mutex::new(MockTransportInner::default())),
        }
    }

    /// Queue a page to be returned by the next `fetch()` of the feed.
    pub fn queue_page(&self, feed: FeedType, items: Vec<Item>) {
        let mut inner = self.inner.lock().unwrap();
        inner.pages.entry(feed).or_default().push_back(items);
    }

    /// Every `(feed, since)` pair that `fetch()` was called with.
    pub fn fetch_calls(&self) -> Vec<(FeedType, Option<Cursor>)> {
        self.inner.lock().unwrap().fetch_calls.clone()
    }

    /// Every `(feed, message, recipient)` triple passed to `post()`.
    pub fn posts(&self) -> Vec<(FeedType, String, PersonId)> {
        self.inner.lock().unwrap().posts.clone()
    }

    /// Every `(item, feed)` pair passed to `remove()`.
    pub fn removals(&self) -> Vec<(ItemId, FeedType)> {
        self.inner.lock().unwrap().removals.clone()
    }

    /// Every person id passed to `block()`.
    pub fn blocks(&self) -> Vec<PersonId> {
        self.inner.lock().unwrap().blocks.clone()
    }

    /// Every person id passed to `report_spam()`.
    pub fn spam_reports(&self) -> Vec<PersonId> {
        self.inner.lock().unwrap().spam_reports.clone()
    }

    /// Cause the next `fetch()` (any feed) to fail with the given error.
    pub fn fail_next_fetch(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_fetch = Some(error.to_string());
    }

    /// Cause the next `post()` to fail with the given error.
    pub fn fail_next_post(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_post = Some(error.to_string());
    }

    /// Cause the next `remove()` to fail with the given error.
    pub fn fail_next_remove(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_remove = Some(error.to_string());
    }

    /// Cause the next `block()` to fail with the given error.
    pub fn fail_next_block(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_block = Some(error.to_string());
    }

    /// Cause the next `report_spam()` to fail with the given error.
    pub fn fail_next_report(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_report = Some(error.to_string());
    }

    /// Clear all queued pages and captured calls.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            username: self.username.clone(),
            title: self.title.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(
        &self,
        feed: FeedType,
        since: Option<&Cursor>,
    ) -> Result<Vec<Item>, TransportError> {
        let mut inner = self.inner.lock().unwrap();
        inner.fetch_calls.push((feed, since.cloned()));

        // Check for forced failure
        if let Some(error) = inner.fail_next_fetch.take() {
            return Err(TransportError::Network(error));
        }

        // An exhausted queue behaves like a server with nothing new.
        Ok(inner
            .pages
            .get_mut(&feed)
            .and_then(VecDeque::pop_front)
            .unwrap_or_default())
    }

    async fn post(
        &self,
        feed: FeedType,
        message: &str,
        to: &Person,
    ) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_post.take() {
            return Err(TransportError::Api(error));
        }

        inner
            .posts
            .push((feed, message.to_string(), to.id().clone()));
        Ok(())
    }

    async fn remove(&self, item: &Item, feed: FeedType) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_remove.take() {
            return Err(TransportError::Api(error));
        }

        inner.removals.push((item.id().clone(), feed));
        Ok(())
    }

    async fn block(&self, person: &Person) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_block.take() {
            return Err(TransportError::Api(error));
        }

        inner.blocks.push(person.id().clone());
        Ok(())
    }

    async fn report_spam(&self, person: &Person) -> Result<(), TransportError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(error) = inner.fail_next_report.take() {
            return Err(TransportError::Api(error));
        }

        inner.spam_reports.push(person.id().clone());
        Ok(())
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn username(&self) -> String {
        self.username.clone()
    }
}
