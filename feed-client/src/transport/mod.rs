//! Transport abstraction for one authenticated messaging session.
//!
//! This module provides a pluggable remote API layer that abstracts the
//! service behind a session (a real HTTP/OAuth client in production, a
//! mock for testing).
//!
//! # Design
//!
//! The transport trait is async and per-account:
//! - `fetch()` returns one parsed page of a feed since a cursor
//! - `post()`, `remove()`, `block()`, `report_spam()` are write operations
//! - `title()` and `username()` identify the session synchronously
//!
//! Parsing remote payloads into [`Item`]s is the transport's job; the
//! synchronization core only ever sees typed values.

mod mock;

pub use mock::MockTransport;

use async_trait::async_trait;
use feed_types::{Cursor, FeedType, Item, Person};
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The network request could not be completed.
    #[error("network error: {0}")]
    Network(String),

    /// The remote API rejected the request.
    #[error("api error: {0}")]
    Api(String),

    /// The session's credentials were not accepted.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The request timed out.
    #[error("request timed out")]
    Timeout,
}

/// Remote operations of one authenticated messaging session.
///
/// Exactly one transport exists per account; every feed of that account
/// shares it. All write operations are acknowledged with `Ok(())` or an
/// error; the caller decides whether to wait on that acknowledgement.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch one page of a feed, newest window first.
    ///
    /// `since` is the opaque watermark of the previous page's last item,
    /// or `None` for the initial fetch. Returns the parsed items of the
    /// page; an empty vec means nothing new.
    async fn fetch(
        &self,
        feed: FeedType,
        since: Option<&Cursor>,
    ) -> Result<Vec<Item>, TransportError>;

    /// Post a message to a person on the given feed.
    async fn post(
        &self,
        feed: FeedType,
        message: &str,
        to: &Person,
    ) -> Result<(), TransportError>;

    /// Delete an item from the given feed on the server.
    async fn remove(&self, item: &Item, feed: FeedType) -> Result<(), TransportError>;

    /// Block a person for this account.
    async fn block(&self, person: &Person) -> Result<(), TransportError>;

    /// Report a person as spam for this account.
    async fn report_spam(&self, person: &Person) -> Result<(), TransportError>;

    /// Human-readable session title for display.
    fn title(&self) -> String;

    /// The account handle this session is authenticated as.
    fn username(&self) -> String;
}
