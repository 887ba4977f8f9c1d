//! # feed-core
//!
//! Pure logic for the Communiqué feed synchronization core (no I/O,
//! instant tests).
//!
//! This crate implements the merge, pagination and projection algorithms
//! without any network access, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce
//! output without side effects. The actual I/O (fetching pages, posting,
//! blocking) is performed by `feed-client`, which applies the returned
//! values to its transports and observers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod feed;
pub mod roster;

pub use feed::{dedup_by_id, FeedState};
pub use roster::{conversation_previews, conversation_with, unique_senders, ConversationPreview};
