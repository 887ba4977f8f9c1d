//! # feed-types
//!
//! Value types for the Communiqué session/feed synchronization core.
//!
//! This crate provides the foundational types used across all feed crates:
//! - [`PersonId`], [`ItemId`], [`Cursor`] - Identity and ordering types
//! - [`Person`], [`Item`] - Immutable value entities with identity-based equality
//! - [`FeedType`] - The independently-paginated remote resource streams

#![warn(missing_docs)]
#![warn(clippy::all)]

mod feed;
mod ids;
mod item;
mod person;

pub use feed::FeedType;
pub use ids::{Cursor, ItemId, PersonId};
pub use item::Item;
pub use person::Person;
