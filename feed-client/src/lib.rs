//! # feed-client
//!
//! Session coordination client for the Communiqué messaging core.
//!
//! This is the library a host UI embeds to own its remote messaging
//! sessions: paginated incremental fetches across independent feeds,
//! dedup/merge into ordered collections, synchronous observer fan-out,
//! optimistic local posting, and local block/purge consistency.
//!
//! ## Features
//!
//! - **Transport Abstraction**: Pluggable remote API layer (mock for tests)
//! - **Pure Merge Core**: Uses feed-core for side-effect-free state
//! - **Observer Fan-out**: Explicit registration keyed by observer id
//! - **Multi-Account**: One coordinator per authenticated account
//!
//! ## Example
//!
//! ```ignore
//! use feed_client::{MockTransport, SessionCoordinator};
//! use feed_types::FeedType;
//!
//! let transport = Arc::new(MockTransport::new());
//! let coordinator = SessionCoordinator::new(transport, &[FeedType::Home]);
//! coordinator.add_observer(display);
//! coordinator.fetch().await;
//! let items = coordinator.items_for_feed(FeedType::Home).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accounts;
pub mod registry;
pub mod session;
pub mod synchronizer;
pub mod transport;

pub use accounts::{AccountStore, Credentials, MemorySecretStore, SecretStore};
pub use registry::SessionRegistry;
pub use session::{SessionCoordinator, SessionDisplay, SessionError};
pub use synchronizer::FeedSynchronizer;
pub use transport::{MockTransport, Transport, TransportError};
