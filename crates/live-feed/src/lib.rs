//! # Live Feed
//!
//! An in-process realtime key-value feed: the shared store every waiter and bar
//! station reads from and writes to. Each collection (orders, broadcast messages,
//! waiter assignments, daily stats) is one [`FeedActor`] task that owns its
//! records, and any number of cloneable [`FeedClient`] handles talk to it.
//!
//! ## What the feed guarantees
//!
//! - **One order of writes.** The actor applies requests one at a time, so every
//!   collection has a single history and every subscriber sees it in the same order.
//! - **Field-level writes.** `update` sends a patch, never a whole record, so
//!   writers that own different fields cannot clobber each other.
//! - **Redistribution.** After every applied mutation the actor publishes a new
//!   [`Snapshot`] with a higher revision on a `tokio::sync::watch` channel.
//!
//! ## What it does not guarantee
//!
//! There is no compare-and-swap. Two clients that read the same record and then
//! both write the same field resolve last-writer-wins; each of them gets an
//! acknowledgement, and only the next snapshot tells them who won.
//!
//! ## Architecture
//!
//! 1. **Entity layer** ([`FeedEntity`]) - record kind, payloads, patch semantics.
//! 2. **Runtime layer** ([`FeedActor`]) - sequential application and publishing.
//! 3. **Interface layer** ([`FeedClient`], [`CollectionClient`]) - typed requests.
//!
//! ## Testing
//!
//! The [`mock`] module answers requests from scripted expectations so client
//! wrappers can be tested without a running collection.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;

pub use actor::FeedActor;
pub use client::FeedClient;
pub use client_trait::CollectionClient;
pub use entity::FeedEntity;
pub use error::FeedError;
pub use message::{FeedRequest, Response};
pub use snapshot::Snapshot;
