//! Collection clients: typed wrappers around [`FeedClient`](live_feed::FeedClient)
//! carrying the coordination rules of each collection.

pub mod assignment_registry;
pub mod broadcast_channel;
pub mod order_client;
pub mod stats_recorder;

pub use assignment_registry::*;
pub use broadcast_channel::*;
pub use order_client::*;
pub use stats_recorder::*;
