//! # Broadcast Feed
//!
//! One-to-many messages with a read flag per recipient.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{BroadcastMessage, MessageId};
use live_feed::{FeedActor, FeedClient};
use std::sync::atomic::{AtomicU64, Ordering};

pub fn new(buffer_size: usize) -> (FeedActor<BroadcastMessage>, FeedClient<BroadcastMessage>) {
    let counter = AtomicU64::new(1);
    FeedActor::new(buffer_size, move || {
        MessageId(counter.fetch_add(1, Ordering::SeqCst))
    })
}
