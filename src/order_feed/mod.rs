//! # Order Feed
//!
//! The collection every station watches: placed orders and waiter calls.
//!
//! ## Structure
//!
//! - [`entity`] - [`FeedEntity`](live_feed::FeedEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - factory returning the feed actor and its client

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::{Order, OrderId};
use live_feed::{FeedActor, FeedClient};
use std::sync::atomic::{AtomicU64, Ordering};

/// Creates the order feed. Keys are `order_1`, `order_2`, ... in push order.
pub fn new(buffer_size: usize) -> (FeedActor<Order>, FeedClient<Order>) {
    let counter = AtomicU64::new(1);
    FeedActor::new(buffer_size, move || {
        OrderId(counter.fetch_add(1, Ordering::SeqCst))
    })
}
