//! # Assignment Feed
//!
//! Waiter name -> current table or zone. Keyed by the caller, so there is no `push`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::WaiterAssignment;
use live_feed::{FeedActor, FeedClient};

pub fn new(buffer_size: usize) -> (FeedActor<WaiterAssignment>, FeedClient<WaiterAssignment>) {
    FeedActor::keyed(buffer_size)
}
