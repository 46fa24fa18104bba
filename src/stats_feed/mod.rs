//! # Stats Feed
//!
//! One [`DailyStats`] aggregate per UTC calendar day, keyed by date.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::DailyStats;
use live_feed::{FeedActor, FeedClient};

pub fn new(buffer_size: usize) -> (FeedActor<DailyStats>, FeedClient<DailyStats>) {
    FeedActor::keyed(buffer_size)
}
