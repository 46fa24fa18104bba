//! Pure data carried on the feed: tickets, broadcasts, assignments, daily stats.

pub mod assignment;
pub mod broadcast;
pub mod order;
pub mod stats;

pub use assignment::*;
pub use broadcast::*;
pub use order::*;
pub use stats::*;
