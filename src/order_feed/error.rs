//! Error types for the order feed.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// A placed order needs at least one line item.
    #[error("Order has no items")]
    NoItems,

    /// Line items must have a positive quantity.
    #[error("Invalid quantity {quantity} for {item}")]
    InvalidQuantity { item: String, quantity: u32 },

    /// A claim needs a non-empty actor name.
    #[error("Claim needs an actor name")]
    MissingActor,

    /// An error occurred while communicating with the feed.
    #[error("Feed communication error: {0}")]
    FeedCommunication(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::FeedCommunication(msg)
    }
}
