use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StatsError {
    /// A contribution was routed to another day's aggregate.
    #[error("Contribution for {contribution} applied to {aggregate}")]
    DayMismatch {
        aggregate: chrono::NaiveDate,
        contribution: chrono::NaiveDate,
    },

    #[error("Order write failed: {0}")]
    Order(#[from] crate::order_feed::OrderError),

    #[error("Feed communication error: {0}")]
    FeedCommunication(String),
}

impl From<String> for StatsError {
    fn from(msg: String) -> Self {
        StatsError::FeedCommunication(msg)
    }
}
