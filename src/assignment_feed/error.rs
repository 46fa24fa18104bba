use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssignmentError {
    #[error("Waiter name is empty")]
    MissingWaiter,

    #[error("Zone name is empty")]
    EmptyZone,

    #[error("Feed communication error: {0}")]
    FeedCommunication(String),
}

impl From<String> for AssignmentError {
    fn from(msg: String) -> Self {
        AssignmentError::FeedCommunication(msg)
    }
}
