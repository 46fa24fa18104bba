use crate::assignment_feed::AssignmentError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BroadcastError {
    #[error("Broadcast payload is empty")]
    EmptyPayload,

    #[error("Broadcast has no recipients")]
    NoRecipients,

    #[error("Could not resolve recipients: {0}")]
    Recipients(#[from] AssignmentError),

    #[error("Feed communication error: {0}")]
    FeedCommunication(String),
}

impl From<String> for BroadcastError {
    fn from(msg: String) -> Self {
        BroadcastError::FeedCommunication(msg)
    }
}
