//! # Feed Errors
//!
//! Errors raised by the feed itself, independent of any record kind.

/// Errors that can occur within the feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Feed closed")]
    FeedClosed,
    #[error("Feed dropped response channel")]
    FeedDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Collection is keyed; use set or ensure instead of push")]
    KeyRequired,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FeedError {
    /// True when the write targeted a record that no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NotFound(_))
    }

    /// Recovers the collection's own error from an `EntityError`.
    ///
    /// Anything else, or an entity error of another type, is handed back unchanged.
    pub fn into_entity<E: std::error::Error + 'static>(self) -> Result<E, FeedError> {
        match self {
            FeedError::EntityError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FeedError::EntityError),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("bad label")]
    struct BadLabel;

    #[test]
    fn entity_errors_downcast_to_their_type() {
        let err = FeedError::EntityError(Box::new(BadLabel));
        assert_eq!(err.into_entity::<BadLabel>().unwrap(), BadLabel);
    }

    #[test]
    fn other_errors_pass_through() {
        let err = FeedError::NotFound("7".into());
        assert!(err.into_entity::<BadLabel>().unwrap_err().is_not_found());
    }
}
