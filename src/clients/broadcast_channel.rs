use crate::broadcast_feed::BroadcastError;
use crate::clients::AssignmentRegistry;
use crate::clock::Clock;
use crate::model::{unread_for, BroadcastCreate, BroadcastMessage, BroadcastPatch, MessageId};
use async_trait::async_trait;
use live_feed::{CollectionClient, FeedClient, FeedError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One-to-many announcements with per-recipient read state.
#[derive(Clone)]
pub struct BroadcastChannel {
    inner: FeedClient<BroadcastMessage>,
    assignments: AssignmentRegistry,
    clock: Arc<dyn Clock>,
}

impl BroadcastChannel {
    pub fn new(
        inner: FeedClient<BroadcastMessage>,
        assignments: AssignmentRegistry,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner,
            assignments,
            clock,
        }
    }

    /// Sends `payload` to `recipients`, all starting unread.
    #[instrument(skip(self, payload))]
    pub async fn send(&self, payload: &str, recipients: &[String]) -> Result<MessageId, BroadcastError> {
        let create = BroadcastCreate {
            payload: payload.to_string(),
            recipients: recipients.to_vec(),
            created_at: self.clock.now(),
        };
        let id = self.inner.push(create).await.map_err(Self::map_error)?;
        info!(%id, recipients = recipients.len(), "Broadcast sent");
        Ok(id)
    }

    /// Sends `payload` to every waiter that currently has an assignment.
    pub async fn send_to_assigned(&self, payload: &str) -> Result<MessageId, BroadcastError> {
        let waiters = self.assignments.waiters().await?;
        self.send(payload, &waiters).await
    }

    /// Flips `recipient`'s flag only. Returns `None` if the message is gone.
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        id: MessageId,
        recipient: &str,
    ) -> Result<Option<BroadcastMessage>, BroadcastError> {
        let patch = BroadcastPatch::MarkRead {
            recipient: recipient.to_string(),
        };
        match self.inner.update(id, patch).await {
            Ok(message) => Ok(Some(message)),
            Err(e) if e.is_not_found() => {
                debug!(%id, "Stale write ignored");
                Ok(None)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Messages `recipient` has not read, counted over the current full list.
    pub async fn unread_count(&self, recipient: &str) -> Result<usize, BroadcastError> {
        let feed = self.inner.subscribe().await.map_err(Self::map_error)?;
        let count = unread_for(feed.borrow().values(), recipient);
        Ok(count)
    }
}

#[async_trait]
impl CollectionClient<BroadcastMessage> for BroadcastChannel {
    type Error = BroadcastError;

    fn inner(&self) -> &FeedClient<BroadcastMessage> {
        &self.inner
    }

    fn map_error(e: FeedError) -> BroadcastError {
        e.into_entity::<BroadcastError>()
            .unwrap_or_else(|e| BroadcastError::FeedCommunication(e.to_string()))
    }
}
