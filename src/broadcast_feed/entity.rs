use super::BroadcastError;
use crate::model::{BroadcastCreate, BroadcastMessage, BroadcastPatch, MessageId};
use async_trait::async_trait;
use live_feed::FeedEntity;
use tracing::debug;

#[async_trait]
impl FeedEntity for BroadcastMessage {
    type Id = MessageId;
    type Create = BroadcastCreate;
    type Patch = BroadcastPatch;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = BroadcastError;

    fn from_create_params(id: MessageId, params: BroadcastCreate) -> Result<Self, BroadcastError> {
        if params.payload.trim().is_empty() {
            return Err(BroadcastError::EmptyPayload);
        }
        // Duplicate names collapse into one entry.
        let read_by: std::collections::BTreeMap<String, bool> = params
            .recipients
            .into_iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| (name, false))
            .collect();
        if read_by.is_empty() {
            return Err(BroadcastError::NoRecipients);
        }
        Ok(Self {
            id,
            payload: params.payload,
            created_at: params.created_at,
            read_by,
        })
    }

    async fn on_patch(&mut self, patch: BroadcastPatch, _ctx: &()) -> Result<(), BroadcastError> {
        match patch {
            BroadcastPatch::MarkRead { recipient } => match self.read_by.get_mut(&recipient) {
                Some(flag) => *flag = true,
                None => debug!(message = %self.id, %recipient, "Mark read by non-recipient ignored"),
            },
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), BroadcastError> {
        Ok(())
    }
}
