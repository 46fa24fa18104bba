use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Type-safe identifier for broadcast messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub u64);

impl From<u64> for MessageId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "message_{}", self.0)
    }
}

/// A one-to-many announcement with independent read state per recipient.
///
/// The only mutation after creation is flipping one recipient's flag
/// ([`BroadcastPatch::MarkRead`]); readers never delete messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastMessage {
    pub id: MessageId,
    pub payload: String,
    pub created_at: DateTime<Utc>,
    /// recipient -> has read
    pub read_by: BTreeMap<String, bool>,
}

impl BroadcastMessage {
    pub fn is_addressed_to(&self, recipient: &str) -> bool {
        self.read_by.contains_key(recipient)
    }

    pub fn is_unread_by(&self, recipient: &str) -> bool {
        self.read_by.get(recipient) == Some(&false)
    }

    /// How many recipients have not read this message yet.
    pub fn unread_count(&self) -> usize {
        self.read_by.values().filter(|read| !**read).count()
    }
}

/// Number of messages `recipient` has not read, counted over the full list.
///
/// Never cache this: a new message changes it without touching any existing one.
pub fn unread_for<'a>(
    messages: impl IntoIterator<Item = &'a BroadcastMessage>,
    recipient: &str,
) -> usize {
    messages
        .into_iter()
        .filter(|m| m.is_unread_by(recipient))
        .count()
}

/// Payload for sending a broadcast.
#[derive(Debug, Clone)]
pub struct BroadcastCreate {
    pub payload: String,
    pub recipients: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastPatch {
    MarkRead { recipient: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, flags: &[(&str, bool)]) -> BroadcastMessage {
        BroadcastMessage {
            id: MessageId(id),
            payload: format!("note {id}"),
            created_at: Utc::now(),
            read_by: flags
                .iter()
                .map(|(who, read)| (who.to_string(), *read))
                .collect(),
        }
    }

    #[test]
    fn unread_count_counts_only_recipients_still_unread() {
        let msg = message(1, &[("anna", true), ("ben", false)]);
        assert_eq!(msg.unread_count(), 1);
        assert!(msg.is_unread_by("ben"));
        assert!(!msg.is_unread_by("anna"));
    }

    #[test]
    fn recipient_unread_count_spans_all_messages() {
        let messages = [
            message(1, &[("anna", false), ("ben", false)]),
            message(2, &[("anna", true), ("ben", false)]),
            message(3, &[("ben", false)]),
        ];
        assert_eq!(unread_for(&messages, "anna"), 1);
        assert_eq!(unread_for(&messages, "ben"), 3);
        // Not a recipient at all is not the same as unread.
        assert_eq!(unread_for(&messages, "carla"), 0);
    }
}
