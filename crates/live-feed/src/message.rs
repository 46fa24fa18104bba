//! # Feed Messages
//!
//! Requests sent from a [`FeedClient`](crate::FeedClient) to its [`FeedActor`](crate::FeedActor).

use crate::entity::FeedEntity;
use crate::error::FeedError;
use crate::snapshot::Snapshot;
use tokio::sync::{oneshot, watch};

/// Type alias for the one-shot response channel used by the feed.
pub type Response<T> = oneshot::Sender<Result<T, FeedError>>;

/// Request to a feed collection.
///
/// The variants mirror the primitives of a realtime key-value store:
///
/// - **Push**: create under a freshly generated key.
/// - **Set**: create or wholesale-replace under an explicit key.
/// - **Ensure**: create under an explicit key only if nothing is there yet.
/// - **Get**: read one record.
/// - **Update**: field-level patch of an existing record.
/// - **Remove**: explicit deletion.
/// - **Action**: record-specific operation.
/// - **Subscribe**: receive the current snapshot and every later one.
#[derive(Debug)]
pub enum FeedRequest<T: FeedEntity> {
    Push {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Set {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T>,
    },
    Ensure {
        id: T::Id,
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Remove {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Subscribe {
        respond_to: Response<watch::Receiver<Snapshot<T>>>,
    },
}
