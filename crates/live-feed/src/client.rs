//! # Feed Client
//!
//! The cloneable handle every task uses to read and write a collection.

use crate::entity::FeedEntity;
use crate::error::FeedError;
use crate::message::FeedRequest;
use crate::snapshot::Snapshot;
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe handle to a [`FeedActor`](crate::FeedActor).
///
/// Holds only a sender, so cloning is cheap. Every method waits for the actor to
/// acknowledge the request; the returned value is the state the actor applied at
/// that moment, which a later write from another client may supersede.
pub struct FeedClient<T: FeedEntity> {
    sender: mpsc::Sender<FeedRequest<T>>,
}

impl<T: FeedEntity> Clone for FeedClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: FeedEntity> FeedClient<T> {
    pub fn new(sender: mpsc::Sender<FeedRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn push(&self, params: T::Create) -> Result<T::Id, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Push { params, respond_to })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn set(&self, id: T::Id, params: T::Create) -> Result<T, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Set {
                id,
                params,
                respond_to,
            })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn ensure(&self, id: T::Id, params: T::Create) -> Result<T, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Ensure {
                id,
                params,
                respond_to,
            })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Get { id, respond_to })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Update {
                id,
                patch,
                respond_to,
            })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn remove(&self, id: T::Id) -> Result<(), FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Remove { id, respond_to })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }

    /// Subscribe to the collection. The receiver already holds the current snapshot.
    pub async fn subscribe(&self) -> Result<watch::Receiver<Snapshot<T>>, FeedError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FeedRequest::Subscribe { respond_to })
            .await
            .map_err(|_| FeedError::FeedClosed)?;
        response.await.map_err(|_| FeedError::FeedDropped)?
    }
}
