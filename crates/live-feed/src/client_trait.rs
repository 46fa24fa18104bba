//! # CollectionClient Trait
//!
//! Gives collection-specific clients default `get`, `remove` and `subscribe`
//! methods on top of a generic [`FeedClient`].
use crate::{FeedClient, FeedEntity, FeedError, Snapshot};
use async_trait::async_trait;
use tokio::sync::watch;

/// Trait for collection-specific clients to inherit the standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use live_feed::{CollectionClient, FeedClient, FeedEntity, FeedError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32 }
/// #[derive(Debug)] struct NoteCreate;
/// #[derive(Debug)] struct NotePatch;
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct NoteError(String);
/// impl From<String> for NoteError { fn from(s: String) -> Self { NoteError(s) } }
///
/// #[async_trait]
/// impl FeedEntity for Note {
///     type Id = u32; type Create = NoteCreate; type Patch = NotePatch;
///     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
///     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { id }) }
///     async fn on_patch(&mut self, _: NotePatch, _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// struct NoteClient { inner: FeedClient<Note> }
///
/// #[async_trait]
/// impl CollectionClient<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &FeedClient<Note> { &self.inner }
///     fn map_error(e: FeedError) -> NoteError { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // get(), remove() and subscribe() come for free.
///     let _ = client.get(1).await;
///     let _ = client.remove(1).await;
/// }
/// ```
#[async_trait]
pub trait CollectionClient<T: FeedEntity>: Send + Sync {
    /// The collection-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic FeedClient.
    fn inner(&self) -> &FeedClient<T>;

    /// Map feed errors to the collection error type.
    fn map_error(e: FeedError) -> Self::Error;

    /// Fetch a record by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a record by key.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(id).await.map_err(Self::map_error)
    }

    /// Subscribe to every snapshot of the collection.
    async fn subscribe(&self) -> Result<watch::Receiver<Snapshot<T>>, Self::Error> {
        self.inner().subscribe().await.map_err(Self::map_error)
    }
}
