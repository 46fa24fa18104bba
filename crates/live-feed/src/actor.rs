//! # Feed Actor
//!
//! The `FeedActor` owns one collection of records and applies every write to it
//! sequentially. After each applied mutation it publishes a fresh [`Snapshot`] on
//! a `watch` channel, which is how changes are redistributed to every subscriber.

use crate::client::FeedClient;
use crate::entity::FeedEntity;
use crate::error::FeedError;
use crate::message::FeedRequest;
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

type IdGenerator<Id> = Box<dyn Fn() -> Id + Send + Sync>;

/// The actor that holds a collection and serializes all writes to it.
///
/// **Concurrency Model**:
/// Any number of clients may send requests at once; the actor takes them off its
/// channel one at a time. That gives every collection a single total order of
/// applied writes, and every subscriber sees snapshots in that order. It does
/// *not* give callers any read-modify-write atomicity: a client that reads a
/// record, decides, and then writes can be overtaken by another client in between.
/// Field writes are last-writer-wins in application order.
///
/// # Usage Pattern
///
/// 1. **Create**: `FeedActor::new()` (generated keys) or `FeedActor::keyed()`
///    (caller-chosen keys) returns the actor and its client.
/// 2. **Wire & Run**: spawn `actor.run(context)`.
/// 3. **Use**: clone the client into every task that reads or writes the collection.
///
/// ```rust
/// use live_feed::{FeedActor, FeedEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NotePatch(String);
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl FeedEntity for Note {
///     type Id = u32; type Create = NoteCreate; type Patch = NotePatch;
///     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_patch(&mut self, p: NotePatch, _: &()) -> Result<(), NoteError> {
///         self.text = p.0;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = std::sync::atomic::AtomicU32::new(1);
///     let (actor, client) = FeedActor::<Note>::new(10, move || {
///         counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
///     });
///     tokio::spawn(actor.run(()));
///
///     let id = client.push(NoteCreate("hello".into())).await.unwrap();
///     let feed = client.subscribe().await.unwrap();
///     assert_eq!(feed.borrow().get(&id).unwrap().text, "hello");
/// }
/// ```
pub struct FeedActor<T: FeedEntity> {
    receiver: mpsc::Receiver<FeedRequest<T>>,
    records: Arc<BTreeMap<T::Id, T>>,
    next_id: Option<IdGenerator<T::Id>>,
    revision: u64,
    publisher: watch::Sender<Snapshot<T>>,
}

impl<T: FeedEntity> FeedActor<T> {
    /// Creates a collection whose `push` keys come from `next_id_fn`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, FeedClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id_fn)))
    }

    /// Creates a collection keyed by the caller (`set` / `ensure` only).
    pub fn keyed(buffer_size: usize) -> (Self, FeedClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(buffer_size: usize, next_id: Option<IdGenerator<T::Id>>) -> (Self, FeedClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (publisher, _) = watch::channel(Snapshot::empty());
        let actor = Self {
            receiver,
            records: Arc::new(BTreeMap::new()),
            next_id,
            revision: 0,
            publisher,
        };
        (actor, FeedClient::new(sender))
    }

    fn publish(&mut self) {
        self.revision += 1;
        self.publisher
            .send_replace(Snapshot::new(self.revision, Arc::clone(&self.records)));
    }

    fn insert(&mut self, id: T::Id, item: T) {
        Arc::make_mut(&mut self.records).insert(id, item);
        self.publish();
    }

    async fn build_record(
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FeedError> {
        let mut item = T::from_create_params(id, params)
            .map_err(|e| FeedError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FeedError::EntityError(Box::new(e)))?;
        Ok(item)
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, so dependencies created after the
    /// actor (other clients, sinks) can still be wired in before the loop starts.
    pub async fn run(mut self, context: T::Context) {
        let collection = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(collection, "Feed started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                FeedRequest::Push { params, respond_to } => {
                    debug!(collection, ?params, "Push");
                    let Some(next_id) = self.next_id.as_ref() else {
                        warn!(collection, "Push on keyed collection");
                        let _ = respond_to.send(Err(FeedError::KeyRequired));
                        continue;
                    };
                    let id = next_id();
                    match Self::build_record(id.clone(), params, &context).await {
                        Ok(item) => {
                            self.insert(id.clone(), item);
                            info!(collection, %id, size = self.records.len(), revision = self.revision, "Pushed");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(collection, error = %e, "Push failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                FeedRequest::Set { id, params, respond_to } => {
                    debug!(collection, %id, ?params, "Set");
                    match Self::build_record(id.clone(), params, &context).await {
                        Ok(item) => {
                            self.insert(id.clone(), item.clone());
                            info!(collection, %id, size = self.records.len(), revision = self.revision, "Set");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(collection, %id, error = %e, "Set failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                FeedRequest::Ensure { id, params, respond_to } => {
                    if let Some(existing) = self.records.get(&id) {
                        debug!(collection, %id, "Ensure: already present");
                        let _ = respond_to.send(Ok(existing.clone()));
                        continue;
                    }
                    debug!(collection, %id, ?params, "Ensure: inserting");
                    match Self::build_record(id.clone(), params, &context).await {
                        Ok(item) => {
                            self.insert(id.clone(), item.clone());
                            info!(collection, %id, size = self.records.len(), revision = self.revision, "Ensured");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(collection, %id, error = %e, "Ensure failed");
                            let _ = respond_to.send(Err(e));
                        }
                    }
                }
                FeedRequest::Get { id, respond_to } => {
                    let item = self.records.get(&id).cloned();
                    debug!(collection, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                FeedRequest::Update { id, patch, respond_to } => {
                    debug!(collection, %id, ?patch, "Update");
                    let Some(current) = self.records.get(&id) else {
                        debug!(collection, %id, "Update on missing record");
                        let _ = respond_to.send(Err(FeedError::NotFound(id.to_string())));
                        continue;
                    };
                    // Patch a copy so a failing hook leaves the stored record untouched.
                    let mut item = current.clone();
                    if let Err(e) = item.on_patch(patch, &context).await {
                        warn!(collection, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FeedError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.insert(id.clone(), item.clone());
                    info!(collection, %id, revision = self.revision, "Updated");
                    let _ = respond_to.send(Ok(item));
                }
                FeedRequest::Remove { id, respond_to } => {
                    debug!(collection, %id, "Remove");
                    let Some(item) = self.records.get(&id) else {
                        debug!(collection, %id, "Remove on missing record");
                        let _ = respond_to.send(Err(FeedError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(collection, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FeedError::EntityError(Box::new(e))));
                        continue;
                    }
                    Arc::make_mut(&mut self.records).remove(&id);
                    self.publish();
                    info!(collection, %id, size = self.records.len(), revision = self.revision, "Removed");
                    let _ = respond_to.send(Ok(()));
                }
                FeedRequest::Action { id, action, respond_to } => {
                    debug!(collection, %id, ?action, "Action");
                    let Some(current) = self.records.get(&id) else {
                        warn!(collection, %id, "Not found");
                        let _ = respond_to.send(Err(FeedError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut item = current.clone();
                    match item.handle_action(action, &context).await {
                        Ok(result) => {
                            self.insert(id.clone(), item);
                            info!(collection, %id, revision = self.revision, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(collection, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FeedError::EntityError(Box::new(e))));
                        }
                    }
                }
                FeedRequest::Subscribe { respond_to } => {
                    debug!(collection, revision = self.revision, "Subscribe");
                    let _ = respond_to.send(Ok(self.publisher.subscribe()));
                }
            }
        }

        info!(collection, size = self.records.len(), revision = self.revision, "Shutdown");
    }
}
