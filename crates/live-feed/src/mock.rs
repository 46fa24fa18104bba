//! # Mock Feed & Testing Guide
//!
//! `MockFeed<T>` hands out a real [`FeedClient<T>`] whose requests are answered from
//! a queue of expectations instead of a running [`FeedActor`](crate::FeedActor).
//! Use it to test client wrappers (claim coordination, stats recording, broadcast
//! read tracking) deterministically, including error paths that are awkward to
//! provoke against a live collection.
//!
//! | | MockFeed | Real FeedActor |
//! |---|---|---|
//! | **State** | None, scripted answers | Real records and snapshots |
//! | **Error injection** | `return_err` | Requires a specific state |
//! | **Use case** | Logic *around* the client | The collection itself, end to end |
//!
//! For step-by-step control of a single request, [`create_mock_client`] plus the
//! `expect_*` helpers give you the raw request and its responder.
//!
//! ```rust
//! use live_feed::mock::MockFeed;
//! use live_feed::FeedEntity;
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug)] struct NotePatch;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl FeedEntity for Note {
//!     type Id = u32; type Create = NoteCreate; type Patch = NotePatch;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, text: String::new() })
//!     }
//!     async fn on_patch(&mut self, _: NotePatch, _: &()) -> Result<(), NoteError> { Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockFeed::<Note>::new();
//!     mock.expect_get(1).return_ok(Some(Note { id: 1, text: "hi".into() }));
//!
//!     let client = mock.client();
//!     let note = client.get(1).await.unwrap().unwrap();
//!     assert_eq!(note.text, "hi");
//!     mock.verify();
//! }
//! ```

use crate::{FeedClient, FeedEntity, FeedError, FeedRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: FeedEntity> {
    Push {
        response: Result<T::Id, FeedError>,
    },
    Set {
        id: T::Id,
        response: Result<T, FeedError>,
    },
    Ensure {
        id: T::Id,
        response: Result<T, FeedError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FeedError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FeedError>,
    },
    Remove {
        id: T::Id,
        response: Result<(), FeedError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FeedError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted feed with expectation tracking.
///
/// Requests are matched against expectations in FIFO order. A request of the wrong
/// kind, for the wrong key, or with no expectation left panics the background task,
/// which the test then observes as `FeedError::FeedDropped`.
pub struct MockFeed<T: FeedEntity> {
    client: FeedClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: FeedEntity> MockFeed<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<FeedRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let pending = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = pending.lock().unwrap().pop_front();

                match (request, expectation) {
                    (FeedRequest::Push { respond_to, .. }, Some(Expectation::Push { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Set { id, respond_to, .. }, Some(Expectation::Set { id: want, response })) => {
                        assert_eq!(id, want, "set for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Ensure { id, respond_to, .. }, Some(Expectation::Ensure { id: want, response })) => {
                        assert_eq!(id, want, "ensure for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        assert_eq!(id, want, "update for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Remove { id, respond_to }, Some(Expectation::Remove { id: want, response })) => {
                        assert_eq!(id, want, "remove for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (FeedRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        assert_eq!(id, want, "action for unexpected key");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: FeedClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> FeedClient<T> {
        self.client.clone()
    }

    pub fn expect_push(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.expectations.clone(), |response| Expectation::Push { response })
    }

    pub fn expect_set(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Set { id, response })
    }

    pub fn expect_ensure(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Ensure { id, response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Get { id, response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Update { id, response })
    }

    pub fn expect_remove(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Remove { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.expectations.clone(), move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: FeedEntity> Default for MockFeed<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records what the mock answers for one expected request.
pub struct ExpectationBuilder<T: FeedEntity, R> {
    expectations: Expectations<T>,
    make: Box<dyn FnOnce(Result<R, FeedError>) -> Expectation<T> + Send>,
}

impl<T: FeedEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: Expectations<T>,
        make: impl FnOnce(Result<R, FeedError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn return_err(self, error: FeedError) {
        let expectation = (self.make)(Err(error));
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the receiver its requests arrive on.
///
/// Use this when a test needs to inspect the exact payload a wrapper sends, for
/// example that a claim writes `claimedBy` and `claimedAt` in one patch.
pub fn create_mock_client<T: FeedEntity>(
    buffer_size: usize,
) -> (FeedClient<T>, mpsc::Receiver<FeedRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (FeedClient::new(sender), receiver)
}

/// Next request must be a Push.
pub async fn expect_push<T: FeedEntity>(
    receiver: &mut mpsc::Receiver<FeedRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FeedError>>)> {
    match receiver.recv().await {
        Some(FeedRequest::Push { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request must be an Update.
pub async fn expect_update<T: FeedEntity>(
    receiver: &mut mpsc::Receiver<FeedRequest<T>>,
) -> Option<(T::Id, T::Patch, oneshot::Sender<Result<T, FeedError>>)> {
    match receiver.recv().await {
        Some(FeedRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Next request must be a Get.
pub async fn expect_get<T: FeedEntity>(
    receiver: &mut mpsc::Receiver<FeedRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FeedError>>)> {
    match receiver.recv().await {
        Some(FeedRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request must be an Action.
pub async fn expect_action<T: FeedEntity>(
    receiver: &mut mpsc::Receiver<FeedRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FeedError>>)> {
    match receiver.recv().await {
        Some(FeedRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
