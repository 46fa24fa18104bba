use live_feed::mock::MockFeed;
use live_feed::{FeedActor, FeedEntity, FeedError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Tally {
    id: u32,
    label: String,
    count: u32,
}

#[derive(Debug)]
struct TallyCreate {
    label: String,
}

#[derive(Debug)]
struct TallyPatch {
    label: Option<String>,
}

#[derive(Debug)]
enum TallyAction {
    Bump,
}

#[derive(Debug, thiserror::Error)]
enum TallyError {
    #[error("label must not be empty")]
    EmptyLabel,
}

#[async_trait]
impl FeedEntity for Tally {
    type Id = u32;
    type Create = TallyCreate;
    type Patch = TallyPatch;
    type Action = TallyAction;
    type ActionResult = u32;
    type Context = ();
    type Error = TallyError;

    fn from_create_params(id: u32, params: TallyCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(TallyError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            count: 0,
        })
    }

    async fn on_patch(&mut self, patch: TallyPatch, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(label) = patch.label {
            if label.is_empty() {
                return Err(TallyError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TallyAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            TallyAction::Bump => {
                self.count += 1;
                Ok(self.count)
            }
        }
    }
}

fn generated() -> (FeedActor<Tally>, live_feed::FeedClient<Tally>) {
    let counter = AtomicU32::new(1);
    FeedActor::new(10, move || counter.fetch_add(1, Ordering::SeqCst))
}

fn create(label: &str) -> TallyCreate {
    TallyCreate {
        label: label.to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_feed_full_lifecycle() {
    let (actor, client) = generated();
    let handle = tokio::spawn(actor.run(()));

    let id = client.push(create("espresso")).await.unwrap();
    assert_eq!(id, 1);

    let bumped = client.perform_action(id, TallyAction::Bump).await.unwrap();
    assert_eq!(bumped, 1);

    let patched = client
        .update(id, TallyPatch { label: Some("doppio".into()) })
        .await
        .unwrap();
    assert_eq!(patched.label, "doppio");
    // The patch only touched the label.
    assert_eq!(patched.count, 1);

    client.remove(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_subscribers_see_every_applied_write_in_order() {
    let (actor, client) = generated();
    tokio::spawn(actor.run(()));

    let mut feed = client.subscribe().await.unwrap();
    assert_eq!(feed.borrow().revision(), 0);
    assert!(feed.borrow().is_empty());

    let id = client.push(create("latte")).await.unwrap();
    feed.changed().await.unwrap();
    assert_eq!(feed.borrow_and_update().revision(), 1);

    // Reads never publish.
    client.get(id).await.unwrap();
    assert!(!feed.has_changed().unwrap());

    client.perform_action(id, TallyAction::Bump).await.unwrap();
    feed.changed().await.unwrap();
    let snapshot = feed.borrow_and_update().clone();
    assert_eq!(snapshot.revision(), 2);
    assert_eq!(snapshot.get(&id).unwrap().count, 1);

    // A late subscriber starts from the current state.
    let late = client.subscribe().await.unwrap();
    assert_eq!(late.borrow().revision(), 2);
}

#[tokio::test]
async fn test_update_on_removed_record_is_not_found() {
    let (actor, client) = generated();
    tokio::spawn(actor.run(()));

    let id = client.push(create("mocha")).await.unwrap();
    client.remove(id).await.unwrap();

    let err = client
        .update(id, TallyPatch { label: Some("ghost".into()) })
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // The stale write did not resurrect the record.
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_patch_leaves_record_and_revision_untouched() {
    let (actor, client) = generated();
    tokio::spawn(actor.run(()));

    let id = client.push(create("flat white")).await.unwrap();
    let feed = client.subscribe().await.unwrap();
    let before = feed.borrow().revision();

    let err = client
        .update(id, TallyPatch { label: Some(String::new()) })
        .await
        .unwrap_err();
    assert!(matches!(err, FeedError::EntityError(_)));

    assert_eq!(client.get(id).await.unwrap().unwrap().label, "flat white");
    assert_eq!(feed.borrow().revision(), before);
}

#[tokio::test]
async fn test_keyed_collection_set_and_ensure() {
    let (actor, client) = FeedActor::<Tally>::keyed(10);
    tokio::spawn(actor.run(()));

    let err = client.push(create("cortado")).await.unwrap_err();
    assert!(matches!(err, FeedError::KeyRequired));

    let first = client.ensure(7, create("cortado")).await.unwrap();
    client.perform_action(7, TallyAction::Bump).await.unwrap();

    // Ensure on an existing key returns what is there and changes nothing.
    let again = client.ensure(7, create("ristretto")).await.unwrap();
    assert_eq!(again.label, first.label);
    assert_eq!(again.count, 1);

    // Set replaces wholesale.
    let replaced = client.set(7, create("ristretto")).await.unwrap();
    assert_eq!(replaced.label, "ristretto");
    assert_eq!(replaced.count, 0);
}

#[tokio::test]
async fn test_mock_feed_scripted_answers() {
    let mut mock = MockFeed::<Tally>::new();
    mock.expect_push().return_ok(3);
    mock.expect_update(3)
        .return_err(FeedError::NotFound("3".to_string()));

    let client = mock.client();
    assert_eq!(client.push(create("americano")).await.unwrap(), 3);
    let err = client
        .update(3, TallyPatch { label: None })
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    mock.verify();
}
