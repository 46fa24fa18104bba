//! # FeedEntity Trait
//!
//! The `FeedEntity` trait defines the contract every record kind (orders, broadcast
//! messages, waiter assignments, daily stats) implements to live in a [`FeedActor`](crate::FeedActor).
//! It names the key, the creation payload, the field-level patch, custom actions,
//! the injected context and the error type, and provides the lifecycle hooks the
//! actor calls while applying writes.
//!
//! # Provided Methods (Hooks)
//! - [`FeedEntity::on_create`]
//! - [`FeedEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record kind must implement to be held by a `FeedActor`.
///
/// # Patches, not replacements
/// Writers never send a whole record back to the feed. They send a `Patch` naming
/// only the fields they own, and [`FeedEntity::on_patch`] applies it in place. Two
/// writers touching different fields of the same record therefore never clobber
/// each other; two writers touching the same field resolve last-writer-wins in the
/// order the actor applied them.
#[async_trait]
pub trait FeedEntity: Clone + Send + Sync + 'static {
    /// Record key. `Ord` gives snapshots a stable iteration order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload for `push`, `set` and `ensure`.
    type Create: Send + Sync + Debug;

    /// Field-level update applied by `update`.
    type Patch: Send + Sync + Debug;

    /// Record-specific operations that do not fit a patch.
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Per-collection error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full record from its key and payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the record is built and before it becomes visible to subscribers.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply a field-level patch in place.
    async fn on_patch(&mut self, patch: Self::Patch, _ctx: &Self::Context)
        -> Result<(), Self::Error>;

    /// Called immediately before the record is removed from the feed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
