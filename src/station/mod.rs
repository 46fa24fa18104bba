//! # Station
//!
//! One bar screen or waiter device. A station issues commands as a named actor
//! and runs its own subscription loop: every change on the order, broadcast or
//! assignment feeds, every settings change, and every refresh tick produce a
//! fresh [`Board`]. The tick is what moves tickets through their alert phases
//! when nothing else happens.
//!
//! Stations never coordinate with each other directly. Whatever they write
//! reaches the others through the feeds.

pub mod error;
pub mod view;

pub use error::*;
pub use view::*;

use crate::clients::{AssignmentRegistry, BroadcastChannel, OrderClient, StatsRecorder};
use crate::clock::Clock;
use crate::config::Settings;
use crate::model::{BroadcastMessage, MessageId, Order, OrderId, WaiterAssignment};
use crate::visibility::Role;
use live_feed::{CollectionClient, Snapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument};

/// Everything a station needs to talk to the floor.
#[derive(Clone)]
pub struct StationLinks {
    pub orders: OrderClient,
    pub broadcasts: BroadcastChannel,
    pub assignments: AssignmentRegistry,
    pub recorder: StatsRecorder,
    pub settings: watch::Receiver<Option<Settings>>,
    pub clock: Arc<dyn Clock>,
}

pub struct Station {
    role: Role,
    name: String,
    links: StationLinks,
    refresh: Duration,
}

impl Station {
    pub fn new(role: Role, name: impl Into<String>, links: StationLinks, refresh: Duration) -> Self {
        Self {
            role,
            name: name.into(),
            links,
            refresh,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Claims the ticket for this station's actor. Provisional until the board confirms it.
    #[instrument(skip(self), fields(actor = %self.name, role = %self.role))]
    pub async fn claim(&self, id: OrderId) -> Result<Option<Order>, StationError> {
        Ok(self.links.orders.claim(id, &self.name).await?)
    }

    #[instrument(skip(self), fields(actor = %self.name, role = %self.role))]
    pub async fn unclaim(&self, id: OrderId) -> Result<Option<Order>, StationError> {
        Ok(self.links.orders.unclaim(id).await?)
    }

    /// Removes the ticket from this role's list.
    ///
    /// The bar hides it from the bar only. A waiter completes it, which also
    /// records its statistics once, credited to that waiter.
    ///
    /// A waiter may only complete a ticket that is unclaimed or claimed by
    /// themselves. The check reads the current copy, so a claim landing between
    /// the read and the write is not seen.
    #[instrument(skip(self), fields(actor = %self.name, role = %self.role))]
    pub async fn dismiss(&self, id: OrderId) -> Result<Option<Order>, StationError> {
        match self.role {
            Role::Bar => Ok(self.links.orders.hide_from_bar(id).await?),
            Role::Waiter => {
                let Some(current) = self.links.orders.get(id).await? else {
                    return Ok(None);
                };
                if let Some(holder) = current.claimed_by().filter(|holder| *holder != self.name) {
                    debug!(%holder, "Refusing to complete a ticket claimed by someone else");
                    return Err(StationError::ClaimedByOther {
                        id,
                        claimed_by: holder.to_string(),
                    });
                }
                let Some(order) = self.links.orders.complete(id).await? else {
                    return Ok(None);
                };
                let outcome = self.links.recorder.record_completion(&order, &self.name).await?;
                debug!(?outcome, "Completion recorded");
                Ok(Some(order))
            }
        }
    }

    #[instrument(skip(self), fields(actor = %self.name))]
    pub async fn mark_read(&self, id: MessageId) -> Result<Option<BroadcastMessage>, StationError> {
        Ok(self.links.broadcasts.mark_read(id, &self.name).await?)
    }

    /// Starts the subscription loop.
    ///
    /// The loop ends when every board receiver is dropped or when the feeds shut down.
    pub async fn spawn(&self) -> Result<(watch::Receiver<Board>, JoinHandle<()>), StationError> {
        let orders = self.links.orders.subscribe().await?;
        let messages = self.links.broadcasts.subscribe().await?;
        let assignments = self.links.assignments.subscribe().await?;

        let inputs = Inputs {
            role: self.role,
            viewer: self.name.clone(),
            clock: self.links.clock.clone(),
            orders,
            messages,
            assignments,
            settings: self.links.settings.clone(),
        };
        let (publisher, board) = watch::channel(inputs.compose());
        let handle = tokio::spawn(run(inputs, publisher, self.refresh));
        info!(actor = %self.name, role = %self.role, "Station online");
        Ok((board, handle))
    }
}

struct Inputs {
    role: Role,
    viewer: String,
    clock: Arc<dyn Clock>,
    orders: watch::Receiver<Snapshot<Order>>,
    messages: watch::Receiver<Snapshot<BroadcastMessage>>,
    assignments: watch::Receiver<Snapshot<WaiterAssignment>>,
    settings: watch::Receiver<Option<Settings>>,
}

impl Inputs {
    fn compose(&self) -> Board {
        let settings = Settings::effective(self.settings.borrow().as_ref());
        Board::compose(
            self.role,
            &self.viewer,
            self.clock.now(),
            &settings,
            &self.orders.borrow(),
            &self.messages.borrow(),
            &self.assignments.borrow(),
        )
    }
}

async fn run(mut inputs: Inputs, publisher: watch::Sender<Board>, refresh: Duration) {
    let mut tick = tokio::time::interval(refresh);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the initial board is already published.
    tick.tick().await;

    let mut settings_live = true;
    loop {
        let cause = tokio::select! {
            changed = inputs.orders.changed() => match changed {
                Ok(()) => "orders",
                Err(_) => break,
            },
            changed = inputs.messages.changed() => match changed {
                Ok(()) => "broadcasts",
                Err(_) => break,
            },
            changed = inputs.assignments.changed() => match changed {
                Ok(()) => "assignments",
                Err(_) => break,
            },
            changed = inputs.settings.changed(), if settings_live => match changed {
                Ok(()) => "settings",
                Err(_) => {
                    // Keep the last value; the defaults cover an unloaded feed.
                    settings_live = false;
                    continue;
                }
            },
            _ = tick.tick() => "tick",
        };

        let board = inputs.compose();
        debug!(viewer = %inputs.viewer, cause, tickets = board.tickets.len(), unread = board.unread, "Board recomputed");
        if publisher.send(board).is_err() {
            break;
        }
    }
    info!(viewer = %inputs.viewer, role = %inputs.role, "Station loop stopped");
}
