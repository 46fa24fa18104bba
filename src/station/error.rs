use crate::assignment_feed::AssignmentError;
use crate::broadcast_feed::BroadcastError;
use crate::model::OrderId;
use crate::order_feed::OrderError;
use crate::stats_feed::StatsError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StationError {
    /// A waiter tried to complete a ticket another waiter holds.
    #[error("Ticket {id} is claimed by {claimed_by}")]
    ClaimedByOther { id: OrderId, claimed_by: String },

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}
