/// A ticket on the shared feed: either a placed order or a waiter call.
///
/// # Feed Entity
/// This struct implements [`FeedEntity`](live_feed::FeedEntity) in
/// [`order_feed::entity`](crate::order_feed::entity). Writers never replace an
/// order; they send an [`OrderPatch`] naming only the fields they own.
///
/// The coordination fields are shaped so the invariants hold by construction:
/// - `claim` bundles `claimedBy` and `claimedAt`, so one is present iff the other is.
/// - `stats_recorded` can only be switched on by a patch, never off.
/// - `hidden_from_bar` and `completed_by_waiter` are independent flags for
///   independent roles.
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Order,
    WaiterCall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Who accepted responsibility for a ticket, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub claimed_by: String,
    pub claimed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub table_code: String,
    pub table_number: u32,
    pub kind: OrderKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
    pub status: String,
    /// Staff member who placed the ticket on a guest's behalf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placed_by: Option<String>,
    #[serde(flatten)]
    pub claim: Option<Claim>,
    #[serde(default)]
    pub hidden_from_bar: bool,
    #[serde(default)]
    pub completed_by_waiter: bool,
    #[serde(default)]
    pub stats_recorded: bool,
}

impl Order {
    pub fn is_waiter_call(&self) -> bool {
        self.kind == OrderKind::WaiterCall
    }

    pub fn claimed_by(&self) -> Option<&str> {
        self.claim.as_ref().map(|c| c.claimed_by.as_str())
    }

    pub fn is_claimed_by(&self, actor: &str) -> bool {
        self.claimed_by() == Some(actor)
    }
}

/// What a new ticket is about.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketRequest {
    Order { items: Vec<LineItem> },
    WaiterCall,
}

/// Payload for pushing a new ticket onto the feed.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub table_code: String,
    pub table_number: u32,
    pub request: TicketRequest,
    pub placed_by: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Claim half of an [`OrderPatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimPatch {
    Set(Claim),
    Clear,
}

/// Field-level update of an order. `None` / `false` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub claim: Option<ClaimPatch>,
    pub hidden_from_bar: Option<bool>,
    pub completed_by_waiter: Option<bool>,
    /// One-way switch; there is no way to clear the flag.
    pub mark_stats_recorded: bool,
}

impl OrderPatch {
    pub fn claim(claimed_by: impl Into<String>, claimed_at: DateTime<Utc>) -> Self {
        Self {
            claim: Some(ClaimPatch::Set(Claim {
                claimed_by: claimed_by.into(),
                claimed_at,
            })),
            ..Self::default()
        }
    }

    pub fn unclaim() -> Self {
        Self {
            claim: Some(ClaimPatch::Clear),
            ..Self::default()
        }
    }

    pub fn hide_from_bar() -> Self {
        Self {
            hidden_from_bar: Some(true),
            ..Self::default()
        }
    }

    pub fn complete() -> Self {
        Self {
            completed_by_waiter: Some(true),
            ..Self::default()
        }
    }

    pub fn stats_recorded() -> Self {
        Self {
            mark_stats_recorded: true,
            ..Self::default()
        }
    }
}
