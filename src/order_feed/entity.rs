//! FeedEntity implementation for [`Order`].
//!
//! Creation validates the ticket and computes the total; patches touch only the
//! fields they name.

use super::OrderError;
use crate::model::{ClaimPatch, Order, OrderCreate, OrderId, OrderKind, OrderPatch, TicketRequest};
use async_trait::async_trait;
use live_feed::FeedEntity;
use rust_decimal::Decimal;

/// Status of a freshly pushed ticket.
pub const INITIAL_STATUS: &str = "new";

#[async_trait]
impl FeedEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Patch = OrderPatch;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        let (kind, items, total) = match params.request {
            TicketRequest::WaiterCall => (OrderKind::WaiterCall, Vec::new(), None),
            TicketRequest::Order { items } => {
                if items.is_empty() {
                    return Err(OrderError::NoItems);
                }
                if let Some(bad) = items.iter().find(|item| item.quantity == 0) {
                    return Err(OrderError::InvalidQuantity {
                        item: bad.name.clone(),
                        quantity: bad.quantity,
                    });
                }
                let total: Decimal = items.iter().map(|item| item.subtotal()).sum();
                (OrderKind::Order, items, Some(total))
            }
        };

        Ok(Self {
            id,
            table_code: params.table_code,
            table_number: params.table_number,
            kind,
            items,
            total,
            timestamp: params.timestamp,
            status: INITIAL_STATUS.to_string(),
            placed_by: params.placed_by,
            claim: None,
            hidden_from_bar: false,
            completed_by_waiter: false,
            stats_recorded: false,
        })
    }

    async fn on_patch(&mut self, patch: OrderPatch, _ctx: &()) -> Result<(), OrderError> {
        match patch.claim {
            Some(ClaimPatch::Set(claim)) => {
                if claim.claimed_by.trim().is_empty() {
                    return Err(OrderError::MissingActor);
                }
                self.claim = Some(claim);
            }
            Some(ClaimPatch::Clear) => self.claim = None,
            None => {}
        }
        if let Some(hidden) = patch.hidden_from_bar {
            self.hidden_from_bar = hidden;
        }
        if let Some(completed) = patch.completed_by_waiter {
            self.completed_by_waiter = completed;
        }
        if patch.mark_stats_recorded {
            self.stats_recorded = true;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), OrderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Claim, LineItem};
    use chrono::{DateTime, Utc};

    fn create(request: TicketRequest) -> OrderCreate {
        OrderCreate {
            table_code: "T7-KD".into(),
            table_number: 7,
            request,
            placed_by: None,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn order_total_is_sum_of_line_items() {
        let items = vec![
            LineItem::new("Spritz", Decimal::new(650, 2), 2),
            LineItem::new("Water", Decimal::new(250, 2), 1),
        ];
        let order = Order::from_create_params(OrderId(1), create(TicketRequest::Order { items })).unwrap();
        assert_eq!(order.kind, OrderKind::Order);
        assert_eq!(order.total, Some(Decimal::new(1550, 2)));
        assert_eq!(order.status, INITIAL_STATUS);
        assert!(order.claim.is_none());
    }

    #[test]
    fn waiter_call_has_no_items_or_total() {
        let call = Order::from_create_params(OrderId(2), create(TicketRequest::WaiterCall)).unwrap();
        assert!(call.is_waiter_call());
        assert!(call.items.is_empty());
        assert!(call.total.is_none());
    }

    #[test]
    fn empty_or_zero_quantity_orders_are_rejected() {
        let empty = Order::from_create_params(OrderId(3), create(TicketRequest::Order { items: vec![] }));
        assert_eq!(empty.unwrap_err(), OrderError::NoItems);

        let zero = vec![LineItem::new("Beer", Decimal::new(400, 2), 0)];
        let err = Order::from_create_params(OrderId(4), create(TicketRequest::Order { items: zero })).unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity { quantity: 0, .. }));
    }

    #[tokio::test]
    async fn patches_touch_only_named_fields() {
        let mut call = Order::from_create_params(OrderId(5), create(TicketRequest::WaiterCall)).unwrap();
        call.on_patch(OrderPatch::hide_from_bar(), &()).await.unwrap();
        call.on_patch(OrderPatch::claim("jonas", DateTime::<Utc>::UNIX_EPOCH), &()).await.unwrap();

        assert!(call.hidden_from_bar);
        assert!(!call.completed_by_waiter);
        assert_eq!(
            call.claim,
            Some(Claim {
                claimed_by: "jonas".into(),
                claimed_at: DateTime::<Utc>::UNIX_EPOCH,
            })
        );

        call.on_patch(OrderPatch::unclaim(), &()).await.unwrap();
        assert!(call.claim.is_none());
        assert!(call.hidden_from_bar);
    }

    #[tokio::test]
    async fn stats_flag_never_reverts() {
        let mut call = Order::from_create_params(OrderId(6), create(TicketRequest::WaiterCall)).unwrap();
        call.on_patch(OrderPatch::stats_recorded(), &()).await.unwrap();
        call.on_patch(OrderPatch::default(), &()).await.unwrap();
        assert!(call.stats_recorded);
    }

    #[tokio::test]
    async fn claim_without_name_is_rejected() {
        let mut call = Order::from_create_params(OrderId(7), create(TicketRequest::WaiterCall)).unwrap();
        let err = call
            .on_patch(OrderPatch::claim("  ", DateTime::<Utc>::UNIX_EPOCH), &())
            .await
            .unwrap_err();
        assert_eq!(err, OrderError::MissingActor);
        assert!(call.claim.is_none());
    }
}
