//! The board a station renders, recomputed from scratch on every change.

use crate::alert_phase::{self, AlertPhase};
use crate::config::Settings;
use crate::model::{BroadcastMessage, Order, OrderId, WaiterAssignment};
use crate::visibility::{is_visible, Role};
use chrono::{DateTime, Utc};
use live_feed::Snapshot;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketView {
    pub order: Order,
    pub phase: AlertPhase,
    pub label: &'static str,
    /// The viewer holds the claim (as last seen on the feed).
    pub mine: bool,
    /// Ticket is for the table the viewer is assigned to.
    pub at_my_table: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub message: BroadcastMessage,
    pub unread_by_me: bool,
    /// Recipients that have not read the message yet.
    pub unread_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub role: Role,
    pub viewer: String,
    pub computed_at: DateTime<Utc>,
    pub settings: Settings,
    /// Visible tickets, oldest first.
    pub tickets: Vec<TicketView>,
    /// Newest first. The bar sees every message; a waiter sees those addressed to them.
    pub messages: Vec<MessageView>,
    pub unread: usize,
    pub assignment: Option<WaiterAssignment>,
}

impl Board {
    pub fn compose(
        role: Role,
        viewer: &str,
        now: DateTime<Utc>,
        settings: &Settings,
        orders: &Snapshot<Order>,
        messages: &Snapshot<BroadcastMessage>,
        assignments: &Snapshot<WaiterAssignment>,
    ) -> Self {
        let assignment = assignments.get(&viewer.to_string()).cloned();

        let mut tickets: Vec<TicketView> = orders
            .values()
            .filter_map(|order| {
                let phase = alert_phase::phase(order.timestamp, now, settings.auto_hide_minutes);
                if !is_visible(order, role, phase) {
                    return None;
                }
                Some(TicketView {
                    order: order.clone(),
                    phase,
                    label: phase.label(settings.language),
                    mine: order.is_claimed_by(viewer),
                    at_my_table: assignment
                        .as_ref()
                        .is_some_and(|a| a.table.covers_table(order.table_number)),
                })
            })
            .collect();
        tickets.sort_by_key(|t| (t.order.timestamp, t.order.id));

        let mut shown: Vec<MessageView> = messages
            .values()
            .filter(|m| role == Role::Bar || m.is_addressed_to(viewer))
            .map(|m| MessageView {
                message: m.clone(),
                unread_by_me: m.is_unread_by(viewer),
                unread_count: m.unread_count(),
            })
            .collect();
        shown.sort_by(|a, b| {
            b.message
                .created_at
                .cmp(&a.message.created_at)
                .then(b.message.id.cmp(&a.message.id))
        });

        Self {
            role,
            viewer: viewer.to_string(),
            computed_at: now,
            settings: *settings,
            tickets,
            messages: shown,
            unread: crate::model::unread_for(messages.values(), viewer),
            assignment,
        }
    }

    pub fn ticket(&self, id: OrderId) -> Option<&TicketView> {
        self.tickets.iter().find(|t| t.order.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::model::{BroadcastCreate, OrderCreate, TicketRequest};
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    async fn snapshots() -> (Snapshot<Order>, Snapshot<BroadcastMessage>, Snapshot<WaiterAssignment>) {
        let (orders, order_feed) = crate::order_feed::new(8);
        let (messages, message_feed) = crate::broadcast_feed::new(8);
        let (assignments, assignment_feed) = crate::assignment_feed::new(8);
        tokio::spawn(orders.run(()));
        tokio::spawn(messages.run(()));
        tokio::spawn(assignments.run(()));

        for (table, minutes_ago) in [(1, 1), (2, 6)] {
            order_feed
                .push(OrderCreate {
                    table_code: format!("T{table}"),
                    table_number: table,
                    request: TicketRequest::WaiterCall,
                    placed_by: None,
                    timestamp: t0() - Duration::minutes(minutes_ago),
                })
                .await
                .unwrap();
        }
        message_feed
            .push(BroadcastCreate {
                payload: "for ben".into(),
                recipients: vec!["ben".into()],
                created_at: t0(),
            })
            .await
            .unwrap();

        let orders = order_feed.subscribe().await.unwrap().borrow().clone();
        let messages = message_feed.subscribe().await.unwrap().borrow().clone();
        let assignments = assignment_feed.subscribe().await.unwrap().borrow().clone();
        (orders, messages, assignments)
    }

    #[tokio::test]
    async fn tickets_are_oldest_first_with_phase_labels() {
        let (orders, messages, assignments) = snapshots().await;
        let settings = Settings {
            auto_hide_minutes: 10,
            language: Language::De,
        };
        let board = Board::compose(Role::Waiter, "anna", t0(), &settings, &orders, &messages, &assignments);

        let tables: Vec<u32> = board.tickets.iter().map(|t| t.order.table_number).collect();
        assert_eq!(tables, vec![2, 1]);
        assert_eq!(board.tickets[0].phase, AlertPhase::Green);
        assert_eq!(board.tickets[0].label, "In Arbeit");
        assert_eq!(board.tickets[1].label, "Neu");
    }

    #[tokio::test]
    async fn bar_sees_every_message_waiters_only_their_own() {
        let (orders, messages, assignments) = snapshots().await;
        let settings = Settings::default();

        let bar = Board::compose(Role::Bar, "bar", t0(), &settings, &orders, &messages, &assignments);
        assert_eq!(bar.messages.len(), 1);
        assert_eq!(bar.unread, 0);

        let anna = Board::compose(Role::Waiter, "anna", t0(), &settings, &orders, &messages, &assignments);
        assert!(anna.messages.is_empty());

        let ben = Board::compose(Role::Waiter, "ben", t0(), &settings, &orders, &messages, &assignments);
        assert_eq!(ben.unread, 1);
        assert!(ben.messages[0].unread_by_me);
    }
}
