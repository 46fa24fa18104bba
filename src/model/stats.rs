use crate::model::{Order, OrderKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics for one calendar day (UTC), keyed by that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub day: NaiveDate,
    pub orders: u32,
    pub waiter_calls: u32,
    pub revenue: Decimal,
    /// item name -> quantity sold
    pub items: BTreeMap<String, u32>,
    /// claiming waiter -> tickets completed
    pub completed_by: BTreeMap<String, u32>,
}

impl DailyStats {
    pub fn empty(day: NaiveDate) -> Self {
        Self {
            day,
            orders: 0,
            waiter_calls: 0,
            revenue: Decimal::ZERO,
            items: BTreeMap::new(),
            completed_by: BTreeMap::new(),
        }
    }

    /// Fold one completed ticket into the aggregate. Not idempotent.
    pub fn accumulate(&mut self, contribution: &Contribution) {
        match contribution.kind {
            OrderKind::Order => self.orders += 1,
            OrderKind::WaiterCall => self.waiter_calls += 1,
        }
        self.revenue += contribution.revenue;
        for (name, quantity) in &contribution.items {
            *self.items.entry(name.clone()).or_insert(0) += quantity;
        }
        if let Some(waiter) = &contribution.completed_by {
            *self.completed_by.entry(waiter.clone()).or_insert(0) += 1;
        }
    }
}

/// What one completed ticket adds to the day's statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub day: NaiveDate,
    pub kind: OrderKind,
    pub revenue: Decimal,
    pub items: Vec<(String, u32)>,
    pub completed_by: Option<String>,
}

impl From<&Order> for Contribution {
    fn from(order: &Order) -> Self {
        Self {
            day: order.timestamp.date_naive(),
            kind: order.kind,
            revenue: order.total.unwrap_or(Decimal::ZERO),
            items: order
                .items
                .iter()
                .map(|item| (item.name.clone(), item.quantity))
                .collect(),
            completed_by: order.claimed_by().map(str::to_string),
        }
    }
}

impl Contribution {
    /// Credits the completion to `actor` instead of the claimant.
    pub fn credited_to(mut self, actor: impl Into<String>) -> Self {
        self.completed_by = Some(actor.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct StatsDayCreate;

#[derive(Debug, Clone)]
pub enum StatsAction {
    Accumulate(Contribution),
}
