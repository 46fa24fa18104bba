//! # Visibility Gate
//!
//! Which tickets a station shows. Bar and waiters dismiss tickets with separate
//! flags, so one role tidying its list never removes work from the other.

use crate::alert_phase::AlertPhase;
use crate::model::Order;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Bar,
    Waiter,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Bar => write!(f, "bar"),
            Role::Waiter => write!(f, "waiter"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Role::Bar),
            "waiter" => Ok(Role::Waiter),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Whether `order` belongs on a `role` station's list right now.
///
/// - Bar: shown until the bar hides it. Expiry is ignored; claims are ignored.
/// - Waiter: shown until a waiter completes it, or until it expires.
pub fn is_visible(order: &Order, role: Role, phase: AlertPhase) -> bool {
    match role {
        Role::Bar => !order.hidden_from_bar,
        Role::Waiter => !order.completed_by_waiter && !phase.is_expired(),
    }
}
