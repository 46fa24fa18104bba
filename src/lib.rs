//! # Floor Relay
//!
//! Coordination core for a restaurant floor: guests' orders and waiter calls land
//! on a shared realtime feed, the bar and every waiter watch it, and each of them
//! claims, hides or completes tickets by writing single fields back.
//!
//! There is no central arbiter. Concurrent writes to the same field resolve
//! last-writer-wins in the order the feed applied them, and every station
//! converges on that order through its subscription.
//!
//! ## Module Tour
//!
//! ### The feed ([`live_feed`])
//! One actor per collection, a cloneable client, and a `watch` snapshot per
//! applied change. The collections live in [`order_feed`], [`broadcast_feed`],
//! [`assignment_feed`] and [`stats_feed`].
//!
//! ### Pure rules
//! - [`alert_phase`]: red / orange / green / expired from a ticket's age
//! - [`visibility`]: whether the bar or a waiter sees a ticket
//!
//! ### Clients ([`clients`])
//! - [`OrderClient`](clients::OrderClient): placing tickets and the claim coordinator
//! - [`StatsRecorder`](clients::StatsRecorder): counting a completion once
//! - [`BroadcastChannel`](clients::BroadcastChannel): announcements and read state
//! - [`AssignmentRegistry`](clients::AssignmentRegistry): waiter -> table or zone
//!
//! ### Stations ([`station`])
//! A bar screen or waiter device: commands plus a board recomputed on every feed
//! event, settings change and refresh tick.
//!
//! ### Lifecycle ([`lifecycle`]) and configuration ([`config`], [`clock`])
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod alert_phase;
pub mod assignment_feed;
pub mod broadcast_feed;
pub mod clients;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_feed;
pub mod station;
pub mod stats_feed;
pub mod visibility;

pub use live_feed;
