//! # Floor Lifecycle
//!
//! Starting, wiring and stopping the feeds, plus logging setup.
//!
//! [`FloorSystem`] creates the four feed collections, spawns each in its own task,
//! wires the collection clients (the broadcast channel reads the assignment
//! registry; the stats recorder writes through the order client) and hands out
//! [`Station`](crate::station::Station)s.
//!
//! ## Shutdown
//!
//! 1. Drop every station and cloned client
//! 2. [`FloorSystem::shutdown`] drops the system's own clients
//! 3. Each feed sees its request channel close and stops
//! 4. Station loops see their feeds close and stop
//!
//! A feed with a client still alive somewhere keeps running, and `shutdown` waits for it.

pub mod floor_system;
pub mod tracing;

pub use self::floor_system::*;
pub use self::tracing::*;
