//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`. Module paths are hidden; every event carries its own structured
//! fields instead (`collection`, `id`, `revision`, `actor`, `role`).
//!
//! ```bash
//! # Ticket lifecycle, claims and station start/stop
//! RUST_LOG=info cargo run
//!
//! # Every request payload and every board recomputation
//! RUST_LOG=debug cargo run
//!
//! # Only the feeds
//! RUST_LOG=live_feed=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a claim race reads like this:
//!
//! ```text
//! INFO Pushed collection="Order" id=order_1 size=1 revision=1
//! INFO claim: Updated collection="Order" id=order_1 revision=2 id=OrderId(1) actor="mia" role=waiter
//! INFO claim: Updated collection="Order" id=order_1 revision=3 id=OrderId(1) actor="jonas" role=waiter
//! ```
//!
//! Both claims succeed locally; the later revision is the one every station ends up showing.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
