//! Demo: one evening's rush at a single bar with two waiters.
//!
//! Shows claim convergence, the split between bar and waiter dismissal, counting
//! completions once, and broadcast read tracking.

use floor_relay::clock::Clock;
use floor_relay::config::FloorConfig;
use floor_relay::lifecycle::{setup_tracing, FloorSystem};
use floor_relay::model::{LineItem, TableRef};
use floor_relay::visibility::Role;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env is fine; the environment and defaults cover it.
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = FloorConfig::from_env();
    info!(?config, "Starting floor");
    let system = FloorSystem::new(config);

    system
        .assignments
        .save("mia", TableRef::Table(4))
        .await
        .map_err(|e| e.to_string())?;
    system
        .assignments
        .save("jonas", TableRef::Zone("terrace".into()))
        .await
        .map_err(|e| e.to_string())?;

    let bar = system.open_station(Role::Bar, "bar");
    let mia = system.open_station(Role::Waiter, "mia");
    let jonas = system.open_station(Role::Waiter, "jonas");
    let (mut bar_board, bar_loop) = bar.spawn().await.map_err(|e| e.to_string())?;

    let span = tracing::info_span!("guest_orders");
    let (order, call) = async {
        let items = vec![
            LineItem::new("Spritz", Decimal::new(750, 2), 2),
            LineItem::new("Focaccia", Decimal::new(550, 2), 1),
        ];
        let order = system.orders.place_order("T4-XQ", 4, items, None).await?;
        let call = system.orders.call_waiter("T9-LM", 9).await?;
        Ok::<_, floor_relay::order_feed::OrderError>((order, call))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    // Both waiters grab the call at once; the feed keeps whichever landed last.
    let span = tracing::info_span!("claim_race");
    async {
        let (a, b) = tokio::join!(mia.claim(call), jonas.claim(call));
        if a.is_err() || b.is_err() {
            warn!("A claim did not reach the feed");
        }
    }
    .instrument(span)
    .await;

    let _ = tokio::time::timeout(Duration::from_secs(1), bar_board.changed()).await;
    if let Some(ticket) = bar_board.borrow().ticket(call) {
        info!(claimed_by = ?ticket.order.claimed_by(), "Claim settled");
    }

    bar.dismiss(order).await.map_err(|e| e.to_string())?;
    mia.dismiss(order).await.map_err(|e| e.to_string())?;
    // Second tap on the same ticket: already recorded, counted once.
    mia.dismiss(order).await.map_err(|e| e.to_string())?;

    let day = system.clock().now().date_naive();
    if let Some(stats) = system.stats.day(day).await.map_err(|e| e.to_string())? {
        info!(orders = stats.orders, revenue = %stats.revenue, "Today so far");
    }

    let notice = system
        .broadcasts
        .send_to_assigned("Terrace closes at 22:00")
        .await
        .map_err(|e| e.to_string())?;
    jonas.mark_read(notice).await.map_err(|e| e.to_string())?;
    let unread = system
        .broadcasts
        .unread_count("mia")
        .await
        .map_err(|e| e.to_string())?;
    info!(unread, "Unread for mia");

    drop((bar, mia, jonas));
    drop(bar_board);
    system.shutdown().await?;
    let _ = bar_loop.await;

    info!("Demo completed successfully");
    Ok(())
}
