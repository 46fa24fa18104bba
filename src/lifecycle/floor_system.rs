use crate::clients::{AssignmentRegistry, BroadcastChannel, OrderClient, StatsClient, StatsRecorder};
use crate::clock::{Clock, SystemClock};
use crate::config::{FloorConfig, SettingsFeed};
use crate::station::{Station, StationLinks};
use crate::visibility::Role;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Owns the running feeds and hands out clients and stations.
///
/// # Architecture
///
/// Four feed collections run in their own tasks:
/// - **Orders**: tickets and waiter calls, written by every station
/// - **Broadcasts**: announcements with per-recipient read flags
/// - **Assignments**: waiter -> table or zone, keyed by waiter name
/// - **Stats**: one aggregate per UTC day
///
/// Settings are not a feed collection; they travel on a [`SettingsFeed`] the
/// system owns and every station watches.
///
/// # Example
///
/// ```ignore
/// let system = FloorSystem::new(FloorConfig::from_env());
/// let id = system.orders.call_waiter("T4-XQ", 4).await?;
///
/// let bar = system.open_station(Role::Bar, "bar");
/// let (board, _loop) = bar.spawn().await?;
///
/// drop(bar);
/// system.shutdown().await?;
/// ```
pub struct FloorSystem {
    pub orders: OrderClient,
    pub broadcasts: BroadcastChannel,
    pub assignments: AssignmentRegistry,
    pub stats: StatsClient,
    pub recorder: StatsRecorder,
    settings: SettingsFeed,
    clock: Arc<dyn Clock>,
    refresh: Duration,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FloorSystem {
    /// Starts every feed on the wall clock, publishing `config.settings`.
    pub fn new(config: FloorConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: FloorConfig, clock: Arc<dyn Clock>) -> Self {
        let settings = SettingsFeed::new(Some(config.settings));
        Self::start(config, clock, settings)
    }

    /// Starts with an explicit settings feed, e.g. one that has not loaded yet.
    ///
    /// Out-of-range intervals and buffers are clamped, see [`FloorConfig::normalized`].
    pub fn start(config: FloorConfig, clock: Arc<dyn Clock>, settings: SettingsFeed) -> Self {
        let config = config.normalized();
        let buffer = config.feed_buffer;

        // 1. Create feeds
        let (order_actor, order_feed) = crate::order_feed::new(buffer);
        let (broadcast_actor, broadcast_feed) = crate::broadcast_feed::new(buffer);
        let (assignment_actor, assignment_feed) = crate::assignment_feed::new(buffer);
        let (stats_actor, stats_feed) = crate::stats_feed::new(buffer);

        // 2. Start them; none needs injected context
        let handles = vec![
            tokio::spawn(order_actor.run(())),
            tokio::spawn(broadcast_actor.run(())),
            tokio::spawn(assignment_actor.run(())),
            tokio::spawn(stats_actor.run(())),
        ];

        // 3. Wire clients
        let orders = OrderClient::new(order_feed, clock.clone());
        let assignments = AssignmentRegistry::new(assignment_feed, clock.clone());
        let broadcasts = BroadcastChannel::new(broadcast_feed, assignments.clone(), clock.clone());
        let stats = StatsClient::new(stats_feed);
        let recorder = StatsRecorder::new(orders.clone(), stats.clone());

        info!(buffer, refresh = ?config.refresh_interval, "Floor started");
        Self {
            orders,
            broadcasts,
            assignments,
            stats,
            recorder,
            settings,
            clock,
            refresh: config.refresh_interval,
            handles,
        }
    }

    pub fn settings(&self) -> &SettingsFeed {
        &self.settings
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// A station for `name` acting in `role`. Call [`Station::spawn`] to start its board.
    pub fn open_station(&self, role: Role, name: &str) -> Station {
        let links = StationLinks {
            orders: self.orders.clone(),
            broadcasts: self.broadcasts.clone(),
            assignments: self.assignments.clone(),
            recorder: self.recorder.clone(),
            settings: self.settings.subscribe(),
            clock: self.clock.clone(),
        };
        Station::new(role, name, links, self.refresh)
    }

    /// Drops the system's clients and waits for every feed to stop.
    ///
    /// Feeds stop once *all* clients are gone, so drop every [`Station`] and
    /// cloned client first. Station loops then end on their own when their
    /// feeds close.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down floor...");

        drop(self.recorder);
        drop(self.orders);
        drop(self.broadcasts);
        drop(self.assignments);
        drop(self.stats);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Feed task failed: {:?}", e);
                return Err(format!("Feed task failed: {:?}", e));
            }
        }

        info!("Floor shutdown complete.");
        Ok(())
    }
}
