use crate::clients::OrderClient;
use crate::model::{Contribution, DailyStats, Order, StatsAction, StatsDayCreate};
use crate::stats_feed::StatsError;
use async_trait::async_trait;
use chrono::NaiveDate;
use live_feed::{CollectionClient, FeedClient, FeedError};
use tracing::{debug, info, instrument};

/// The recording side effect. Implementations are not assumed idempotent.
#[async_trait]
pub trait StatsSink: Send + Sync {
    async fn record(&self, contribution: Contribution) -> Result<(), StatsError>;
}

/// Client for the daily statistics feed.
#[derive(Clone)]
pub struct StatsClient {
    inner: FeedClient<DailyStats>,
}

impl StatsClient {
    pub fn new(inner: FeedClient<DailyStats>) -> Self {
        Self { inner }
    }

    /// Aggregate for `day`, if anything was recorded on it.
    pub async fn day(&self, day: NaiveDate) -> Result<Option<DailyStats>, StatsError> {
        self.get(day).await
    }
}

#[async_trait]
impl StatsSink for StatsClient {
    #[instrument(skip(self, contribution), fields(day = %contribution.day))]
    async fn record(&self, contribution: Contribution) -> Result<(), StatsError> {
        let day = contribution.day;
        self.inner
            .ensure(day, StatsDayCreate)
            .await
            .map_err(Self::map_error)?;
        let totals = self
            .inner
            .perform_action(day, StatsAction::Accumulate(contribution))
            .await
            .map_err(Self::map_error)?;
        debug!(orders = totals.orders, waiter_calls = totals.waiter_calls, revenue = %totals.revenue, "Day updated");
        Ok(())
    }
}

#[async_trait]
impl CollectionClient<DailyStats> for StatsClient {
    type Error = StatsError;

    fn inner(&self) -> &FeedClient<DailyStats> {
        &self.inner
    }

    fn map_error(e: FeedError) -> StatsError {
        e.into_entity::<StatsError>()
            .unwrap_or_else(|e| StatsError::FeedCommunication(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded,
    AlreadyRecorded,
}

/// Makes a completed ticket count towards statistics once.
///
/// The guard is the ticket's `statsRecorded` flag as seen in the copy handed in.
/// Two stations acting on the same copy before either flag write has propagated
/// will both record; keep the triggering gesture debounced.
#[derive(Clone)]
pub struct StatsRecorder<S = StatsClient> {
    orders: OrderClient,
    sink: S,
}

impl<S: StatsSink> StatsRecorder<S> {
    pub fn new(orders: OrderClient, sink: S) -> Self {
        Self { orders, sink }
    }

    /// Records `order` unless its flag says it already was, then sets the flag.
    ///
    /// A failing sink leaves the flag unset so the completion can be retried.
    /// The completion is credited to the ticket's claimant, if any.
    #[instrument(skip(self, order), fields(id = %order.id))]
    pub async fn record_if_needed(&self, order: &Order) -> Result<RecordOutcome, StatsError> {
        self.record(order, Contribution::from(order)).await
    }

    /// Same as [`StatsRecorder::record_if_needed`], crediting `actor` as the one who completed it.
    #[instrument(skip(self, order), fields(id = %order.id))]
    pub async fn record_completion(&self, order: &Order, actor: &str) -> Result<RecordOutcome, StatsError> {
        self.record(order, Contribution::from(order).credited_to(actor)).await
    }

    async fn record(&self, order: &Order, contribution: Contribution) -> Result<RecordOutcome, StatsError> {
        if order.stats_recorded {
            debug!("Already recorded");
            return Ok(RecordOutcome::AlreadyRecorded);
        }
        self.sink.record(contribution).await?;
        if self.orders.mark_stats_recorded(order.id).await?.is_none() {
            debug!("Ticket archived before flag write");
        }
        info!("Stats recorded");
        Ok(RecordOutcome::Recorded)
    }
}
