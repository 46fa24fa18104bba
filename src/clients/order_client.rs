use crate::clock::Clock;
use crate::model::{LineItem, Order, OrderCreate, OrderId, OrderPatch, TicketRequest};
use crate::order_feed::OrderError;
use async_trait::async_trait;
use live_feed::{CollectionClient, FeedClient, FeedError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Client for the order feed, and the claim coordinator.
///
/// Every write is a field-level patch over the shared feed. There is no
/// compare-and-swap: two stations claiming the same ticket within one
/// propagation window both get `Ok`, and every subscriber then converges on
/// whichever patch the feed applied last. Treat a returned claim as provisional
/// until the next snapshot confirms it.
///
/// Writes to a ticket that was archived in the meantime return `Ok(None)`.
#[derive(Clone)]
pub struct OrderClient {
    inner: FeedClient<Order>,
    clock: Arc<dyn Clock>,
}

impl OrderClient {
    pub fn new(inner: FeedClient<Order>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }

    #[instrument(skip(self, items))]
    pub async fn place_order(
        &self,
        table_code: &str,
        table_number: u32,
        items: Vec<LineItem>,
        placed_by: Option<String>,
    ) -> Result<OrderId, OrderError> {
        debug!(items = items.len(), "Sending request");
        self.push(table_code, table_number, TicketRequest::Order { items }, placed_by)
            .await
    }

    #[instrument(skip(self))]
    pub async fn call_waiter(&self, table_code: &str, table_number: u32) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.push(table_code, table_number, TicketRequest::WaiterCall, None)
            .await
    }

    async fn push(
        &self,
        table_code: &str,
        table_number: u32,
        request: TicketRequest,
        placed_by: Option<String>,
    ) -> Result<OrderId, OrderError> {
        let payload = OrderCreate {
            table_code: table_code.to_string(),
            table_number,
            request,
            placed_by,
            timestamp: self.clock.now(),
        };
        let id = self.inner.push(payload).await.map_err(Self::map_error)?;
        info!(%id, table_number, "Ticket placed");
        Ok(id)
    }

    /// Writes `claimedBy` and `claimedAt` together in one patch.
    #[instrument(skip(self))]
    pub async fn claim(&self, id: OrderId, actor: &str) -> Result<Option<Order>, OrderError> {
        let patch = OrderPatch::claim(actor, self.clock.now());
        self.patch(id, patch).await
    }

    /// Clears both claim fields.
    #[instrument(skip(self))]
    pub async fn unclaim(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.patch(id, OrderPatch::unclaim()).await
    }

    #[instrument(skip(self))]
    pub async fn hide_from_bar(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.patch(id, OrderPatch::hide_from_bar()).await
    }

    #[instrument(skip(self))]
    pub async fn complete(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.patch(id, OrderPatch::complete()).await
    }

    #[instrument(skip(self))]
    pub async fn mark_stats_recorded(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.patch(id, OrderPatch::stats_recorded()).await
    }

    /// Deletes the ticket from the feed. Returns `false` if it was already gone.
    #[instrument(skip(self))]
    pub async fn archive(&self, id: OrderId) -> Result<bool, OrderError> {
        match self.inner.remove(id).await {
            Ok(()) => {
                info!(%id, "Ticket archived");
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                debug!(%id, "Archive of missing ticket ignored");
                Ok(false)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    async fn patch(&self, id: OrderId, patch: OrderPatch) -> Result<Option<Order>, OrderError> {
        debug!(?patch, "Sending request");
        match self.inner.update(id, patch).await {
            Ok(order) => Ok(Some(order)),
            Err(e) if e.is_not_found() => {
                debug!(%id, "Stale write ignored");
                Ok(None)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[async_trait]
impl CollectionClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &FeedClient<Order> {
        &self.inner
    }

    fn map_error(e: FeedError) -> OrderError {
        e.into_entity::<OrderError>()
            .unwrap_or_else(|e| OrderError::FeedCommunication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{Claim, ClaimPatch, OrderKind};
    use chrono::{DateTime, Utc};
    use live_feed::mock::{create_mock_client, expect_update, MockFeed};

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    fn ticket(id: u64) -> Order {
        Order {
            id: OrderId(id),
            table_code: "T2-AB".into(),
            table_number: 2,
            kind: OrderKind::WaiterCall,
            items: vec![],
            total: None,
            timestamp: start(),
            status: "new".into(),
            placed_by: None,
            claim: None,
            hidden_from_bar: false,
            completed_by_waiter: false,
            stats_recorded: false,
        }
    }

    #[tokio::test]
    async fn claim_writes_name_and_time_in_one_patch() {
        let (feed, mut requests) = create_mock_client::<Order>(4);
        let client = OrderClient::new(feed, Arc::new(ManualClock::at(start())));

        let call = tokio::spawn(async move { client.claim(OrderId(1), "mia").await });

        let (id, patch, respond_to) = expect_update(&mut requests).await.unwrap();
        assert_eq!(id, OrderId(1));
        let expected = Claim {
            claimed_by: "mia".into(),
            claimed_at: start(),
        };
        assert_eq!(patch.claim, Some(ClaimPatch::Set(expected.clone())));
        assert_eq!(patch.hidden_from_bar, None);
        assert_eq!(patch.completed_by_waiter, None);

        let mut claimed = ticket(1);
        claimed.claim = Some(expected);
        respond_to.send(Ok(claimed)).unwrap();

        let order = call.await.unwrap().unwrap().unwrap();
        assert!(order.is_claimed_by("mia"));
    }

    #[tokio::test]
    async fn stale_writes_are_swallowed() {
        let mut mock = MockFeed::<Order>::new();
        mock.expect_update(OrderId(9))
            .return_err(FeedError::NotFound("order_9".into()));
        mock.expect_remove(OrderId(9))
            .return_err(FeedError::NotFound("order_9".into()));

        let client = OrderClient::new(mock.client(), Arc::new(ManualClock::at(start())));
        assert_eq!(client.complete(OrderId(9)).await.unwrap(), None);
        assert!(!client.archive(OrderId(9)).await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn validation_errors_keep_their_type() {
        let mut mock = MockFeed::<Order>::new();
        mock.expect_push()
            .return_err(FeedError::EntityError(Box::new(OrderError::NoItems)));
        mock.expect_update(OrderId(1)).return_err(FeedError::FeedClosed);

        let client = OrderClient::new(mock.client(), Arc::new(ManualClock::at(start())));
        let err = client.place_order("T1", 1, vec![], None).await.unwrap_err();
        assert_eq!(err, OrderError::NoItems);

        let err = client.unclaim(OrderId(1)).await.unwrap_err();
        assert!(matches!(err, OrderError::FeedCommunication(_)));
        mock.verify();
    }
}
