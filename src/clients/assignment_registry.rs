use crate::assignment_feed::AssignmentError;
use crate::clock::Clock;
use crate::model::{AssignmentCreate, TableRef, WaiterAssignment};
use async_trait::async_trait;
use live_feed::{CollectionClient, FeedClient, FeedError};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Which waiter looks after which table or zone. Saving overwrites; the last
/// save wins and nothing is kept of earlier assignments.
#[derive(Clone)]
pub struct AssignmentRegistry {
    inner: FeedClient<WaiterAssignment>,
    clock: Arc<dyn Clock>,
}

impl AssignmentRegistry {
    pub fn new(inner: FeedClient<WaiterAssignment>, clock: Arc<dyn Clock>) -> Self {
        Self { inner, clock }
    }

    #[instrument(skip(self))]
    pub async fn save(&self, waiter: &str, table: TableRef) -> Result<WaiterAssignment, AssignmentError> {
        let payload = AssignmentCreate {
            table,
            assigned_at: self.clock.now(),
        };
        let assignment = self
            .inner
            .set(waiter.to_string(), payload)
            .await
            .map_err(Self::map_error)?;
        info!(waiter, table = %assignment.table, "Assignment saved");
        Ok(assignment)
    }

    pub async fn get(&self, waiter: &str) -> Result<Option<WaiterAssignment>, AssignmentError> {
        self.inner
            .get(waiter.to_string())
            .await
            .map_err(Self::map_error)
    }

    /// Returns `false` if the waiter had no assignment.
    #[instrument(skip(self))]
    pub async fn remove(&self, waiter: &str) -> Result<bool, AssignmentError> {
        match self.inner.remove(waiter.to_string()).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => {
                debug!("No assignment to remove");
                Ok(false)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Every waiter that currently has an assignment, in name order.
    pub async fn waiters(&self) -> Result<Vec<String>, AssignmentError> {
        let feed = self.inner.subscribe().await.map_err(Self::map_error)?;
        let names = feed.borrow().iter().map(|(name, _)| name.clone()).collect();
        Ok(names)
    }
}

#[async_trait]
impl CollectionClient<WaiterAssignment> for AssignmentRegistry {
    type Error = AssignmentError;

    fn inner(&self) -> &FeedClient<WaiterAssignment> {
        &self.inner
    }

    fn map_error(e: FeedError) -> AssignmentError {
        e.into_entity::<AssignmentError>()
            .unwrap_or_else(|e| AssignmentError::FeedCommunication(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    fn registry() -> AssignmentRegistry {
        let (actor, feed) = crate::assignment_feed::new(8);
        tokio::spawn(actor.run(()));
        AssignmentRegistry::new(feed, Arc::new(SystemClock))
    }

    #[tokio::test]
    async fn save_overwrites_previous_assignment() {
        let registry = registry();
        registry.save("mia", TableRef::Table(4)).await.unwrap();
        registry.save("mia", TableRef::Zone("terrace".into())).await.unwrap();

        let current = registry.get("mia").await.unwrap().unwrap();
        assert_eq!(current.table, TableRef::Zone("terrace".into()));
        assert_eq!(registry.waiters().await.unwrap(), vec!["mia".to_string()]);
    }

    #[tokio::test]
    async fn unknown_waiter_is_absent() {
        let registry = registry();
        assert_eq!(registry.get("nobody").await.unwrap(), None);
        assert!(!registry.remove("nobody").await.unwrap());
    }

    #[tokio::test]
    async fn blank_waiter_is_rejected() {
        let registry = registry();
        let err = registry.save("", TableRef::Table(1)).await.unwrap_err();
        assert_eq!(err, AssignmentError::MissingWaiter);
    }
}
