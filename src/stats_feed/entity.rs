use super::StatsError;
use crate::model::{DailyStats, StatsAction, StatsDayCreate};
use async_trait::async_trait;
use chrono::NaiveDate;
use live_feed::FeedEntity;

#[async_trait]
impl FeedEntity for DailyStats {
    type Id = NaiveDate;
    type Create = StatsDayCreate;
    type Patch = ();
    type Action = StatsAction;
    type ActionResult = DailyStats;
    type Context = ();
    type Error = StatsError;

    fn from_create_params(day: NaiveDate, _params: StatsDayCreate) -> Result<Self, StatsError> {
        Ok(DailyStats::empty(day))
    }

    async fn on_patch(&mut self, _patch: (), _ctx: &()) -> Result<(), StatsError> {
        Ok(())
    }

    /// Accumulation runs inside the feed, so concurrent contributions to the same
    /// day are applied one after the other and none is lost.
    async fn handle_action(&mut self, action: StatsAction, _ctx: &()) -> Result<DailyStats, StatsError> {
        match action {
            StatsAction::Accumulate(contribution) => {
                if contribution.day != self.day {
                    return Err(StatsError::DayMismatch {
                        aggregate: self.day,
                        contribution: contribution.day,
                    });
                }
                self.accumulate(&contribution);
                Ok(self.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Contribution, OrderKind};
    use rust_decimal::Decimal;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn contribution(d: u32, kind: OrderKind) -> Contribution {
        Contribution {
            day: day(d),
            kind,
            revenue: Decimal::new(900, 2),
            items: vec![("Aperol".into(), 2)],
            completed_by: Some("mia".into()),
        }
    }

    #[tokio::test]
    async fn accumulate_adds_counts_and_revenue() {
        let mut stats = DailyStats::from_create_params(day(3), StatsDayCreate).unwrap();
        stats.handle_action(StatsAction::Accumulate(contribution(3, OrderKind::Order)), &()).await.unwrap();
        let after = stats
            .handle_action(StatsAction::Accumulate(contribution(3, OrderKind::WaiterCall)), &())
            .await
            .unwrap();

        assert_eq!(after.orders, 1);
        assert_eq!(after.waiter_calls, 1);
        assert_eq!(after.revenue, Decimal::new(1800, 2));
        assert_eq!(after.items.get("Aperol"), Some(&4));
        assert_eq!(after.completed_by.get("mia"), Some(&2));
    }

    #[tokio::test]
    async fn other_days_are_rejected() {
        let mut stats = DailyStats::from_create_params(day(3), StatsDayCreate).unwrap();
        let err = stats
            .handle_action(StatsAction::Accumulate(contribution(4, OrderKind::Order)), &())
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::DayMismatch { .. }));
        assert_eq!(stats.orders, 0);
    }
}
