use super::AssignmentError;
use crate::model::{AssignmentCreate, TableRef, WaiterAssignment};
use async_trait::async_trait;
use live_feed::FeedEntity;

/// Assignments are only ever replaced wholesale through `set`, so patches are empty.
#[async_trait]
impl FeedEntity for WaiterAssignment {
    type Id = String;
    type Create = AssignmentCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = AssignmentError;

    fn from_create_params(waiter: String, params: AssignmentCreate) -> Result<Self, AssignmentError> {
        if waiter.trim().is_empty() {
            return Err(AssignmentError::MissingWaiter);
        }
        if matches!(&params.table, TableRef::Zone(zone) if zone.trim().is_empty()) {
            return Err(AssignmentError::EmptyZone);
        }
        Ok(Self {
            waiter,
            table: params.table,
            assigned_at: params.assigned_at,
        })
    }

    async fn on_patch(&mut self, _patch: (), _ctx: &()) -> Result<(), AssignmentError> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), AssignmentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn builds_from_waiter_key() {
        let create = AssignmentCreate { table: TableRef::Table(12), assigned_at: Utc::now() };
        let a = WaiterAssignment::from_create_params("mia".into(), create).unwrap();
        assert_eq!(a.waiter, "mia");
        assert!(a.table.covers_table(12));
    }

    #[test]
    fn rejects_blank_waiter_and_zone() {
        let create = AssignmentCreate { table: TableRef::Table(1), assigned_at: Utc::now() };
        assert_eq!(
            WaiterAssignment::from_create_params(" ".into(), create).unwrap_err(),
            AssignmentError::MissingWaiter
        );
        let create = AssignmentCreate { table: TableRef::Zone(String::new()), assigned_at: Utc::now() };
        assert_eq!(
            WaiterAssignment::from_create_params("mia".into(), create).unwrap_err(),
            AssignmentError::EmptyZone
        );
    }
}
