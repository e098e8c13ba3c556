use std::sync::Arc;

use super::settle;
use crate::api::DashboardApi;
use crate::fetch::{FetchCoordinator, FetchOutcome, FetchState, ReportsLoader};
use crate::models::TransactionReports;
use crate::notify::Notifier;

/// Analytics view over `GET /transactions/reports`
pub struct ReportsView {
    notifier: Arc<dyn Notifier>,
    coordinator: FetchCoordinator<ReportsLoader>,
}

impl ReportsView {
    pub fn new(api: Arc<dyn DashboardApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            coordinator: FetchCoordinator::new(ReportsLoader::new(api)),
        }
    }

    pub fn state(&self) -> FetchState<TransactionReports> {
        self.coordinator.state()
    }

    /// Fetch the reports, as when the view is entered
    pub async fn load(&self) -> FetchOutcome {
        let outcome = self.coordinator.reload(()).await;
        settle(outcome, &self.coordinator.state(), self.notifier.as_ref());
        outcome
    }

    pub async fn refetch(&self) -> FetchOutcome {
        let outcome = self.coordinator.refetch().await;
        settle(outcome, &self.coordinator.state(), self.notifier.as_ref());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testing::{fixtures, FakeApi};

    #[tokio::test]
    async fn test_each_load_fetches_reports() {
        let (api, notifier) = fixtures(FakeApi::default());
        let view = ReportsView::new(api.clone(), notifier.clone());
        assert_eq!(view.refetch().await, FetchOutcome::Unchanged);

        assert_eq!(view.load().await, FetchOutcome::Applied);
        assert_eq!(view.load().await, FetchOutcome::Applied);
        view.refetch().await;

        assert_eq!(*api.report_requests.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_report_failure_is_notified() {
        let (api, notifier) = fixtures(FakeApi::default());
        api.fail_with(ApiError::RequestError("connection refused".to_string()));
        let view = ReportsView::new(api.clone(), notifier.clone());

        view.load().await;

        assert!(view.state().error().is_some());
        assert_eq!(notifier.errors(), vec!["connection refused".to_string()]);

        api.recover();
        view.load().await;
        assert!(view.state().data().is_some());
    }
}
