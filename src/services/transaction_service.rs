//! Transaction list view for one merchant: filters, paging, summary and export

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::export_service::{self, ExportError};
use super::settle_list;
use crate::api::DashboardApi;
use crate::fetch::{FetchCoordinator, FetchOutcome, FetchState, TransactionListLoader};
use crate::models::{TransactionPage, TransactionStatus, TransactionSummary};
use crate::notify::Notifier;
use crate::query::{PageSize, QueryError, TransactionFilters, TransactionKey, TransactionQuery};
use crate::utils::page::Page;

pub struct TransactionListView {
    api: Arc<dyn DashboardApi>,
    notifier: Arc<dyn Notifier>,
    coordinator: FetchCoordinator<TransactionListLoader>,
    merchant_id: String,
    query: TransactionQuery,
    default_size: PageSize,
    page: Page,
}

impl TransactionListView {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        notifier: Arc<dyn Notifier>,
        merchant_id: &str,
        default_size: PageSize,
    ) -> Self {
        Self {
            coordinator: FetchCoordinator::new(TransactionListLoader::new(api.clone())),
            api,
            notifier,
            merchant_id: merchant_id.trim().to_uppercase(),
            query: TransactionQuery::new(default_size),
            default_size,
            page: Page::new(default_size.get()),
        }
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn query(&self) -> &TransactionQuery {
        &self.query
    }

    pub fn state(&self) -> FetchState<TransactionPage> {
        self.coordinator.state()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Summary of the latest loaded page, if any
    pub fn summary(&self) -> Option<TransactionSummary> {
        self.coordinator.state().data().map(|page| page.summary.clone())
    }

    /// Fetch the current merchant and query, as when the view is entered
    pub async fn load(&mut self) -> FetchOutcome {
        let key = TransactionKey {
            merchant_id: self.merchant_id.clone(),
            query: self.query,
        };
        let outcome = self.coordinator.reload(key).await;
        self.settle(outcome);
        outcome
    }

    /// Switch to another merchant, keeping the filters but starting from page one.
    ///
    /// Blank input is ignored with a warning.
    pub async fn search_merchant(&mut self, merchant_id: &str) -> Option<FetchOutcome> {
        let merchant_id = merchant_id.trim().to_uppercase();
        if merchant_id.is_empty() {
            self.notifier.warning("Please enter a Merchant ID");
            return None;
        }
        Some(self.apply(merchant_id, self.query.with_page(0)).await)
    }

    /// Apply status and date filters together. Nothing is requested when the range is invalid.
    pub async fn apply_filters(
        &mut self,
        status: Option<TransactionStatus>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<FetchOutcome, QueryError> {
        let filters = TransactionFilters::new(status, start_date, end_date)?;
        Ok(self
            .apply(self.merchant_id.clone(), self.query.with_filters(filters))
            .await)
    }

    pub async fn clear_filters(&mut self) -> FetchOutcome {
        self.apply(self.merchant_id.clone(), self.query.cleared(self.default_size))
            .await
    }

    pub async fn go_to_page(&mut self, display_page: u32) -> Result<FetchOutcome, QueryError> {
        let index = self.page.index_for_display(display_page)?;
        Ok(self
            .apply(self.merchant_id.clone(), self.query.with_page(index))
            .await)
    }

    pub async fn next_page(&mut self) -> Option<FetchOutcome> {
        let index = self.page.next()?;
        Some(
            self.apply(self.merchant_id.clone(), self.query.with_page(index))
                .await,
        )
    }

    pub async fn previous_page(&mut self) -> Option<FetchOutcome> {
        let index = self.page.previous()?;
        Some(
            self.apply(self.merchant_id.clone(), self.query.with_page(index))
                .await,
        )
    }

    pub async fn change_page_size(&mut self, size: PageSize) -> FetchOutcome {
        self.apply(self.merchant_id.clone(), self.query.with_size(size))
            .await
    }

    pub async fn refetch(&mut self) -> FetchOutcome {
        let outcome = self.coordinator.refetch().await;
        self.settle(outcome);
        outcome
    }

    /// Export every transaction of the current merchant to `dir`
    pub async fn export(&self, dir: &Path, today: NaiveDate) -> Result<Option<PathBuf>, ExportError> {
        export_service::export_transactions(
            self.api.as_ref(),
            self.notifier.as_ref(),
            &self.merchant_id,
            dir,
            today,
        )
        .await
    }

    async fn apply(&mut self, merchant_id: String, query: TransactionQuery) -> FetchOutcome {
        debug!("Transaction query for {}: {:?}", merchant_id, query.to_params());
        self.merchant_id = merchant_id.clone();
        self.query = query;
        let outcome = self
            .coordinator
            .set_key(TransactionKey { merchant_id, query })
            .await;
        self.settle(outcome);
        outcome
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        let state = self.coordinator.state();
        settle_list(outcome, &state, &mut self.page, self.notifier.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use crate::testing::{fixtures, transaction, FakeApi, Notice, RecordingNotifier};

    fn rows(count: i64) -> Vec<Transaction> {
        (1..=count)
            .map(|i| {
                let status = if i % 4 == 0 {
                    TransactionStatus::Failed
                } else {
                    TransactionStatus::Completed
                };
                transaction(i, status, 10.0 * i as f64)
            })
            .collect()
    }

    fn view(api: &Arc<FakeApi>, notifier: &Arc<RecordingNotifier>) -> TransactionListView {
        TransactionListView::new(api.clone(), notifier.clone(), "mch-00001", PageSize::Ten)
    }

    fn date(raw: &str) -> NaiveDate {
        crate::query::parse_date(raw).unwrap()
    }

    #[tokio::test]
    async fn test_load_shows_summary_for_default_merchant() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(24)));
        let mut view = view(&api, &notifier);

        view.load().await;

        assert_eq!(view.merchant_id(), "MCH-00001");
        let summary = view.summary().unwrap();
        assert_eq!(summary.total_transactions, 24);
        assert_eq!(summary.count_for(TransactionStatus::Failed), 6);
        assert_eq!(view.page().total_pages, 3);
    }

    #[tokio::test]
    async fn test_blank_merchant_search_warns_without_fetching() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(3)));
        let mut view = view(&api, &notifier);
        view.load().await;

        assert_eq!(view.search_merchant("   ").await, None);

        assert_eq!(api.transaction_queries().len(), 1);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Warning("Please enter a Merchant ID".to_string())]
        );
    }

    #[tokio::test]
    async fn test_merchant_search_uppercases_and_resets_page() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(24)));
        let mut view = view(&api, &notifier);
        view.load().await;
        view.next_page().await;

        view.search_merchant(" mch-00002 ").await;

        let (merchant_id, query) = api.transaction_queries().pop().unwrap();
        assert_eq!(merchant_id, "MCH-00002");
        assert_eq!(query.page(), 0);
    }

    #[tokio::test]
    async fn test_filters_reset_page_and_are_sent() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(24)));
        let mut view = view(&api, &notifier);
        view.load().await;
        view.go_to_page(2).await.unwrap();

        view.apply_filters(Some(TransactionStatus::Failed), Some(date("2025-01-01")), None)
            .await
            .unwrap();

        let (_, query) = api.transaction_queries().pop().unwrap();
        assert_eq!(query.page(), 0);
        assert_eq!(query.filters().status(), Some(TransactionStatus::Failed));
        assert_eq!(view.page().total_elements, 6);
    }

    #[tokio::test]
    async fn test_inverted_date_range_is_rejected_before_fetch() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(3)));
        let mut view = view(&api, &notifier);
        view.load().await;

        let result = view
            .apply_filters(None, Some(date("2025-02-01")), Some(date("2025-01-01")))
            .await;

        assert!(matches!(result, Err(QueryError::InvalidDateRange { .. })));
        assert_eq!(api.transaction_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_size_change_resets_page() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(45)));
        let mut view = view(&api, &notifier);
        view.load().await;
        view.go_to_page(4).await.unwrap();

        view.change_page_size(PageSize::Twenty).await;

        assert_eq!(view.query().page(), 0);
        assert_eq!(view.page().total_pages, 3);
        assert_eq!(view.page().summary(), "Showing 1 to 20 of 45 results");
    }

    #[tokio::test]
    async fn test_clear_filters_returns_to_defaults() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(rows(8)));
        let mut view = view(&api, &notifier);
        view.apply_filters(Some(TransactionStatus::Completed), None, None)
            .await
            .unwrap();

        view.clear_filters().await;

        assert!(view.query().filters().is_empty());
        assert_eq!(view.page().total_elements, 8);
    }
}
