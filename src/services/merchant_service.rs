//! Merchant list view: search, tabs, sorting and paging over `GET /merchants`

use std::sync::Arc;

use tracing::debug;

use super::mutation_service::{self, MutationError};
use super::settle_list;
use crate::api::DashboardApi;
use crate::fetch::{FetchCoordinator, FetchOutcome, FetchState, MerchantListLoader};
use crate::models::{MerchantCreatePayload, MerchantDetail, MerchantPage};
use crate::notify::Notifier;
use crate::query::{MerchantQuery, MerchantSortField, MerchantTab, PageSize, QueryError, SearchType};
use crate::utils::page::Page;

pub struct MerchantListView {
    api: Arc<dyn DashboardApi>,
    notifier: Arc<dyn Notifier>,
    coordinator: FetchCoordinator<MerchantListLoader>,
    query: MerchantQuery,
    search_type: SearchType,
    default_size: PageSize,
    page: Page,
}

impl MerchantListView {
    pub fn new(api: Arc<dyn DashboardApi>, notifier: Arc<dyn Notifier>, default_size: PageSize) -> Self {
        Self {
            coordinator: FetchCoordinator::new(MerchantListLoader::new(api.clone())),
            api,
            notifier,
            query: MerchantQuery::new(default_size),
            search_type: SearchType::default(),
            default_size,
            page: Page::new(default_size.get()),
        }
    }

    pub fn query(&self) -> &MerchantQuery {
        &self.query
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn state(&self) -> FetchState<MerchantPage> {
        self.coordinator.state()
    }

    /// Paging metadata from the latest applied response
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Fetch the current query, as when the view is entered
    pub async fn load(&mut self) -> FetchOutcome {
        let outcome = self.coordinator.reload(self.query.clone()).await;
        self.settle(outcome);
        outcome
    }

    pub async fn search(&mut self, search_type: SearchType, text: &str) -> FetchOutcome {
        self.search_type = search_type;
        self.apply(self.query.with_search(search_type, text)).await
    }

    pub async fn switch_tab(&mut self, tab: MerchantTab) -> FetchOutcome {
        self.apply(self.query.with_tab(tab)).await
    }

    pub async fn toggle_sort(&mut self, field: MerchantSortField) -> FetchOutcome {
        self.apply(self.query.toggle_sort(field)).await
    }

    /// Jump to a 1-indexed page as shown in the pagination control
    pub async fn go_to_page(&mut self, display_page: u32) -> Result<FetchOutcome, QueryError> {
        let index = self.page.index_for_display(display_page)?;
        Ok(self.apply(self.query.with_page(index)).await)
    }

    /// `None` when already on the last page
    pub async fn next_page(&mut self) -> Option<FetchOutcome> {
        let index = self.page.next()?;
        Some(self.apply(self.query.with_page(index)).await)
    }

    /// `None` when already on the first page
    pub async fn previous_page(&mut self) -> Option<FetchOutcome> {
        let index = self.page.previous()?;
        Some(self.apply(self.query.with_page(index)).await)
    }

    pub async fn change_page_size(&mut self, size: PageSize) -> FetchOutcome {
        self.apply(self.query.with_size(size)).await
    }

    /// Clear search, sort and tab back to the defaults
    pub async fn reset(&mut self) -> FetchOutcome {
        self.search_type = SearchType::default();
        self.apply(self.query.cleared(self.default_size)).await
    }

    /// Re-issue the current query
    pub async fn refetch(&mut self) -> FetchOutcome {
        let outcome = self.coordinator.refetch().await;
        self.settle(outcome);
        outcome
    }

    /// Submit the add-merchant form, refreshing the list when it succeeds
    pub async fn create_merchant(
        &mut self,
        payload: &MerchantCreatePayload,
    ) -> Result<Option<MerchantDetail>, MutationError> {
        let created =
            mutation_service::create_merchant(self.api.as_ref(), self.notifier.as_ref(), payload)
                .await?;
        self.load().await;
        Ok(created)
    }

    async fn apply(&mut self, query: MerchantQuery) -> FetchOutcome {
        debug!("Merchant query: {:?}", query.to_params());
        self.query = query.clone();
        let outcome = self.coordinator.set_key(query).await;
        self.settle(outcome);
        outcome
    }

    fn settle(&mut self, outcome: FetchOutcome) {
        let state = self.coordinator.state();
        settle_list(outcome, &state, &mut self.page, self.notifier.as_ref());
    }
}
