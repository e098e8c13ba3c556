//! Query state value objects.
//!
//! Every mutation returns a new value. Anything other than a page change
//! sends the view back to the first page, since the old page may no longer
//! exist once the result set changes shape.

use std::fmt;

use chrono::NaiveDate;

use super::sort::{MerchantSortField, SortSpec};
use super::{QueryError, DATE_FORMAT};
use crate::models::TransactionStatus;

/// Rows-per-page choices offered by the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Ten, PageSize::Twenty, PageSize::Fifty, PageSize::Hundred];

    pub fn get(&self) -> u32 {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = QueryError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(QueryError::InvalidPageSize(value))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Which merchant field a free-text search targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    MerchantId,
    MerchantName,
}

/// Merchant list tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MerchantTab {
    #[default]
    Active,
    Inactive,
}

impl MerchantTab {
    fn is_active(&self) -> bool {
        matches!(self, MerchantTab::Active)
    }
}

/// Parameters behind `GET /merchants`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantQuery {
    page: u32,
    size: PageSize,
    merchant_id: Option<String>,
    merchant_name: Option<String>,
    sort: SortSpec<MerchantSortField>,
    is_active: Option<bool>,
}

impl Default for MerchantQuery {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

impl MerchantQuery {
    /// First page of active merchants, unsorted
    pub fn new(size: PageSize) -> Self {
        Self {
            page: 0,
            size,
            merchant_id: None,
            merchant_name: None,
            sort: SortSpec::new(),
            is_active: Some(MerchantTab::Active.is_active()),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn merchant_id(&self) -> Option<&str> {
        self.merchant_id.as_deref()
    }

    pub fn merchant_name(&self) -> Option<&str> {
        self.merchant_name.as_deref()
    }

    pub fn sort(&self) -> &SortSpec<MerchantSortField> {
        &self.sort
    }

    pub fn is_active(&self) -> Option<bool> {
        self.is_active
    }

    pub fn tab(&self) -> MerchantTab {
        match self.is_active {
            Some(false) => MerchantTab::Inactive,
            _ => MerchantTab::Active,
        }
    }

    pub fn has_search(&self) -> bool {
        self.merchant_id.is_some() || self.merchant_name.is_some()
    }

    /// The only mutation that keeps the current filters on their page
    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..self.clone() }
    }

    pub fn with_size(&self, size: PageSize) -> Self {
        Self { size, page: 0, ..self.clone() }
    }

    pub fn toggle_sort(&self, field: MerchantSortField) -> Self {
        Self {
            sort: self.sort.toggle(field),
            page: 0,
            ..self.clone()
        }
    }

    /// Apply a search box submission.
    ///
    /// Blank input clears both search filters. Ids are matched uppercased.
    pub fn with_search(&self, search_type: SearchType, text: &str) -> Self {
        let text = text.trim();
        let (merchant_id, merchant_name) = if text.is_empty() {
            (None, None)
        } else {
            match search_type {
                SearchType::MerchantId => (Some(text.to_uppercase()), None),
                SearchType::MerchantName => (None, Some(text.to_string())),
            }
        };
        Self {
            merchant_id,
            merchant_name,
            page: 0,
            ..self.clone()
        }
    }

    pub fn with_tab(&self, tab: MerchantTab) -> Self {
        Self {
            is_active: Some(tab.is_active()),
            page: 0,
            ..self.clone()
        }
    }

    /// Back to the default filters, keeping nothing but the configured default size
    pub fn cleared(&self, default_size: PageSize) -> Self {
        Self::new(default_size)
    }

    /// Query string pairs in request order. Unset filters are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.get().to_string()),
        ];
        if let Some(name) = &self.merchant_name {
            params.push(("merchantName", name.clone()));
        }
        if let Some(id) = &self.merchant_id {
            params.push(("merchantId", id.clone()));
        }
        if let Some((sort_by, sort_direction)) = self.sort.to_params() {
            params.push(("sortBy", sort_by));
            params.push(("sortDirection", sort_direction));
        }
        if let Some(active) = self.is_active {
            params.push(("isActive", active.to_string()));
        }
        params
    }
}

/// Status and date range filters for the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionFilters {
    status: Option<TransactionStatus>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl TransactionFilters {
    pub fn new(
        status: Option<TransactionStatus>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, QueryError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(QueryError::InvalidDateRange { start, end });
            }
        }
        Ok(Self {
            status,
            start_date,
            end_date,
        })
    }

    pub fn status(&self) -> Option<TransactionStatus> {
        self.status
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Parameters behind `GET /transactions/{merchantId}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionQuery {
    page: u32,
    size: PageSize,
    filters: TransactionFilters,
}

impl TransactionQuery {
    pub fn new(size: PageSize) -> Self {
        Self {
            page: 0,
            size,
            filters: TransactionFilters::default(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn filters(&self) -> &TransactionFilters {
        &self.filters
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self { page, ..*self }
    }

    pub fn with_size(&self, size: PageSize) -> Self {
        Self { size, page: 0, ..*self }
    }

    pub fn with_filters(&self, filters: TransactionFilters) -> Self {
        Self { filters, page: 0, ..*self }
    }

    pub fn with_status(&self, status: Option<TransactionStatus>) -> Self {
        self.with_filters(TransactionFilters { status, ..self.filters })
    }

    pub fn with_date_range(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Self, QueryError> {
        let filters = TransactionFilters::new(self.filters.status, start_date, end_date)?;
        Ok(self.with_filters(filters))
    }

    pub fn cleared(&self, default_size: PageSize) -> Self {
        Self::new(default_size)
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.get().to_string()),
        ];
        if let Some(status) = self.filters.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(start) = self.filters.start_date {
            params.push(("startDate", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.filters.end_date {
            params.push(("endDate", end.format(DATE_FORMAT).to_string()));
        }
        params
    }
}

/// A transaction query scoped to one merchant. Changing either part triggers a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionKey {
    pub merchant_id: String,
    pub query: TransactionQuery,
}
