//! Filter, sort and paging state for the list views

pub mod sort;
pub mod state;

use chrono::NaiveDate;
use thiserror::Error;

pub use sort::{MerchantSortField, SortDirection, SortField, SortSpec};
pub use state::{
    MerchantQuery, MerchantTab, PageSize, SearchType, TransactionFilters, TransactionKey,
    TransactionQuery,
};

/// Rejected filter or paging input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Page size {0} is not one of 10, 20, 50 or 100")]
    InvalidPageSize(u32),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Cannot sort by '{0}'")]
    UnknownSortField(String),

    #[error("Page {0} does not exist")]
    InvalidPage(u32),
}

/// Wire format for query dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| QueryError::InvalidDate(raw.trim().to_string()))
}
