//! Pagination envelope returned by every list endpoint

use serde::{Deserialize, Serialize};

/// Server-side paging metadata. `page` is zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationEnvelope {
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

/// A list response carrying a pagination envelope
pub trait Paginated {
    fn pagination(&self) -> &PaginationEnvelope;
}
