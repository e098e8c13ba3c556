use crate::models::PaginationEnvelope;
use crate::query::QueryError;

/// Most numbered buttons shown by the pagination control
const MAX_PAGES_TO_SHOW: u32 = 5;

/// One slot of the pagination control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// 1-indexed page number
    Page(u32),
    Ellipsis,
}

/// Displayed pagination metadata.
///
/// Only ever updated from a server envelope; the client never predicts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Zero-indexed
    pub current_page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Page {
    /// Metadata shown before the first response arrives
    pub fn new(size: u32) -> Self {
        Page {
            current_page: 0,
            size,
            total_pages: 1,
            total_elements: 0,
        }
    }

    /// Copy paging fields from the server, even where they differ from what was asked
    pub fn reconcile(&mut self, envelope: &PaginationEnvelope) {
        self.current_page = envelope.page;
        self.size = envelope.size;
        self.total_pages = envelope.total_pages;
        self.total_elements = envelope.total_elements;
    }

    /// 1-indexed page number for display
    pub fn display_page(&self) -> u32 {
        self.current_page + 1
    }

    /// Convert a 1-indexed page typed by the user into a page index
    pub fn index_for_display(&self, display: u32) -> Result<u32, QueryError> {
        if display == 0 || display > self.total_pages.max(1) {
            return Err(QueryError::InvalidPage(display));
        }
        Ok(display - 1)
    }

    /// Check if on first page
    pub fn is_first(&self) -> bool {
        self.current_page == 0
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        self.current_page + 1 >= self.total_pages
    }

    /// Index of the next page, if there is one
    pub fn next(&self) -> Option<u32> {
        (!self.is_last()).then(|| self.current_page + 1)
    }

    /// Index of the previous page, if there is one
    pub fn previous(&self) -> Option<u32> {
        (!self.is_first()).then(|| self.current_page - 1)
    }

    /// 1-indexed position of the first row on this page, 0 when empty
    pub fn start_item(&self) -> u64 {
        if self.total_elements == 0 {
            0
        } else {
            u64::from(self.current_page) * u64::from(self.size) + 1
        }
    }

    /// 1-indexed position of the last row on this page
    pub fn end_item(&self) -> u64 {
        ((u64::from(self.current_page) + 1) * u64::from(self.size)).min(self.total_elements)
    }

    /// Page buttons to show: first and last always, up to three around the current page
    pub fn window(&self) -> Vec<PageMarker> {
        let total = self.total_pages;
        if total <= MAX_PAGES_TO_SHOW {
            return (1..=total).map(PageMarker::Page).collect();
        }

        let current = self.display_page();
        let mut start = current.saturating_sub(1).max(2);
        let mut end = (current + 1).min(total - 1);
        if current <= 3 {
            end = 4;
        }
        if current >= total - 2 {
            start = total - 3;
        }

        let mut pages = vec![PageMarker::Page(1)];
        if start > 2 {
            pages.push(PageMarker::Ellipsis);
        }
        pages.extend((start..=end).map(PageMarker::Page));
        if end < total - 1 {
            pages.push(PageMarker::Ellipsis);
        }
        pages.push(PageMarker::Page(total));
        pages
    }

    /// "Showing 21 to 25 of 25 results"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} results",
            self.start_item(),
            self.end_item(),
            self.total_elements
        )
    }

    /// Text pagination control, e.g. `‹ 1 … 10 [11] 12 … 20 ›`
    pub fn render_controls(&self) -> String {
        if self.total_pages <= 1 {
            return String::new();
        }
        let mut parts = Vec::new();
        parts.push(if self.is_first() { " " } else { "‹" }.to_string());
        for marker in self.window() {
            parts.push(match marker {
                PageMarker::Page(n) if n == self.display_page() => format!("[{}]", n),
                PageMarker::Page(n) => n.to_string(),
                PageMarker::Ellipsis => "…".to_string(),
            });
        }
        parts.push(if self.is_last() { " " } else { "›" }.to_string());
        parts.join(" ").trim().to_string()
    }
}
