//! Multi-column sort toggling
//!
//! Each column cycles unsorted -> ascending -> descending -> unsorted. Columns
//! keep the position they were first added at, so earlier keys stay primary.

use std::fmt;
use std::str::FromStr;

use super::QueryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// Header indicator for a sorted column
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A column the server knows how to sort by
pub trait SortField: Copy + Eq + fmt::Debug {
    /// Name sent in the `sortBy` parameter
    fn as_str(&self) -> &'static str;
}

/// Sortable merchant list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MerchantSortField {
    MerchantId,
    MerchantName,
    BusinessType,
    CreatedAt,
}

impl MerchantSortField {
    pub const ALL: [MerchantSortField; 4] = [
        MerchantSortField::MerchantId,
        MerchantSortField::MerchantName,
        MerchantSortField::BusinessType,
        MerchantSortField::CreatedAt,
    ];
}

impl SortField for MerchantSortField {
    fn as_str(&self) -> &'static str {
        match self {
            MerchantSortField::MerchantId => "merchantId",
            MerchantSortField::MerchantName => "merchantName",
            MerchantSortField::BusinessType => "businessType",
            MerchantSortField::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for MerchantSortField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| QueryError::UnknownSortField(wanted.to_string()))
    }
}

/// Ordered sort keys. Field and direction are stored as pairs, so the
/// `sortBy` and `sortDirection` lists can never disagree in length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec<F> {
    keys: Vec<(F, SortDirection)>,
}

impl<F> Default for SortSpec<F> {
    fn default() -> Self {
        Self { keys: Vec::new() }
    }
}

impl<F: SortField> SortSpec<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `field` one step through its unsorted/ASC/DESC cycle
    pub fn toggle(&self, field: F) -> Self {
        let mut keys = self.keys.clone();
        match keys.iter().position(|(f, _)| *f == field) {
            None => keys.push((field, SortDirection::Asc)),
            Some(idx) => match keys[idx].1 {
                SortDirection::Asc => keys[idx].1 = SortDirection::Desc,
                SortDirection::Desc => {
                    keys.remove(idx);
                }
            },
        }
        Self { keys }
    }

    pub fn direction_of(&self, field: F) -> Option<SortDirection> {
        self.keys
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, dir)| *dir)
    }

    /// Comma-joined `(sortBy, sortDirection)`, or `None` when nothing is sorted
    pub fn to_params(&self) -> Option<(String, String)> {
        if self.keys.is_empty() {
            return None;
        }
        let fields: Vec<&str> = self.keys.iter().map(|(f, _)| f.as_str()).collect();
        let dirs: Vec<&str> = self.keys.iter().map(|(_, d)| d.as_str()).collect();
        Some((fields.join(","), dirs.join(",")))
    }
}
