//! Data models for the merchant API
//!
//! Wire shapes for merchants, transactions and reports. Field names follow the
//! API's camelCase JSON through serde renames.

pub mod merchant;
pub mod pagination;
pub mod reports;
pub mod transaction;

// Re-export commonly used types for convenience
pub use merchant::{Merchant, MerchantCreatePayload, MerchantDetail, MerchantPage, MerchantUpdatePayload};
pub use pagination::{Paginated, PaginationEnvelope};
pub use reports::TransactionReports;
pub use transaction::{Transaction, TransactionPage, TransactionStatus, TransactionSummary};
