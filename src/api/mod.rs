pub mod client;
pub mod models;

use async_trait::async_trait;

pub use client::DashboardClient;
pub use models::{ApiEnvelope, ApiError};

use crate::models::{
    MerchantCreatePayload, MerchantDetail, MerchantPage, MerchantUpdatePayload, TransactionPage,
    TransactionReports,
};
use crate::query::{MerchantQuery, TransactionQuery};

/// Operations the dashboard performs against the merchant API.
///
/// Views hold this as `Arc<dyn DashboardApi>` so tests can swap in fakes.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_merchants(&self, query: &MerchantQuery) -> Result<MerchantPage, ApiError>;

    async fn get_merchant(&self, merchant_id: &str) -> Result<MerchantDetail, ApiError>;

    async fn create_merchant(
        &self,
        payload: &MerchantCreatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError>;

    async fn update_merchant(
        &self,
        merchant_id: &str,
        payload: &MerchantUpdatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError>;

    async fn list_transactions(
        &self,
        merchant_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ApiError>;

    /// Single oversized page, used for exports
    async fn all_transactions(&self, merchant_id: &str, limit: u32)
        -> Result<TransactionPage, ApiError>;

    async fn transaction_reports(&self) -> Result<TransactionReports, ApiError>;
}
