//! Loaders binding each view's key to its API call

use std::sync::Arc;

use async_trait::async_trait;

use super::Loader;
use crate::api::{ApiError, DashboardApi};
use crate::models::{MerchantDetail, MerchantPage, TransactionPage, TransactionReports};
use crate::query::{MerchantQuery, TransactionKey};

pub struct MerchantListLoader {
    api: Arc<dyn DashboardApi>,
}

impl MerchantListLoader {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Loader for MerchantListLoader {
    type Key = MerchantQuery;
    type Output = MerchantPage;

    async fn load(&self, key: &MerchantQuery) -> Result<MerchantPage, ApiError> {
        self.api.list_merchants(key).await
    }
}

pub struct TransactionListLoader {
    api: Arc<dyn DashboardApi>,
}

impl TransactionListLoader {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Loader for TransactionListLoader {
    type Key = TransactionKey;
    type Output = TransactionPage;

    async fn load(&self, key: &TransactionKey) -> Result<TransactionPage, ApiError> {
        self.api.list_transactions(&key.merchant_id, &key.query).await
    }
}

pub struct MerchantDetailLoader {
    api: Arc<dyn DashboardApi>,
}

impl MerchantDetailLoader {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Loader for MerchantDetailLoader {
    type Key = String;
    type Output = MerchantDetail;

    async fn load(&self, merchant_id: &String) -> Result<MerchantDetail, ApiError> {
        self.api.get_merchant(merchant_id).await
    }
}

/// Reports take no parameters; the key is unit so only `refetch` re-requests them.
pub struct ReportsLoader {
    api: Arc<dyn DashboardApi>,
}

impl ReportsLoader {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Loader for ReportsLoader {
    type Key = ();
    type Output = TransactionReports;

    async fn load(&self, _key: &()) -> Result<TransactionReports, ApiError> {
        self.api.transaction_reports().await
    }
}
