use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::models::{ApiEnvelope, ApiError};
use super::DashboardApi;
use crate::models::{
    MerchantCreatePayload, MerchantDetail, MerchantPage, MerchantUpdatePayload, TransactionPage,
    TransactionReports,
};
use crate::query::{MerchantQuery, TransactionQuery};

/// HTTP client for the merchant REST API
pub struct DashboardClient {
    http_client: HttpClient,
    base_url: Url,
}

impl DashboardClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080/api/v1`)
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .default_headers(Self::create_headers())
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::RequestError(format!("Base URL cannot have a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let body_text = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status.as_u16(), &body_text);
        warn!("[API Response Error] {} {}", status.as_u16(), error);
        error
    }

    /// Send a request and unwrap the standard response envelope
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::RequestError(format!("Invalid request: {}", e)))?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("[API Request] {} {}", method, url);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| {
                warn!("[API Request Error] {} {}: {}", method, url, e);
                ApiError::RequestError(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        debug!("[API Response] {} {}", url.path(), status.as_u16());

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl DashboardApi for DashboardClient {
    /// GET /merchants
    async fn list_merchants(&self, query: &MerchantQuery) -> Result<MerchantPage, ApiError> {
        let url = self.endpoint(&["merchants"])?;
        let request = self.http_client.get(url).query(&query.to_params());
        Ok(self.send::<MerchantPage>(request).await?.data)
    }

    /// GET /merchants/{id}
    async fn get_merchant(&self, merchant_id: &str) -> Result<MerchantDetail, ApiError> {
        let url = self.endpoint(&["merchants", merchant_id])?;
        Ok(self.send::<MerchantDetail>(self.http_client.get(url)).await?.data)
    }

    /// POST /merchants
    async fn create_merchant(
        &self,
        payload: &MerchantCreatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError> {
        let url = self.endpoint(&["merchants"])?;
        self.send(self.http_client.post(url).json(payload)).await
    }

    /// PUT /merchants/{id}
    async fn update_merchant(
        &self,
        merchant_id: &str,
        payload: &MerchantUpdatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError> {
        let url = self.endpoint(&["merchants", merchant_id])?;
        self.send(self.http_client.put(url).json(payload)).await
    }

    /// GET /transactions/{merchantId}
    async fn list_transactions(
        &self,
        merchant_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ApiError> {
        let url = self.endpoint(&["transactions", merchant_id])?;
        let request = self.http_client.get(url).query(&query.to_params());
        Ok(self.send::<TransactionPage>(request).await?.data)
    }

    /// GET /transactions/{merchantId} with an explicit size, bypassing the page-size choices
    async fn all_transactions(
        &self,
        merchant_id: &str,
        limit: u32,
    ) -> Result<TransactionPage, ApiError> {
        let url = self.endpoint(&["transactions", merchant_id])?;
        let params = [("page", "0".to_string()), ("size", limit.to_string())];
        let request = self.http_client.get(url).query(&params);
        Ok(self.send::<TransactionPage>(request).await?.data)
    }

    /// GET /transactions/reports
    async fn transaction_reports(&self) -> Result<TransactionReports, ApiError> {
        let url = self.endpoint(&["transactions", "reports"])?;
        Ok(self.send::<TransactionReports>(self.http_client.get(url)).await?.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DashboardClient {
        DashboardClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client("http://localhost:8080/api/v1");
        let url = client.endpoint(&["merchants", "MCH-00001"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/merchants/MCH-00001");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash_and_encodes() {
        let client = client("http://localhost:8080/api/v1/");
        let url = client.endpoint(&["transactions", "MCH 1/2"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/transactions/MCH%201%2F2");
    }

    #[test]
    fn test_query_params_are_encoded_on_request() {
        let client = client("http://localhost:8080/api/v1");
        let query = MerchantQuery::default()
            .toggle_sort(crate::query::MerchantSortField::MerchantName)
            .with_search(crate::query::SearchType::MerchantName, "Tech & Co");
        let request = client
            .http_client
            .get(client.endpoint(&["merchants"]).unwrap())
            .query(&query.to_params())
            .build()
            .unwrap();

        assert_eq!(
            request.url().query(),
            Some("page=0&size=10&merchantName=Tech+%26+Co&sortBy=merchantName&sortDirection=ASC&isActive=true")
        );
    }
}
