//! In-memory fakes shared by the view and command tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{ApiEnvelope, ApiError, DashboardApi};
use crate::models::{
    Merchant, MerchantCreatePayload, MerchantDetail, MerchantPage, MerchantUpdatePayload,
    PaginationEnvelope, Transaction, TransactionPage, TransactionReports, TransactionStatus,
    TransactionSummary,
};
use crate::notify::Notifier;
use crate::query::{MerchantQuery, TransactionQuery};

pub(crate) fn merchant(id: &str, name: &str, active: bool) -> Merchant {
    Merchant {
        merchant_id: id.to_string(),
        merchant_name: name.to_string(),
        business_name: format!("{} LLC", name),
        email: "contact@example.com".to_string(),
        phone: "9818576955".to_string(),
        business_type: "retail".to_string(),
        tax_id: Some("123456789".to_string()),
        registration_number: Some("REG-2024-001".to_string()),
        is_active: Some(active),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn transaction(id: i64, status: TransactionStatus, amount: f64) -> Transaction {
    Transaction {
        txn_id: id,
        merchant_id: Some("MCH-00001".to_string()),
        txn_date: NaiveDate::from_ymd_opt(2025, 1, 16),
        amount,
        currency: "USD".to_string(),
        status,
        card_type: Some("VISA".to_string()),
        card_last4: Some("1234".to_string()),
        acquirer: Some("Global Bank".to_string()),
        issuer: Some("Visa Inc".to_string()),
        timestamp: None,
        details: Vec::new(),
    }
}

fn paginate<T: Clone>(rows: &[T], page: u32, size: u32) -> (Vec<T>, PaginationEnvelope) {
    let total_elements = rows.len() as u64;
    let total_pages = ((rows.len() as u32) + size - 1) / size;
    // The server clamps out-of-range pages to the last one
    let page = page.min(total_pages.saturating_sub(1));
    let start = (page * size) as usize;
    let slice = rows.iter().skip(start).take(size as usize).cloned().collect();
    (
        slice,
        PaginationEnvelope {
            page,
            size,
            total_pages,
            total_elements,
        },
    )
}

/// A merchant API backed by vectors, recording every request it receives
#[derive(Default)]
pub(crate) struct FakeApi {
    pub merchants: Mutex<Vec<Merchant>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub reports: TransactionReports,
    /// Returned by every call while set
    pub failure: Mutex<Option<ApiError>>,
    /// Create/update answer with `success: false` and this message while set
    pub reject_with: Mutex<Option<String>>,
    pub merchant_queries: Mutex<Vec<MerchantQuery>>,
    pub transaction_queries: Mutex<Vec<(String, TransactionQuery)>>,
    pub detail_requests: Mutex<Vec<String>>,
    pub created: Mutex<Vec<MerchantCreatePayload>>,
    pub updates: Mutex<Vec<(String, MerchantUpdatePayload)>>,
    pub export_requests: Mutex<Vec<(String, u32)>>,
    pub report_requests: Mutex<usize>,
}

impl FakeApi {
    pub fn with_merchants(merchants: Vec<Merchant>) -> Self {
        Self {
            merchants: Mutex::new(merchants),
            ..Self::default()
        }
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Mutex::new(transactions),
            ..Self::default()
        }
    }

    pub fn fail_with(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn reject_mutations(&self, message: &str) {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn merchant_queries(&self) -> Vec<MerchantQuery> {
        self.merchant_queries.lock().unwrap().clone()
    }

    pub fn transaction_queries(&self) -> Vec<(String, TransactionQuery)> {
        self.transaction_queries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), ApiError> {
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn detail_of(merchant: &Merchant) -> MerchantDetail {
        MerchantDetail {
            merchant_id: merchant.merchant_id.clone(),
            merchant_name: merchant.merchant_name.clone(),
            business_name: merchant.business_name.clone(),
            email: merchant.email.clone(),
            phone: merchant.phone.clone(),
            business_type: merchant.business_type.clone(),
            tax_id: merchant.tax_id.clone(),
            registration_number: merchant.registration_number.clone(),
            is_active: merchant.is_active.unwrap_or(true),
            created_at: merchant.created_at,
            updated_at: merchant.updated_at,
        }
    }

    fn rejection<T>(&self) -> Option<ApiEnvelope<Option<T>>> {
        self.reject_with.lock().unwrap().clone().map(|message| ApiEnvelope {
            status: Some(200),
            success: Some(false),
            message: Some(message),
            data: None,
        })
    }

    fn transaction_page(&self, merchant_id: &str, rows: Vec<Transaction>, page: u32, size: u32) -> TransactionPage {
        let summary = TransactionSummary {
            total_transactions: rows.len() as u64,
            total_amount: rows.iter().map(|t| t.amount).sum(),
            currency: Some("USD".to_string()),
            by_status: TransactionStatus::ALL
                .iter()
                .map(|s| {
                    let count = rows.iter().filter(|t| t.status == *s).count() as u64;
                    (s.as_str().to_string(), count)
                })
                .filter(|(_, count)| *count > 0)
                .collect(),
        };
        let (transactions, pagination) = paginate(&rows, page, size);
        TransactionPage {
            merchant_id: merchant_id.to_string(),
            date_range: Default::default(),
            summary,
            transactions,
            pagination,
        }
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn list_merchants(&self, query: &MerchantQuery) -> Result<MerchantPage, ApiError> {
        self.merchant_queries.lock().unwrap().push(query.clone());
        self.check()?;

        let rows: Vec<Merchant> = self
            .merchants
            .lock()
            .unwrap()
            .iter()
            .filter(|m| query.is_active().map_or(true, |a| m.is_active.unwrap_or(true) == a))
            .filter(|m| query.merchant_id().map_or(true, |id| m.merchant_id == id))
            .filter(|m| {
                query
                    .merchant_name()
                    .map_or(true, |name| m.merchant_name.to_lowercase().contains(&name.to_lowercase()))
            })
            .cloned()
            .collect();
        let (merchants, pagination) = paginate(&rows, query.page(), query.size().get());
        Ok(MerchantPage {
            merchants,
            pagination,
        })
    }

    async fn get_merchant(&self, merchant_id: &str) -> Result<MerchantDetail, ApiError> {
        self.detail_requests.lock().unwrap().push(merchant_id.to_string());
        self.check()?;
        self.merchants
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.merchant_id == merchant_id)
            .map(Self::detail_of)
            .ok_or_else(|| ApiError::NotFound(format!("Merchant {} not found", merchant_id)))
    }

    async fn create_merchant(
        &self,
        payload: &MerchantCreatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError> {
        self.created.lock().unwrap().push(payload.clone());
        self.check()?;
        if let Some(rejected) = self.rejection() {
            return Ok(rejected);
        }

        let mut merchants = self.merchants.lock().unwrap();
        let mut created = merchant(
            &format!("MCH-{:05}", merchants.len() + 1),
            &payload.merchant_name,
            true,
        );
        created.business_name = payload.business_name.clone();
        created.email = payload.email.clone();
        created.phone = payload.phone.clone();
        merchants.push(created.clone());

        Ok(ApiEnvelope {
            status: Some(201),
            success: Some(true),
            message: None,
            data: Some(Self::detail_of(&created)),
        })
    }

    async fn update_merchant(
        &self,
        merchant_id: &str,
        payload: &MerchantUpdatePayload,
    ) -> Result<ApiEnvelope<Option<MerchantDetail>>, ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((merchant_id.to_string(), payload.clone()));
        self.check()?;
        if let Some(rejected) = self.rejection() {
            return Ok(rejected);
        }

        let mut merchants = self.merchants.lock().unwrap();
        let target = merchants
            .iter_mut()
            .find(|m| m.merchant_id == merchant_id)
            .ok_or_else(|| ApiError::NotFound(format!("Merchant {} not found", merchant_id)))?;
        if let Some(email) = &payload.email {
            target.email = email.clone();
        }
        if let Some(phone) = &payload.phone {
            target.phone = phone.clone();
        }
        if let Some(active) = payload.is_active {
            target.is_active = Some(active);
        }

        Ok(ApiEnvelope {
            status: Some(200),
            success: Some(true),
            message: Some("Merchant updated".to_string()),
            data: Some(Self::detail_of(target)),
        })
    }

    async fn list_transactions(
        &self,
        merchant_id: &str,
        query: &TransactionQuery,
    ) -> Result<TransactionPage, ApiError> {
        self.transaction_queries
            .lock()
            .unwrap()
            .push((merchant_id.to_string(), *query));
        self.check()?;

        let status = query.filters().status();
        let rows: Vec<Transaction> = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();
        Ok(self.transaction_page(merchant_id, rows, query.page(), query.size().get()))
    }

    async fn all_transactions(
        &self,
        merchant_id: &str,
        limit: u32,
    ) -> Result<TransactionPage, ApiError> {
        self.export_requests
            .lock()
            .unwrap()
            .push((merchant_id.to_string(), limit));
        self.check()?;
        let rows = self.transactions.lock().unwrap().clone();
        Ok(self.transaction_page(merchant_id, rows, 0, limit))
    }

    async fn transaction_reports(&self) -> Result<TransactionReports, ApiError> {
        *self.report_requests.lock().unwrap() += 1;
        self.check()?;
        Ok(self.reports.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

/// Collects notifications instead of printing them
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.notices.lock().unwrap().push(Notice::Error(message.to_string()));
    }
}

/// Shared handles for a view under test
pub(crate) fn fixtures(api: FakeApi) -> (Arc<FakeApi>, Arc<RecordingNotifier>) {
    (Arc::new(api), Arc::new(RecordingNotifier::default()))
}
