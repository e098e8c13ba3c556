//! Transaction models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::pagination::{Paginated, PaginationEnvelope};

/// Transaction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[serde(alias = "COMPLETED")]
    Completed,
    #[serde(alias = "PENDING")]
    Pending,
    #[serde(alias = "FAILED")]
    Failed,
    #[serde(alias = "REVERSED")]
    Reversed,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Completed,
        TransactionStatus::Pending,
        TransactionStatus::Failed,
        TransactionStatus::Reversed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Reversed => "reversed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown status '{}'. Use completed, pending, failed or reversed", s)
            })
    }
}

/// Fee, tax or adjustment line attached to a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub detail_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub txn_id: i64,
    #[serde(default)]
    pub merchant_id: Option<String>,
    #[serde(default)]
    pub txn_date: Option<NaiveDate>,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub card_type: Option<String>,
    #[serde(default)]
    pub card_last4: Option<String>,
    #[serde(default)]
    pub acquirer: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default, alias = "localTxnDateTime")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: Vec<TransactionDetail>,
}

/// Aggregate figures for the current filter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub total_transactions: u64,
    pub total_amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
}

impl TransactionSummary {
    /// Count for `status`; keys are matched without regard to case
    pub fn count_for(&self, status: TransactionStatus) -> u64 {
        self.by_status
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(status.as_str()))
            .map(|(_, count)| *count)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// `data` section of `GET /transactions/{merchantId}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub merchant_id: String,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub summary: TransactionSummary,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub pagination: PaginationEnvelope,
}

impl Paginated for TransactionPage {
    fn pagination(&self) -> &PaginationEnvelope {
        &self.pagination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_ignore_key_case() {
        let summary: TransactionSummary = serde_json::from_str(
            r#"{"totalTransactions": 5, "totalAmount": 90.0, "byStatus": {"COMPLETED": 3, "Failed": 2}}"#,
        )
        .unwrap();

        assert_eq!(summary.count_for(TransactionStatus::Completed), 3);
        assert_eq!(summary.count_for(TransactionStatus::Failed), 2);
        assert_eq!(summary.count_for(TransactionStatus::Pending), 0);
    }

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("Completed".parse::<TransactionStatus>(), Ok(TransactionStatus::Completed));
        assert_eq!(" reversed ".parse::<TransactionStatus>(), Ok(TransactionStatus::Reversed));
        assert!("approved".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_transaction_page_parses_wire_shape() {
        let raw = r#"{
            "merchantId": "MCH-00001",
            "dateRange": { "start": "2025-01-01", "end": "2025-01-31" },
            "summary": {
                "totalTransactions": 2,
                "totalAmount": 300.5,
                "currency": "USD",
                "byStatus": { "completed": 1, "failed": 1 }
            },
            "transactions": [{
                "txnId": 12345,
                "amount": 150.5,
                "currency": "USD",
                "status": "completed",
                "cardType": "VISA",
                "cardLast4": "1234",
                "timestamp": "2025-01-16T10:30:00Z",
                "details": [{ "detailId": 1, "type": "fee", "amount": 3.5, "description": "Processing fee" }]
            }],
            "pagination": { "page": 0, "size": 10, "totalPages": 1, "totalElements": 2 }
        }"#;

        let page: TransactionPage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.transactions[0].status, TransactionStatus::Completed);
        assert_eq!(page.transactions[0].details[0].kind, "fee");
        assert_eq!(page.summary.count_for(TransactionStatus::Failed), 1);
        assert_eq!(page.summary.count_for(TransactionStatus::Pending), 0);
    }
}
