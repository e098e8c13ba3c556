//! CSV export of a merchant's transactions

use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::api::{ApiError, DashboardApi};
use crate::models::Transaction;
use crate::notify::Notifier;

/// Rows requested for one export
pub const EXPORT_LIMIT: u32 = 10_000;

const HEADERS: [&str; 10] = [
    "Transaction ID",
    "Transaction Date",
    "Amount",
    "Currency",
    "Status",
    "Card Type",
    "Card Last 4",
    "Acquirer",
    "Issuer",
    "Timestamp",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write export file: {0}")]
    Io(#[from] io::Error),

    #[error("Export task panicked: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub fn export_file_name(merchant_id: &str, date: NaiveDate) -> String {
    format!("transactions_{}_{}.csv", merchant_id, date.format("%Y-%m-%d"))
}

/// Write `transactions` as CSV, header row first
pub fn write_transactions<W: io::Write>(writer: W, transactions: &[Transaction]) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HEADERS)?;
    for txn in transactions {
        csv.write_record(&[
            txn.txn_id.to_string(),
            txn.txn_date.map(|d| d.to_string()).unwrap_or_default(),
            format!("{:.2}", txn.amount),
            txn.currency.clone(),
            txn.status.as_str().to_uppercase(),
            txn.card_type.clone().unwrap_or_default(),
            txn.card_last4.clone().unwrap_or_default(),
            txn.acquirer.clone().unwrap_or_default(),
            txn.issuer.clone().unwrap_or_default(),
            txn.timestamp.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Fetch up to [`EXPORT_LIMIT`] transactions and save them under `dir`.
///
/// Returns `Ok(None)` when there is nothing to export.
pub async fn export_transactions(
    api: &dyn DashboardApi,
    notifier: &dyn Notifier,
    merchant_id: &str,
    dir: &Path,
    today: NaiveDate,
) -> Result<Option<PathBuf>, ExportError> {
    let page = match api.all_transactions(merchant_id, EXPORT_LIMIT).await {
        Ok(page) => page,
        Err(err) => {
            notifier.error(&err.notification());
            return Err(err.into());
        }
    };

    if page.transactions.is_empty() {
        notifier.warning("No transactions to export");
        return Ok(None);
    }

    let count = page.transactions.len();
    let path = dir.join(export_file_name(merchant_id, today));
    if let Err(err) = save(path.clone(), page.transactions).await {
        notifier.error(&format!("Failed to export transactions: {}", err));
        return Err(err);
    }

    info!("Exported {} transactions for {} to {}", count, merchant_id, path.display());
    notifier.success(&format!("Exported {} transactions", count));
    Ok(Some(path))
}

/// Create the file and write the rows on a blocking thread
async fn save(path: PathBuf, transactions: Vec<Transaction>) -> Result<(), ExportError> {
    tokio::task::spawn_blocking(move || {
        let file = std::fs::File::create(&path)?;
        write_transactions(file, &transactions)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionStatus;
    use crate::testing::{fixtures, transaction, FakeApi, Notice};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn test_file_name_includes_merchant_and_date() {
        assert_eq!(
            export_file_name("MCH-00001", today()),
            "transactions_MCH-00001_2025-01-31.csv"
        );
    }

    #[test]
    fn test_rows_follow_header_order() {
        let mut buf = Vec::new();
        write_transactions(&mut buf, &[transaction(12345, TransactionStatus::Completed, 150.5)]).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Transaction ID,Transaction Date,Amount,Currency,Status,Card Type,Card Last 4,Acquirer,Issuer,Timestamp"
        );
        assert_eq!(
            lines[1],
            "12345,2025-01-16,150.50,USD,COMPLETED,VISA,1234,Global Bank,Visa Inc,"
        );
    }

    #[tokio::test]
    async fn test_empty_export_warns_and_writes_nothing() {
        let (api, notifier) = fixtures(FakeApi::default());
        let dir = std::env::temp_dir();

        let result = export_transactions(api.as_ref(), notifier.as_ref(), "MCH-00001", &dir, today())
            .await
            .unwrap();

        assert_eq!(result, None);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Warning("No transactions to export".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_notified() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(vec![transaction(
            1,
            TransactionStatus::Completed,
            10.0,
        )]));
        let dir = std::env::temp_dir()
            .join(format!("dashboard-missing-{}", std::process::id()))
            .join("nested");

        let result = export_transactions(api.as_ref(), notifier.as_ref(), "MCH-00001", &dir, today()).await;

        assert!(matches!(result, Err(ExportError::Io(_))));
        assert_eq!(notifier.errors().len(), 1);
        assert!(notifier.errors()[0].starts_with("Failed to export transactions:"));
    }

    #[tokio::test]
    async fn test_export_requests_one_large_page() {
        let (api, notifier) = fixtures(FakeApi::with_transactions(vec![
            transaction(1, TransactionStatus::Completed, 10.0),
            transaction(2, TransactionStatus::Failed, 20.0),
        ]));
        let dir = std::env::temp_dir().join(format!("dashboard-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let path = export_transactions(api.as_ref(), notifier.as_ref(), "MCH-00001", &dir, today())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            api.export_requests.lock().unwrap().clone(),
            vec![("MCH-00001".to_string(), EXPORT_LIMIT)]
        );
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 3);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
