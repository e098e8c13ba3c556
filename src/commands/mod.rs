pub mod help;
pub mod merchants;
pub mod reports;
pub mod transactions;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::DashboardApi;
use crate::config::Config;
use crate::fetch::FetchState;
use crate::notify::Notifier;
use crate::query::PageSize;
use crate::services::{MerchantDetailView, MerchantListView, ReportsView, TransactionListView};

/// What the console should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

/// View that `page`, `next`, `prev`, `size` and `refresh` act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Merchants,
    MerchantDetail,
    Transactions,
    Reports,
}

pub struct Dashboard {
    pub merchants: MerchantListView,
    pub detail: MerchantDetailView,
    pub transactions: TransactionListView,
    pub reports: ReportsView,
    pub active: ActiveView,
    pub export_dir: PathBuf,
}

impl Dashboard {
    pub fn new(api: Arc<dyn DashboardApi>, notifier: Arc<dyn Notifier>, config: &Config) -> Self {
        Self {
            merchants: MerchantListView::new(api.clone(), notifier.clone(), config.page_size),
            detail: MerchantDetailView::new(api.clone(), notifier.clone()),
            transactions: TransactionListView::new(
                api.clone(),
                notifier.clone(),
                &config.default_merchant_id,
                config.page_size,
            ),
            reports: ReportsView::new(api, notifier),
            active: ActiveView::Merchants,
            export_dir: config.export_dir.clone(),
        }
    }
}

pub async fn handle_line(dashboard: &mut Dashboard, line: &str) -> Result<Reply, String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Reply::Output(String::new()));
    }

    let command = parts[0].to_lowercase();
    let args = &parts[1..];
    debug!("Command: {} {:?}", command, args);

    let output = match command.as_str() {
        "merchants" | "m" => merchants::list(dashboard).await,
        "search" => merchants::search(dashboard, args).await,
        "tab" => merchants::tab(dashboard, args).await,
        "sort" => merchants::sort(dashboard, args).await,
        "reset" => merchants::reset(dashboard).await,
        "create" | "add" => merchants::create(dashboard, args).await,
        "merchant" | "show" => merchants::detail(dashboard, args).await,
        "edit" => merchants::edit(dashboard, args).await,
        "toggle" => merchants::toggle(dashboard, args).await,
        "tx" | "transactions" => transactions::show(dashboard, args).await,
        "filter" => transactions::filter(dashboard, args).await,
        "clear" => transactions::clear(dashboard).await,
        "export" => transactions::export(dashboard).await,
        "reports" | "r" => reports::show(dashboard).await,
        "page" | "p" => page(dashboard, args).await,
        "next" | "n" => step(dashboard, true).await,
        "prev" | "previous" => step(dashboard, false).await,
        "size" => size(dashboard, args).await,
        "refresh" => refresh(dashboard).await,
        "help" | "h" | "?" => Ok(help::text()),
        "quit" | "exit" | "q" => return Ok(Reply::Quit),
        other => Err(format!(
            "Unknown command '{}'. Type `help` to see available commands",
            other
        )),
    };

    if let Err(e) = &output {
        warn!("Command {} failed: {}", command, e);
    }
    output.map(Reply::Output)
}

/// Render the view that navigation commands currently target
pub fn render_active(dashboard: &Dashboard) -> String {
    match dashboard.active {
        ActiveView::Merchants => merchants::render_list(&dashboard.merchants),
        ActiveView::MerchantDetail => merchants::render_detail(&dashboard.detail),
        ActiveView::Transactions => transactions::render(&dashboard.transactions),
        ActiveView::Reports => reports::render(&dashboard.reports.state()),
    }
}

async fn page(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let display = args
        .first()
        .ok_or("Usage: `page <number>`".to_string())?
        .parse::<u32>()
        .map_err(|_| "Invalid page number. Use: `page 2`".to_string())?;

    let result = match dashboard.active {
        ActiveView::Merchants => dashboard.merchants.go_to_page(display).await,
        ActiveView::Transactions => dashboard.transactions.go_to_page(display).await,
        _ => return Err("Paging only applies to the merchant and transaction lists".to_string()),
    };
    result.map_err(|e| e.to_string())?;
    Ok(render_active(dashboard))
}

async fn step(dashboard: &mut Dashboard, forward: bool) -> Result<String, String> {
    let moved = match (dashboard.active, forward) {
        (ActiveView::Merchants, true) => dashboard.merchants.next_page().await,
        (ActiveView::Merchants, false) => dashboard.merchants.previous_page().await,
        (ActiveView::Transactions, true) => dashboard.transactions.next_page().await,
        (ActiveView::Transactions, false) => dashboard.transactions.previous_page().await,
        _ => return Err("Paging only applies to the merchant and transaction lists".to_string()),
    };
    if moved.is_none() {
        let edge = if forward { "last" } else { "first" };
        return Err(format!("Already on the {} page", edge));
    }
    Ok(render_active(dashboard))
}

async fn size(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let raw = args
        .first()
        .ok_or("Usage: `size <10|20|50|100>`".to_string())?
        .parse::<u32>()
        .map_err(|_| "Page size must be a number".to_string())?;
    let size = PageSize::try_from(raw).map_err(|e| e.to_string())?;

    match dashboard.active {
        ActiveView::Merchants => dashboard.merchants.change_page_size(size).await,
        ActiveView::Transactions => dashboard.transactions.change_page_size(size).await,
        _ => return Err("Page size only applies to the merchant and transaction lists".to_string()),
    };
    Ok(render_active(dashboard))
}

async fn refresh(dashboard: &mut Dashboard) -> Result<String, String> {
    match dashboard.active {
        ActiveView::Merchants => dashboard.merchants.refetch().await,
        ActiveView::MerchantDetail => dashboard.detail.refetch().await,
        ActiveView::Transactions => dashboard.transactions.refetch().await,
        ActiveView::Reports => dashboard.reports.refetch().await,
    };
    Ok(render_active(dashboard))
}

/// Split `key=value` arguments. Bare words extend the previous value, so
/// `merchantName=Bean There` keeps its space.
pub(crate) fn parse_fields(args: &[&str]) -> Result<Vec<(String, String)>, String> {
    let mut fields: Vec<(String, String)> = Vec::new();
    for arg in args {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                fields.push((key.to_string(), value.to_string()));
            }
            _ => match fields.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(arg);
                }
                None => return Err(format!("Expected key=value, got '{}'", arg)),
            },
        }
    }
    Ok(fields)
}

/// Shared rendering of a view that has not produced data
pub(crate) fn render_pending<T>(state: &FetchState<T>, what: &str) -> Option<String> {
    match state {
        FetchState::Idle => Some(format!("No {} loaded yet", what)),
        FetchState::Loading => Some(format!("Loading {}...", what)),
        FetchState::Failed(err) => Some(format!("❌ Failed to load {}: {}", what, err.notification())),
        FetchState::Ready(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, merchant, transaction, FakeApi};
    use crate::models::TransactionStatus;

    fn config() -> Config {
        Config::from_lookup(|_| None).unwrap()
    }

    fn dashboard() -> (Arc<FakeApi>, Dashboard) {
        let mut api = FakeApi::with_merchants(
            (1..=15)
                .map(|i| merchant(&format!("MCH-{:05}", i), &format!("Shop {}", i), i % 5 != 0))
                .collect(),
        );
        api.transactions = std::sync::Mutex::new(
            (1..=3)
                .map(|i| transaction(i, TransactionStatus::Completed, 25.0))
                .collect(),
        );
        let (api, notifier) = fixtures(api);
        let dashboard = Dashboard::new(api.clone(), notifier, &config());
        (api, dashboard)
    }

    fn output(reply: Reply) -> String {
        match reply {
            Reply::Output(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_parse_fields_joins_bare_words() {
        let fields = parse_fields(&["merchantName=Bean", "There", "email=a@b.co"]).unwrap();
        assert_eq!(
            fields,
            vec![
                ("merchantName".to_string(), "Bean There".to_string()),
                ("email".to_string(), "a@b.co".to_string()),
            ]
        );
        assert!(parse_fields(&["oops"]).is_err());
    }

    #[tokio::test]
    async fn test_unknown_command_and_quit() {
        let (_, mut dashboard) = dashboard();
        assert!(handle_line(&mut dashboard, "launch").await.is_err());
        assert_eq!(handle_line(&mut dashboard, "quit").await, Ok(Reply::Quit));
        assert_eq!(handle_line(&mut dashboard, "   ").await, Ok(Reply::Output(String::new())));
    }

    #[tokio::test]
    async fn test_navigation_targets_active_view() {
        let (api, mut dashboard) = dashboard();
        output(handle_line(&mut dashboard, "merchants").await.unwrap());
        let text = output(handle_line(&mut dashboard, "next").await.unwrap());

        assert!(text.contains("Showing 11 to 12 of 12 results"));
        assert_eq!(api.merchant_queries().last().unwrap().page(), 1);
        assert!(handle_line(&mut dashboard, "next").await.is_err());

        output(handle_line(&mut dashboard, "tx").await.unwrap());
        handle_line(&mut dashboard, "size 20").await.unwrap();
        assert_eq!(api.transaction_queries().last().unwrap().1.size(), PageSize::Twenty);
        assert_eq!(api.merchant_queries().last().unwrap().size(), PageSize::Ten);
    }

    #[tokio::test]
    async fn test_invalid_page_size_is_rejected() {
        let (api, mut dashboard) = dashboard();
        handle_line(&mut dashboard, "merchants").await.unwrap();

        let err = handle_line(&mut dashboard, "size 25").await.unwrap_err();
        assert!(err.contains("25"));
        assert_eq!(api.merchant_queries().len(), 1);
    }
}
