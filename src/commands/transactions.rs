use chrono::Local;

use super::{parse_fields, render_pending, ActiveView, Dashboard};
use crate::models::TransactionStatus;
use crate::query::parse_date;
use crate::services::TransactionListView;
use crate::utils::table::Table;

/// `tx` shows the current merchant; `tx <id>` switches merchant
pub async fn show(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    dashboard.active = ActiveView::Transactions;
    match args.first() {
        Some(merchant_id) => {
            if dashboard.transactions.search_merchant(merchant_id).await.is_none() {
                return Err("Please enter a Merchant ID".to_string());
            }
        }
        None => {
            dashboard.transactions.load().await;
        }
    }
    Ok(render(&dashboard.transactions))
}

pub async fn filter(dashboard: &mut Dashboard, args: &[&str]) -> Result<String, String> {
    let mut status = None;
    let mut start_date = None;
    let mut end_date = None;
    for (key, value) in parse_fields(args)? {
        match key.to_lowercase().as_str() {
            "status" if value.eq_ignore_ascii_case("all") => status = None,
            "status" => status = Some(value.parse::<TransactionStatus>()?),
            "from" | "start" => start_date = Some(parse_date(&value).map_err(|e| e.to_string())?),
            "to" | "end" => end_date = Some(parse_date(&value).map_err(|e| e.to_string())?),
            other => {
                return Err(format!(
                    "Unknown filter '{}'. Use: `filter [status=..] [from=YYYY-MM-DD] [to=YYYY-MM-DD]`",
                    other
                ))
            }
        }
    }

    dashboard.active = ActiveView::Transactions;
    dashboard
        .transactions
        .apply_filters(status, start_date, end_date)
        .await
        .map_err(|e| e.to_string())?;
    Ok(render(&dashboard.transactions))
}

pub async fn clear(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.active = ActiveView::Transactions;
    dashboard.transactions.clear_filters().await;
    Ok(render(&dashboard.transactions))
}

pub async fn export(dashboard: &mut Dashboard) -> Result<String, String> {
    let today = Local::now().date_naive();
    let path = dashboard
        .transactions
        .export(&dashboard.export_dir, today)
        .await
        .map_err(|_| "Export failed".to_string())?;
    Ok(match path {
        Some(path) => format!("Saved {}", path.display()),
        None => String::new(),
    })
}

pub fn render(view: &TransactionListView) -> String {
    let state = view.state();
    let mut out = format!("💳 Transactions for {}\n", view.merchant_id());

    let filters = view.query().filters();
    if !filters.is_empty() {
        let mut parts = Vec::new();
        if let Some(status) = filters.status() {
            parts.push(format!("status={}", status));
        }
        if let Some(start) = filters.start_date() {
            parts.push(format!("from={}", start));
        }
        if let Some(end) = filters.end_date() {
            parts.push(format!("to={}", end));
        }
        out.push_str(&format!("Filters: {}\n", parts.join(" ")));
    }

    if let Some(pending) = render_pending(&state, "transactions") {
        out.push_str(&pending);
        return out;
    }
    let Some(page) = state.data() else {
        return out;
    };

    let summary = &page.summary;
    let currency = summary.currency.as_deref().unwrap_or("");
    out.push_str(&format!(
        "Total: {} transactions, {:.2} {}\n",
        summary.total_transactions, summary.total_amount, currency
    ));
    let counts: Vec<String> = TransactionStatus::ALL
        .iter()
        .map(|s| format!("{} {}", s, summary.count_for(*s)))
        .collect();
    out.push_str(&format!("By status: {}\n\n", counts.join(" | ")));

    if page.transactions.is_empty() {
        out.push_str("No transactions found");
        return out;
    }

    let mut table = Table::new(&["Txn ID", "Date", "Amount", "Status", "Card", "Acquirer", "Issuer"])
        .align_right(&[2]);
    for txn in &page.transactions {
        let card = match (&txn.card_type, &txn.card_last4) {
            (Some(kind), Some(last4)) => format!("{} ****{}", kind, last4),
            (Some(kind), None) => kind.clone(),
            _ => "-".to_string(),
        };
        table.add_row(&[
            txn.txn_id.to_string(),
            txn.txn_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            format!("{:.2} {}", txn.amount, txn.currency),
            txn.status.as_str().to_uppercase(),
            card,
            txn.acquirer.clone().unwrap_or_else(|| "-".to_string()),
            txn.issuer.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&table.render());
    out.push_str(&view.page().summary());
    let controls = view.page().render_controls();
    if !controls.is_empty() {
        out.push('\n');
        out.push_str(&controls);
    }
    out
}
