use super::{render_pending, ActiveView, Dashboard};
use crate::fetch::FetchState;
use crate::models::TransactionReports;
use crate::utils::table::Table;

/// Daily rows shown before the volume table is cut off
const MAX_DAILY_ROWS: usize = 14;

pub async fn show(dashboard: &mut Dashboard) -> Result<String, String> {
    dashboard.active = ActiveView::Reports;
    dashboard.reports.load().await;
    Ok(render(&dashboard.reports.state()))
}

pub fn render(state: &FetchState<TransactionReports>) -> String {
    if let Some(pending) = render_pending(state, "reports") {
        return pending;
    }
    let Some(reports) = state.data() else {
        return String::new();
    };

    let mut out = String::from("📊 Transaction reports\n");
    let period = &reports.report_period;
    if let (Some(start), Some(end)) = (&period.start, &period.end) {
        out.push_str(&format!("Period: {} to {}\n", start, end));
    }

    let rate = &reports.success_rate_metrics;
    out.push_str(&format!(
        "\nSuccess rate: {:.1}% ({} of {} completed, {} failed, failure rate {:.1}%)\n",
        rate.success_rate, rate.completed, rate.total_transactions, rate.failed, rate.failure_rate
    ));

    let stats = &reports.amount_trends.overall;
    out.push_str(&format!(
        "Amounts: average {:.2}, median {:.2}, min {:.2}, max {:.2}\n",
        stats.average, stats.median, stats.min, stats.max
    ));

    if let Some(hour) = reports.peak_hour() {
        out.push_str(&format!("Peak hour: {:02}:00 ({} transactions)\n", hour.hour, hour.count));
    }
    if let Some(day) = reports.busiest_day() {
        out.push_str(&format!("Busiest day: {} ({} transactions)\n", day.day_of_week, day.count));
    }

    let daily = &reports.volume_metrics.daily;
    if !daily.is_empty() {
        out.push_str("\nDaily volume\n");
        let mut table = Table::new(&["Date", "Count", "Amount"]).align_right(&[1, 2]);
        for day in daily.iter().rev().take(MAX_DAILY_ROWS).rev() {
            table.add_row(&[day.date.clone(), day.count.to_string(), format!("{:.2}", day.amount)]);
        }
        out.push_str(&table.render());
    }

    let monthly = &reports.volume_metrics.monthly;
    if !monthly.is_empty() {
        out.push_str("\nMonthly volume\n");
        let mut table = Table::new(&["Month", "Count", "Amount"]).align_right(&[1, 2]);
        for month in monthly {
            table.add_row(&[month.month.clone(), month.count.to_string(), format!("{:.2}", month.amount)]);
        }
        out.push_str(&table.render());
    }

    let cards = reports.card_types_by_count();
    if !cards.is_empty() {
        out.push_str("\nCard types\n");
        let mut table = Table::new(&["Card", "Count", "Share"]).align_right(&[1, 2]);
        for (card, count, pct) in cards {
            table.add_row(&[card.to_string(), count.to_string(), format!("{:.1}%", pct)]);
        }
        out.push_str(&table.render());
    }

    out.trim_end().to_string()
}
