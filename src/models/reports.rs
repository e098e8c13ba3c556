//! Analytics report models for `GET /transactions/reports`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportPeriod {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    pub date: String,
    pub count: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyVolume {
    pub week_start: String,
    pub week_number: u32,
    pub count: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVolume {
    pub month: String,
    pub count: u64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeMetrics {
    #[serde(default)]
    pub daily: Vec<DailyVolume>,
    #[serde(default)]
    pub weekly: Vec<WeeklyVolume>,
    #[serde(default)]
    pub monthly: Vec<MonthlyVolume>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessRateMetrics {
    pub total_transactions: u64,
    pub completed: u64,
    pub failed: u64,
    pub success_rate: f64,
    pub failure_rate: f64,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountStats {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverageAmount {
    pub date: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountTrends {
    #[serde(default)]
    pub overall: AmountStats,
    #[serde(default)]
    pub daily: Vec<DailyAverageAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPeak {
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeekPeak {
    pub day_of_week: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakTimesHeatmap {
    #[serde(default)]
    pub hourly: Vec<HourlyPeak>,
    #[serde(default)]
    pub day_of_week: Vec<DayOfWeekPeak>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTypeDistribution {
    #[serde(default)]
    pub by_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub percentages: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReports {
    #[serde(default)]
    pub report_period: ReportPeriod,
    #[serde(default)]
    pub volume_metrics: VolumeMetrics,
    #[serde(default)]
    pub success_rate_metrics: SuccessRateMetrics,
    #[serde(default)]
    pub amount_trends: AmountTrends,
    #[serde(default)]
    pub peak_times_heatmap: PeakTimesHeatmap,
    #[serde(default)]
    pub card_type_distribution: CardTypeDistribution,
}

impl TransactionReports {
    /// Hour of day with the most transactions. Ties go to the earlier hour.
    pub fn peak_hour(&self) -> Option<&HourlyPeak> {
        self.peak_times_heatmap
            .hourly
            .iter()
            .fold(None, |best: Option<&HourlyPeak>, h| match best {
                Some(b) if b.count >= h.count => Some(b),
                _ => Some(h),
            })
    }

    pub fn busiest_day(&self) -> Option<&DayOfWeekPeak> {
        self.peak_times_heatmap
            .day_of_week
            .iter()
            .fold(None, |best: Option<&DayOfWeekPeak>, d| match best {
                Some(b) if b.count >= d.count => Some(b),
                _ => Some(d),
            })
    }

    /// Card types ordered by transaction count, largest first
    pub fn card_types_by_count(&self) -> Vec<(&str, u64, f64)> {
        let dist = &self.card_type_distribution;
        let mut rows: Vec<(&str, u64, f64)> = dist
            .by_type
            .iter()
            .map(|(card, count)| {
                let pct = dist.percentages.get(card).copied().unwrap_or(0.0);
                (card.as_str(), *count, pct)
            })
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}
