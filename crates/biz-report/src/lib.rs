#![deny(warnings)]

//! History reporting: day summaries and chart series built from the day log.
//!
//! Drawing is left to the host. This crate only shapes the numbers: per-day
//! profit, cumulative profit and income/expense on a shared axis.

use biz_core::DayRecord;
use serde::Serialize;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::debug;

/// Message shown when a report is requested before any day was simulated.
pub const NO_DATA_MESSAGE: &str =
    "No data available for analysis. Please simulate at least one work day.";

/// Message shown when the last day is requested before any day was simulated.
pub const NO_DAY_MESSAGE: &str = "No work day has been simulated yet.";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{}", NO_DATA_MESSAGE)]
    NoData,
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Series behind the three history charts. All vectors share the `days` axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartSet {
    pub days: Vec<u32>,
    pub profit: Vec<i64>,
    pub cumulative_profit: Vec<i64>,
    pub income: Vec<i64>,
    pub expense: Vec<i64>,
}

/// Running sum of `values`.
///
/// Example: `[50, 70, -10]` -> `[50, 120, 110]`. Sums saturate at the `i64` bounds.
pub fn cumulative(values: &[i64]) -> Vec<i64> {
    values
        .iter()
        .scan(0i64, |acc, v| {
            *acc = acc.saturating_add(*v);
            Some(*acc)
        })
        .collect()
}

/// Build the chart series. An empty log is [`ReportError::NoData`].
pub fn build_charts(records: &[DayRecord]) -> Result<ChartSet, ReportError> {
    if records.is_empty() {
        return Err(ReportError::NoData);
    }
    let profit: Vec<i64> = records.iter().map(|r| r.profit).collect();
    let charts = ChartSet {
        days: records.iter().map(|r| r.day).collect(),
        cumulative_profit: cumulative(&profit),
        profit,
        income: records.iter().map(|r| r.income).collect(),
        expense: records.iter().map(|r| r.expense).collect(),
    };
    debug!(days = charts.days.len(), "charts built");
    Ok(charts)
}

/// Multi-line summary of a single day.
pub fn day_summary(r: &DayRecord) -> String {
    format!(
        "Day {}\nIncome: {}\nExpense: {}\nProfit: {}",
        r.day, r.income, r.expense, r.profit
    )
}

/// Pretty JSON for an external charting tool.
pub fn to_json(charts: &ChartSet) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(charts)?)
}

/// Plain-text table with one row per day.
pub fn render_table(charts: &ChartSet) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>5} {:>10} {:>10} {:>10} {:>12}",
        "Day", "Income", "Expense", "Profit", "Cumulative"
    );
    for i in 0..charts.days.len() {
        let _ = writeln!(
            out,
            "{:>5} {:>10} {:>10} {:>10} {:>12}",
            charts.days[i],
            charts.income[i],
            charts.expense[i],
            charts.profit[i],
            charts.cumulative_profit[i]
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(day: u32, income: i64, expense: i64) -> DayRecord {
        DayRecord {
            day,
            income,
            expense,
            profit: income - expense,
            budget_after: 0,
            employees: 1,
            upgrade_level: 0,
        }
    }

    #[test]
    fn cumulative_example() {
        assert_eq!(cumulative(&[50, 70, -10]), vec![50, 120, 110]);
        assert!(cumulative(&[]).is_empty());
    }

    #[test]
    fn empty_log_has_no_charts() {
        let err = build_charts(&[]).unwrap_err();
        assert!(matches!(err, ReportError::NoData));
        assert_eq!(err.to_string(), NO_DATA_MESSAGE);
    }

    #[test]
    fn charts_follow_the_log() {
        let log = [record(1, 120, 60), record(2, 190, 90)];
        let c = build_charts(&log).unwrap();
        assert_eq!(c.days, vec![1, 2]);
        assert_eq!(c.profit, vec![60, 100]);
        assert_eq!(c.cumulative_profit, vec![60, 160]);
        assert_eq!(c.income, vec![120, 190]);
        assert_eq!(c.expense, vec![60, 90]);
    }

    #[test]
    fn summary_text() {
        assert_eq!(
            day_summary(&record(1, 120, 60)),
            "Day 1\nIncome: 120\nExpense: 60\nProfit: 60"
        );
    }

    #[test]
    fn table_and_json() {
        let c = build_charts(&[record(1, 120, 60)]).unwrap();
        let table = render_table(&c);
        assert_eq!(table.lines().count(), 2);
        assert!(table.lines().nth(1).unwrap().contains("120"));
        let json = to_json(&c).unwrap();
        assert!(json.contains("\"cumulative_profit\""));
    }

    #[test]
    fn cumulative_saturates() {
        assert_eq!(cumulative(&[i64::MAX, 1, -1]), vec![i64::MAX, i64::MAX, i64::MAX - 1]);
    }

    proptest! {
        #[test]
        fn cumulative_is_running_sum(profits in proptest::collection::vec(-1_000i64..1_000, 0..100)) {
            let c = cumulative(&profits);
            prop_assert_eq!(c.len(), profits.len());
            let mut acc = 0;
            for (p, s) in profits.iter().zip(&c) {
                acc += p;
                prop_assert_eq!(*s, acc);
            }
        }
    }
}
