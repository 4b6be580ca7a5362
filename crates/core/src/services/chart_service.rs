use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::models::chart::ChartDataPoint;
use crate::models::transaction::{Transaction, TxType};

/// Generates chart-ready data sets from a filtered transaction subset.
///
/// The core computes all the numbers — the frontend only renders.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Group the filtered subset into a per-day income/expense series,
    /// ascending by local calendar day. Rows without a usable timestamp
    /// are skipped — they have no position on a time axis.
    pub fn daily_series(&self, filtered: &[&Transaction]) -> Vec<ChartDataPoint> {
        let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

        for tx in filtered {
            let Some(ts) = tx.created_at else { continue };
            let day = ts.with_timezone(&Local).date_naive();
            let entry = days.entry(day).or_insert((0.0, 0.0));
            match tx.tx_type {
                TxType::Income => entry.0 += tx.amount,
                TxType::Expense => entry.1 += tx.amount,
            }
        }

        days.into_iter()
            .map(|(date, (income, expense))| ChartDataPoint {
                date,
                income,
                expense,
            })
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
