use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single data point for chart rendering.
///
/// The core generates these — the frontend just renders them.
/// One point per local calendar day that has at least one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// Local calendar day
    pub date: NaiveDate,

    /// Income total for this day (raw RUB magnitude)
    pub income: f64,

    /// Expense total for this day (raw RUB magnitude)
    pub expense: f64,
}
