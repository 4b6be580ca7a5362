use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxType::Income => write!(f, "income"),
            TxType::Expense => write!(f, "expense"),
        }
    }
}

/// A single income or expense event.
///
/// **Important**: `amount` is a non-negative magnitude — the sign is implied
/// by `tx_type`, never encoded in the stored value. Rows fetched from the
/// backend are immutable here; this library never edits or deletes them.
///
/// Backend rows are not validated upstream, so deserialization is lenient:
/// a malformed `amount` coerces to zero and a malformed `created_at` becomes
/// `None` instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier (opaque — backend rows keep whatever id they came with)
    pub id: String,

    /// Non-negative magnitude, denominated in RUB
    #[serde(default, deserialize_with = "de_amount")]
    pub amount: f64,

    /// Income or expense
    #[serde(rename = "type")]
    pub tx_type: TxType,

    /// Category display name (join against `Category::name` is a fallback only)
    pub category: String,

    /// Stable category join key. Preferred over `category` for icon lookup,
    /// so renaming a category does not orphan historical rows.
    #[serde(default)]
    pub category_id: Option<String>,

    /// Creation timestamp — used for sorting and period filtering.
    /// `None` when the stored value was missing or unparseable; such rows
    /// only ever match the "all" period.
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a locally recorded transaction, stamped with "now".
    pub fn new(amount: f64, tx_type: TxType, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount,
            tx_type,
            category: category.into(),
            category_id: None,
            created_at: Some(Utc::now()),
        }
    }

    /// Attach the stable category id.
    pub fn with_category_id(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }
}

/// Accepts a JSON number or a numeric string; anything else becomes `0.0`
/// so aggregation never aborts on a single bad row.
fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Num(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let raw = Option::<RawAmount>::deserialize(deserializer)?;
    let amount = match raw {
        Some(RawAmount::Num(n)) if n.is_finite() => n,
        Some(RawAmount::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(amount)
}

/// Accepts RFC 3339 timestamps or naive `YYYY-MM-DDTHH:MM:SS[.fff]` strings
/// (assumed UTC); anything else becomes `None`.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTimestamp {
        Text(String),
        Other(serde_json::Value),
    }

    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    let Some(RawTimestamp::Text(s)) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    // Postgres timestamps without a zone, e.g. "2024-03-05T14:30:00.123456"
    if let Ok(naive) = NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Some(naive.and_utc()));
    }
    Ok(None)
}
