use serde::{Deserialize, Deserializer, Serialize};

/// Exchange rate used until the first successful rate fetch, RUB per USD.
pub const FALLBACK_RATE: f64 = 92.0;

/// Display currency. Amounts are stored RUB-denominated; USD is a
/// display-only conversion through the current rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    #[serde(rename = "RUB")]
    Rub,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    /// Currency sign glyph for display.
    pub fn sign(&self) -> &'static str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
        }
    }
}

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
}

/// Display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User-chosen display settings, persisted with the rest of the store.
///
/// Every field is individually defaulted so a partial stored blob degrades
/// field by field instead of discarding the whole preferences object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub currency: Currency,

    /// RUB-per-USD conversion factor. Guaranteed finite and positive:
    /// the deserializer coerces anything else back to [`FALLBACK_RATE`],
    /// so a division by this value can never be a division by zero.
    #[serde(default = "default_rate", deserialize_with = "de_rate")]
    pub rate: f64,

    #[serde(default)]
    pub lang: Language,

    #[serde(default)]
    pub theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            rate: FALLBACK_RATE,
            lang: Language::default(),
            theme: Theme::default(),
        }
    }
}

fn default_rate() -> f64 {
    FALLBACK_RATE
}

fn de_rate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let rate = f64::deserialize(deserializer)?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Ok(FALLBACK_RATE)
    }
}
