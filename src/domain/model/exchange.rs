use serde::{Deserialize, Serialize};

/// Instrument specification as returned by `public/get_instrument(s)`.
///
/// Only `instrument_name` and `tick_size` are needed by the order flows;
/// the rest is kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub instrument_name: String,
    pub tick_size: f64,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub base_currency: Option<String>,
    #[serde(default)]
    pub quote_currency: Option<String>,
    #[serde(default)]
    pub contract_size: Option<f64>,
    #[serde(default)]
    pub min_trade_amount: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Milliseconds since epoch; far in the future for perpetuals
    #[serde(default)]
    pub expiration_timestamp: Option<i64>,
}
