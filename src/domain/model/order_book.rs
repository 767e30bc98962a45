// Domain model for order book snapshots
use serde::{Deserialize, Serialize};

/// One depth level. On the wire this is the array `[price, amount]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceLevel {
    pub price: f64,
    pub amount: f64,
}

impl PriceLevel {
    pub fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }
}

impl From<(f64, f64)> for PriceLevel {
    fn from((price, amount): (f64, f64)) -> Self {
        Self { price, amount }
    }
}

impl From<PriceLevel> for (f64, f64) {
    fn from(level: PriceLevel) -> Self {
        (level.price, level.amount)
    }
}

/// Result of `public/get_order_book`.
///
/// Best prices are `null` on an empty side of the book.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub instrument_name: String,
    /// Milliseconds since epoch
    pub timestamp: i64,
    #[serde(default)]
    pub best_bid_price: Option<f64>,
    #[serde(default)]
    pub best_bid_amount: f64,
    #[serde(default)]
    pub best_ask_price: Option<f64>,
    #[serde(default)]
    pub best_ask_amount: f64,
    pub mark_price: f64,
    #[serde(default)]
    pub index_price: Option<f64>,
    #[serde(default)]
    pub open_interest: Option<f64>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_levels_decode_from_pairs() {
        let book: OrderBook = serde_json::from_value(json!({
            "instrument_name": "BTC-PERPETUAL",
            "timestamp": 1_700_000_000_000i64,
            "best_bid_price": 100.0,
            "best_bid_amount": 5.0,
            "best_ask_price": 100.5,
            "best_ask_amount": 10.0,
            "mark_price": 100.25,
            "open_interest": 1234.0,
            "bids": [[100.0, 5.0], [99.5, 20.0]],
            "asks": [[100.5, 10.0]]
        }))
        .unwrap();

        assert_eq!(book.bids, vec![PriceLevel::new(100.0, 5.0), PriceLevel::new(99.5, 20.0)]);
        assert_eq!(book.asks, vec![PriceLevel::new(100.5, 10.0)]);
        assert_eq!(book.best_ask_price, Some(100.5));
    }

    #[test]
    fn test_empty_side_has_no_best_price() {
        let book: OrderBook = serde_json::from_value(json!({
            "instrument_name": "BTC-27DEC24",
            "timestamp": 1_700_000_000_000i64,
            "best_bid_price": null,
            "best_bid_amount": 0.0,
            "best_ask_price": 101.0,
            "best_ask_amount": 1.0,
            "mark_price": 100.0,
            "bids": [],
            "asks": [[101.0, 1.0]]
        }))
        .unwrap();

        assert_eq!(book.best_bid_price, None);
        assert_eq!(book.best_ask_price, Some(101.0));
    }
}
