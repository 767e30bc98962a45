// Domain model for orders
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::enums::{OrderSide, OrderState, OrderType, TimeInForce};
use crate::domain::pricing::DecimalString;

// OrderRequest is a send-side intent, therefore separate from Order.
// The side selects the endpoint and is not part of the params object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRequest {
    #[serde(skip)]
    pub side: OrderSide,
    pub instrument_name: String,
    pub amount: DecimalString,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<DecimalString>,
    pub post_only: bool,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    /// A post-only, good-til-cancelled order, which is what the console places.
    pub fn post_only(
        side: OrderSide,
        instrument_name: impl Into<String>,
        order_type: OrderType,
        amount: f64,
        price: f64,
    ) -> Self {
        Self {
            side,
            instrument_name: instrument_name.into(),
            amount: DecimalString::new(amount),
            order_type,
            price: Some(DecimalString::new(price)),
            post_only: true,
            time_in_force: TimeInForce::GoodTilCancelled,
        }
    }
}

/// Params of `private/edit`: a new amount and price for a resting order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EditRequest {
    pub order_id: String,
    pub amount: DecimalString,
    pub price: DecimalString,
}

/// Market orders come back with the literal price `"market_price"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderPrice {
    Limit(f64),
    Market(String),
}

impl fmt::Display for OrderPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderPrice::Limit(price) => write!(f, "{}", price),
            OrderPrice::Market(label) => f.write_str(label),
        }
    }
}

/// An order as the exchange reports it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub instrument_name: String,
    pub direction: OrderSide,
    #[serde(default)]
    pub price: Option<OrderPrice>,
    pub amount: f64,
    #[serde(default)]
    pub filled_amount: f64,
    pub order_type: OrderType,
    pub order_state: OrderState,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default)]
    pub post_only: Option<bool>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub creation_timestamp: Option<i64>,
}

/// Result of `private/buy`, `private/sell` and `private/edit`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderPlacement {
    pub order: Order,
    // Fills are only echoed back for display
    #[serde(default)]
    pub trades: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_request_params() {
        let request = OrderRequest::post_only(OrderSide::Sell, "BTC-PERPETUAL", OrderType::Limit, 10.0, 100.5);
        let params = serde_json::to_value(&request).unwrap();

        assert_eq!(
            params,
            json!({
                "instrument_name": "BTC-PERPETUAL",
                "amount": "10.00000000",
                "type": "limit",
                "price": "100.50000000",
                "post_only": true,
                "time_in_force": "good_til_cancelled"
            })
        );
    }

    #[test]
    fn test_market_order_price_label() {
        let order: Order = serde_json::from_value(json!({
            "order_id": "ETH-584830574",
            "instrument_name": "BTC-PERPETUAL",
            "direction": "buy",
            "price": "market_price",
            "amount": 40.0,
            "filled_amount": 10.0,
            "order_type": "market",
            "order_state": "open"
        }))
        .unwrap();

        assert_eq!(order.price, Some(OrderPrice::Market("market_price".to_string())));
        assert_eq!(order.price.as_ref().map(|p| p.to_string()).as_deref(), Some("market_price"));
        assert_eq!(order.filled_amount, 10.0);
    }
}
