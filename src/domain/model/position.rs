use serde::{Deserialize, Serialize};

use crate::domain::enums::PositionDirection;

/// Result of `private/get_position`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub instrument_name: String,
    pub size: f64,
    pub direction: PositionDirection,
    pub average_price: f64,
    // Not reported for options
    #[serde(default)]
    pub leverage: Option<f64>,
    pub mark_price: f64,
    pub floating_profit_loss: f64,
    pub total_profit_loss: f64,
    pub open_orders_margin: f64,
    pub initial_margin: f64,
    pub maintenance_margin: f64,
    #[serde(default)]
    pub kind: Option<String>,
}

impl Position {
    pub fn is_flat(&self) -> bool {
        self.direction == PositionDirection::Zero || self.size == 0.0
    }
}
