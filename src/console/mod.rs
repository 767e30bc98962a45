//! Interactive console for the trading operations.
//!
//! This module holds the menu loop, the input prompt, the text renderers
//! and the multi-step order flows built on top of `DeribitClient`.

mod market_data;
mod order_manager;
pub mod menu;
pub mod prompt;
pub mod render;
pub mod session;

pub use menu::MenuChoice;
pub use prompt::Prompt;
pub use session::{connect, Console};
