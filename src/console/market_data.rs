use std::io::Write;

use anyhow::{Context, Result};
use log::debug;
use tokio::io::AsyncBufRead;

use crate::infrastructure::exchange::deribit::Transport;

use super::render;
use super::session::Console;

/// Read-only views: order book, position, open orders.
impl<T, R, W> Console<T, R, W>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub async fn order_book_interactive(&mut self) -> Result<()> {
        let instrument = self
            .prompt
            .ask(&mut self.out, "Enter instrument name (e.g., BTC-PERPETUAL): ")
            .await?;
        self.show_order_book(&instrument).await
    }

    pub async fn show_order_book(&mut self, instrument: &str) -> Result<()> {
        let book = self
            .client
            .get_order_book(instrument)
            .await
            .with_context(|| format!("Failed to get order book for {}", instrument))?;
        debug!("{} bids / {} asks for {}", book.bids.len(), book.asks.len(), instrument);

        render::write_order_book(&mut self.out, &book)?;
        Ok(())
    }

    pub async fn position_interactive(&mut self) -> Result<()> {
        let instrument = self
            .prompt
            .ask(&mut self.out, "Enter instrument name to check position: ")
            .await?;
        self.show_position(&instrument).await
    }

    pub async fn show_position(&mut self, instrument: &str) -> Result<()> {
        let position = self
            .client
            .get_position(instrument)
            .await
            .with_context(|| format!("Failed to get position for {}", instrument))?;

        render::write_position(&mut self.out, &position)?;
        Ok(())
    }

    pub async fn show_open_orders(&mut self) -> Result<()> {
        let orders = self
            .client
            .get_open_orders_by_currency(&self.trading.currency)
            .await
            .with_context(|| format!("Failed to get open {} orders", self.trading.currency))?;

        render::write_open_orders(&mut self.out, &orders)?;
        Ok(())
    }
}
