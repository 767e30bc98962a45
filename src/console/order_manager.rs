use std::io::Write;

use anyhow::{bail, Context, Result};
use log::{error, info};
use tokio::io::AsyncBufRead;

use crate::domain::enums::{OrderSide, OrderType};
use crate::domain::model::order::{EditRequest, OrderPlacement, OrderRequest};
use crate::domain::pricing::{format_decimal, round_to_tick, DecimalString};
use crate::infrastructure::exchange::deribit::Transport;

use super::render;
use super::session::Console;

/// Order entry flows: place, modify, cancel.
impl<T, R, W> Console<T, R, W>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    async fn ask_positive(&mut self, question: &str) -> Result<f64> {
        let value: f64 = self.prompt.ask_parsed(&mut self.out, question).await?;
        if !value.is_finite() || value <= 0.0 {
            bail!("Expected a positive number, got {}", value);
        }
        Ok(value)
    }

    pub async fn place_order_interactive(&mut self) -> Result<()> {
        render::write_instruments(&mut self.out, &self.instruments)?;

        let instrument = self.prompt.ask(&mut self.out, "\nEnter instrument name: ").await?;
        if !self.instruments.iter().any(|name| name == &instrument) {
            writeln!(self.out, "Invalid instrument name!")?;
            return Ok(());
        }

        let amount = self.ask_positive("Enter amount to trade: ").await?;

        match self.place_order(&instrument, amount).await {
            Ok(placement) => {
                render::write_placement(&mut self.out, "Place Order Response", &placement)?;
                writeln!(self.out, "Order placed successfully")?;
            }
            Err(e) => {
                error!("Error placing order: {:#}", e);
                writeln!(self.out, "Failed to place order: {:#}", e)?;
            }
        }
        Ok(())
    }

    /// Fetch the tick size and reference prices, ask for price, type and
    /// direction, then send a post-only GTC order.
    pub async fn place_order(&mut self, instrument: &str, amount: f64) -> Result<OrderPlacement> {
        let details = self
            .client
            .get_instrument(instrument)
            .await
            .context("Failed to get instrument specifications")?;

        let book = self
            .client
            .get_order_book(instrument)
            .await
            .context("Failed to get market data")?;

        render::write_market_prices(&mut self.out, &book)?;

        let requested: f64 = self
            .prompt
            .ask_parsed(&mut self.out, "Enter your desired price (0 for market price): ")
            .await?;
        if !requested.is_finite() || requested < 0.0 {
            bail!("Price must be zero or positive, got {}", requested);
        }

        // Zero means "use the mark price as reference"
        let reference = if requested == 0.0 { book.mark_price } else { requested };
        let price = round_to_tick(reference, details.tick_size)?;
        writeln!(
            self.out,
            "Price rounded to tick size {}: {}",
            details.tick_size,
            format_decimal(price)
        )?;

        let order_type: OrderType = self
            .prompt
            .ask_parsed(&mut self.out, "Choose order type (market/limit): ")
            .await?;
        let side: OrderSide = self
            .prompt
            .ask_parsed(&mut self.out, "Choose direction (buy/sell): ")
            .await?;

        let request = OrderRequest::post_only(side, instrument, order_type, amount, price);
        info!(
            "Placing {} {} order on {}: {} @ {}",
            side, order_type, instrument, request.amount, format_decimal(price)
        );

        let placement = self
            .client
            .place_order(&request)
            .await
            .with_context(|| format!("{} rejected", side.method()))?;
        info!("Order {} is {}", placement.order.order_id, placement.order.order_state);
        Ok(placement)
    }

    pub async fn modify_order_interactive(&mut self) -> Result<()> {
        let order_id = self.prompt.ask(&mut self.out, "Enter order ID to modify: ").await?;
        let amount = self.ask_positive("Enter new amount: ").await?;
        let price = self.ask_positive("Enter new price: ").await?;

        let placement = self.modify_order(&order_id, amount, price).await?;
        render::write_placement(&mut self.out, "Modify Order Response", &placement)?;
        Ok(())
    }

    /// Look up the order's instrument for its tick size, then edit amount and price.
    pub async fn modify_order(&mut self, order_id: &str, amount: f64, price: f64) -> Result<OrderPlacement> {
        let current = self
            .client
            .get_order_state(order_id)
            .await
            .with_context(|| format!("Failed to get state of order {}", order_id))?;

        let details = self
            .client
            .get_instrument(&current.instrument_name)
            .await
            .context("Failed to get instrument specifications")?;

        let price = round_to_tick(price, details.tick_size)?;
        let request = EditRequest {
            order_id: order_id.to_string(),
            amount: DecimalString::new(amount),
            price: DecimalString::new(price),
        };
        info!("Editing order {}: {} @ {}", order_id, request.amount, request.price);

        self.client
            .edit_order(&request)
            .await
            .with_context(|| format!("Failed to modify order {}", order_id))
    }

    pub async fn cancel_order_interactive(&mut self) -> Result<()> {
        let order_id = self.prompt.ask(&mut self.out, "Enter order ID to cancel: ").await?;

        let order = self
            .client
            .cancel_order(&order_id)
            .await
            .with_context(|| format!("Failed to cancel order {}", order_id))?;
        info!("Cancelled order {}", order.order_id);

        writeln!(self.out, "Cancel Order Response:")?;
        render::write_order(&mut self.out, &order)?;
        Ok(())
    }
}
