//! Plain-text views of exchange data for the console.

use std::io::{self, Write};

use chrono::DateTime;

use crate::domain::model::order::{Order, OrderPlacement};
use crate::domain::model::order_book::{OrderBook, PriceLevel};
use crate::domain::model::position::Position;

use super::menu::MenuChoice;

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Exchange timestamps are milliseconds since epoch.
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => millis.to_string(),
    }
}

pub fn write_menu<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n=== Trading Operations Menu ===")?;
    for choice in MenuChoice::ALL {
        writeln!(out, "{}. {}", choice.number(), choice.label())?;
    }
    write!(out, "Enter your choice: ")?;
    out.flush()
}

pub fn write_instruments<W: Write>(out: &mut W, instruments: &[String]) -> io::Result<()> {
    writeln!(out, "\nAvailable instruments:")?;
    if instruments.is_empty() {
        writeln!(out, "(none)")?;
    }
    for name in instruments {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn write_levels<W: Write>(out: &mut W, levels: &[PriceLevel]) -> io::Result<()> {
    for level in levels {
        writeln!(out, "Price: {}, Amount: {}", level.price, level.amount)?;
    }
    Ok(())
}

/// Asks are listed before bids, each side in the order the exchange sent it.
pub fn write_order_book<W: Write>(out: &mut W, book: &OrderBook) -> io::Result<()> {
    writeln!(out, "Order Book for {}:\n", book.instrument_name)?;
    writeln!(
        out,
        "Best Bid Price: {}, Amount: {}",
        optional(book.best_bid_price),
        book.best_bid_amount
    )?;
    writeln!(
        out,
        "Best Ask Price: {}, Amount: {}",
        optional(book.best_ask_price),
        book.best_ask_amount
    )?;

    writeln!(out, "\nAsks (Sell Orders):")?;
    write_levels(out, &book.asks)?;

    writeln!(out, "\nBids (Buy Orders):")?;
    write_levels(out, &book.bids)?;

    writeln!(out, "\nMark Price: {}", book.mark_price)?;
    writeln!(out, "Open Interest: {}", optional(book.open_interest))?;
    writeln!(out, "Timestamp: {}", format_timestamp(book.timestamp))
}

/// The three reference prices shown before the user picks a limit price.
pub fn write_market_prices<W: Write>(out: &mut W, book: &OrderBook) -> io::Result<()> {
    writeln!(out, "Current market prices:")?;
    writeln!(out, "Best Bid: {}", optional(book.best_bid_price))?;
    writeln!(out, "Best Ask: {}", optional(book.best_ask_price))?;
    writeln!(out, "Mark Price: {}", book.mark_price)
}

pub fn write_position<W: Write>(out: &mut W, position: &Position) -> io::Result<()> {
    writeln!(out, "Position Details for {}:\n", position.instrument_name)?;
    writeln!(out, "Size: {}", position.size)?;
    writeln!(out, "Direction: {}", position.direction)?;
    writeln!(out, "Average Price: {}", position.average_price)?;
    writeln!(out, "Leverage: {}", optional(position.leverage))?;
    writeln!(out, "Mark Price: {}", position.mark_price)?;
    writeln!(out, "Floating Profit Loss: {}", position.floating_profit_loss)?;
    writeln!(out, "Total Profit Loss: {}", position.total_profit_loss)?;
    writeln!(out, "Open Orders Margin: {}", position.open_orders_margin)?;
    writeln!(out, "Initial Margin: {}", position.initial_margin)?;
    writeln!(out, "Maintenance Margin: {}", position.maintenance_margin)
}

pub fn write_order<W: Write>(out: &mut W, order: &Order) -> io::Result<()> {
    writeln!(out, "Instrument: {}", order.instrument_name)?;
    writeln!(out, "Order ID: {}", order.order_id)?;
    writeln!(out, "Direction: {}", order.direction)?;
    writeln!(out, "Price: {}", optional(order.price.as_ref()))?;
    writeln!(out, "Amount: {}", order.amount)?;
    writeln!(out, "Filled Amount: {}", order.filled_amount)?;
    writeln!(out, "Order Type: {}", order.order_type)?;
    writeln!(out, "Order State: {}", order.order_state)
}

pub fn write_open_orders<W: Write>(out: &mut W, orders: &[Order]) -> io::Result<()> {
    writeln!(out, "Open Orders:\n")?;
    if orders.is_empty() {
        writeln!(out, "No open orders")?;
    }
    for order in orders {
        write_order(out, order)?;
        writeln!(out, "-------------------")?;
    }
    Ok(())
}

pub fn write_placement<W: Write>(out: &mut W, heading: &str, placement: &OrderPlacement) -> io::Result<()> {
    writeln!(out, "{}:", heading)?;
    write_order(out, &placement.order)?;
    if !placement.trades.is_empty() {
        writeln!(out, "Trades: {}", placement.trades.len())?;
    }
    Ok(())
}
