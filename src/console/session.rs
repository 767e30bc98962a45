use std::io::Write;

use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};
use tokio::io::AsyncBufRead;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use crate::config_loader::{AppConfig, TradingConfig};
use crate::infrastructure::exchange::deribit::{Credentials, DeribitClient, Transport};

use super::menu::MenuChoice;
use super::prompt::Prompt;
use super::render;

/// Interactive trading session: one authenticated client, the instrument
/// names fetched at startup, and the console streams.
pub struct Console<T, R, W> {
    pub(crate) client: DeribitClient<T>,
    pub(crate) instruments: Vec<String>,
    pub(crate) trading: TradingConfig,
    pub(crate) prompt: Prompt<R>,
    pub(crate) out: W,
}

/// Authenticate and fetch the instrument list. Any failure here is fatal
/// for the program.
pub async fn connect<T: Transport>(
    transport: T,
    config: &AppConfig,
    credentials: &Credentials,
) -> Result<(DeribitClient<T>, Vec<String>)> {
    let client = DeribitClient::new(transport).with_order_book_depth(config.trading.order_book_depth);

    let token = match client.authenticate(credentials, &config.auth.scope).await {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to retrieve access token: {}", e);
            return Err(anyhow!(e).context("Failed to retrieve access token"));
        }
    };
    let client = client.with_token(token);

    let instruments = client
        .get_instruments(&config.trading.currency, &config.trading.kind)
        .await
        .context("Failed to fetch available instruments")?;
    let names: Vec<String> = instruments.into_iter().map(|i| i.instrument_name).collect();
    info!(
        "Loaded {} {} {} instruments",
        names.len(),
        config.trading.currency,
        config.trading.kind
    );

    Ok((client, names))
}

// Resolves on Ctrl+C. A closed channel means no interrupts will ever come.
async fn interrupted(rx: &mut broadcast::Receiver<()>) {
    match rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}

enum MenuInput {
    Token(Option<String>),
    Interrupted,
}

enum Outcome {
    Finished(Result<()>),
    Cancelled,
}

impl<T, R, W> Console<T, R, W>
where
    T: Transport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        client: DeribitClient<T>,
        instruments: Vec<String>,
        trading: TradingConfig,
        reader: R,
        out: W,
    ) -> Self {
        Self {
            client,
            instruments,
            trading,
            prompt: Prompt::new(reader),
            out,
        }
    }

    pub fn instruments(&self) -> &[String] {
        &self.instruments
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Menu loop. Returns on `0`, end of input, or an interrupt at the menu
    /// prompt. An interrupt while an operation runs cancels only that
    /// operation.
    pub async fn run(&mut self, mut interrupt: broadcast::Receiver<()>) -> Result<()> {
        loop {
            render::write_menu(&mut self.out)?;

            let input = tokio::select! {
                token = self.prompt.next_token() => MenuInput::Token(token?),
                _ = interrupted(&mut interrupt) => MenuInput::Interrupted,
            };

            let token = match input {
                MenuInput::Token(Some(token)) => token,
                MenuInput::Token(None) => {
                    writeln!(self.out, "\nInput closed. Exiting program...")?;
                    return Ok(());
                }
                MenuInput::Interrupted => {
                    writeln!(self.out, "\nInterrupted. Exiting program...")?;
                    return Ok(());
                }
            };

            let choice = match MenuChoice::parse(&token) {
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "Exiting program...")?;
                    return Ok(());
                }
                Some(choice) => choice,
                None => {
                    writeln!(self.out, "Invalid choice! Please try again.")?;
                    continue;
                }
            };

            // Drop interrupts that arrived while idle at the menu
            while !matches!(interrupt.try_recv(), Err(TryRecvError::Empty) | Err(TryRecvError::Closed)) {}

            let outcome = tokio::select! {
                result = self.dispatch(choice) => Outcome::Finished(result),
                _ = interrupted(&mut interrupt) => Outcome::Cancelled,
            };

            match outcome {
                Outcome::Finished(Ok(())) => {}
                Outcome::Finished(Err(e)) => {
                    error!("{} failed: {:#}", choice, e);
                    writeln!(self.out, "Error: {:#}", e)?;
                }
                Outcome::Cancelled => {
                    warn!("{} cancelled by user", choice);
                    writeln!(self.out, "\nOperation cancelled")?;
                }
            }
        }
    }

    pub async fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::PlaceOrder => self.place_order_interactive().await,
            MenuChoice::OrderBook => self.order_book_interactive().await,
            MenuChoice::Position => self.position_interactive().await,
            MenuChoice::OpenOrders => self.show_open_orders().await,
            MenuChoice::CancelOrder => self.cancel_order_interactive().await,
            MenuChoice::ModifyOrder => self.modify_order_interactive().await,
            MenuChoice::ListInstruments => {
                render::write_instruments(&mut self.out, &self.instruments)?;
                Ok(())
            }
            MenuChoice::Exit => Ok(()),
        }
    }
}
