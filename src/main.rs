// Standard library imports
use std::io;

// External crate imports
use anyhow::Result;
use dotenv::dotenv;
use log::{error, info};
use tokio::io::BufReader;
use tokio::sync::broadcast;

// Internal crate imports
use deribit_trader::config_loader::AppConfig;
use deribit_trader::console::{connect, Console};
use deribit_trader::infrastructure::exchange::deribit::{Credentials, HttpTransport};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Logger initialized");

    if let Err(e) = run().await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let config_path = std::env::var("DERIBIT_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
    let config = AppConfig::load_or_default(&config_path)?;

    let credentials = Credentials::from_env()?;
    let transport = HttpTransport::new(&config.exchange.base_url, config.request_timeout())?;

    let (client, instruments) = connect(transport, &config, &credentials).await?;

    // Ctrl+C cancels the running operation, or exits when idle at the menu
    let (interrupt_tx, interrupt_rx) = broadcast::channel::<()>(4);
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if interrupt_tx.send(()).is_err() {
                break;
            }
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(client, instruments, config.trading.clone(), stdin, io::stdout());
    console.run(interrupt_rx).await?;

    info!("Session closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_config_fails_inside_run() {
        let path = std::env::temp_dir().join(format!("deribit_trader_invalid_{}.toml", std::process::id()));
        std::fs::write(&path, "[exchange]\ntimeout_secs = 0\n").unwrap();
        std::env::set_var("DERIBIT_CONFIG", &path);

        let err = run().await.unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
