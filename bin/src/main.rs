use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use egx_tui::pages::prices::FETCH_FAILED_MESSAGE;
use egx_utils::{
    config::Config,
    disk_storage::DiskStorageInterface,
    log::{default_log_path, init_file_logging},
    prices::{preview_json, PricesClient},
};

mod cli;
mod panic_hook;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{} {error}", style("error:").red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> egx_tui::Result<()> {
    let log_path = match cli.log_file {
        Some(path) => path,
        None => default_log_path()?,
    };
    init_file_logging(&log_path)?;

    let config = Config::load()?.with_overrides(cli.base_url, cli.symbol);

    match cli.cmd {
        None => {
            panic_hook::set();
            egx_tui::run(&config).await
        }
        Some(Commands::Prices { symbol }) => {
            let symbol = symbol.unwrap_or_else(|| config.default_symbol.clone());
            prices(&config, &symbol).await
        }
        Some(Commands::Ping) => ping(&config).await,
    }
}

async fn prices(config: &Config, symbol: &str) -> egx_tui::Result<()> {
    let client = PricesClient::new(config.get_base_url()?);
    tracing::info!(symbol, url = %client.prices_url(symbol), "fetching prices");

    let response = match client.fetch_prices(symbol).await {
        Ok(response) => response,
        Err(error) => {
            tracing::error!(symbol, %error, "error fetching prices");
            eprintln!("{}", style(FETCH_FAILED_MESSAGE).red());
            return Err(error.into());
        }
    };

    let (meta, series) = response.into_parts();
    tracing::info!(symbol, rows = series.len(), "prices received");

    println!("{}", style(meta.summary()).bold());
    println!("{}", preview_json(&series)?);

    Ok(())
}

async fn ping(config: &Config) -> egx_tui::Result<()> {
    let client = PricesClient::new(config.get_base_url()?);

    let message = client.ping().await?;
    println!(
        "{} {} {}",
        style("ok").green(),
        client.base_url(),
        style(message).dim()
    );

    Ok(())
}
