use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stockpulse_core::api::{HttpMarketDataClient, MarketDataClient};
use stockpulse_core::config::Settings;
use stockpulse_core::domain::symbol::Symbol;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod keys;
mod report;
mod tui;
mod ui;

#[derive(Debug, Parser)]
#[command(name = "stockpulse", about = "Live stock prices and short-term predictions")]
struct Args {
    /// Ticker to show first (AAPL, MSFT, GOOGL, TSLA, AMZN, META, NVDA).
    #[arg(long)]
    symbol: Option<Symbol>,

    /// Prediction API base URL. Overrides STOCKPULSE_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Fetch once, print the cards as plain text and exit.
    #[arg(long)]
    once: bool,

    /// Where logs go while the terminal UI owns the screen.
    #[arg(long, default_value = "stockpulse.log")]
    log_file: PathBuf,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(base_url) = self.base_url.as_deref().filter(|s| !s.trim().is_empty()) {
            settings.api_base_url = base_url.to_string();
        }
        if let Some(symbol) = self.symbol {
            settings.default_symbol = symbol;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut settings = Settings::from_env()?;
    args.apply(&mut settings);

    let _sentry_guard = init_sentry(&settings);
    init_tracing(&args)?;

    tracing::info!(
        base_url = %settings.api_base_url,
        symbol = %settings.default_symbol,
        once = args.once,
        "stockpulse starting"
    );

    let client: Arc<dyn MarketDataClient> = Arc::new(HttpMarketDataClient::from_settings(&settings)?);

    let result = if args.once {
        report::run(client.as_ref(), settings.default_symbol).await
    } else {
        tui::run(client, &settings).await
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %format!("{err:#}"), "stockpulse exited with error");
    }
    result
}

fn init_tracing(args: &Args) -> anyhow::Result<()> {
    let writer = if args.once {
        BoxMakeWriter::new(std::io::stderr)
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&args.log_file)
            .with_context(|| format!("failed to open log file {}", args.log_file.display()))?;
        BoxMakeWriter::new(std::sync::Mutex::new(file))
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(args.once),
        )
        .with(sentry_tracing::layer())
        .init();
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let args = Args::try_parse_from([
            "stockpulse",
            "--symbol",
            "tsla",
            "--base-url",
            "http://10.0.0.5:8000",
            "--once",
        ])
        .unwrap();
        assert!(args.once);

        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.default_symbol, Symbol::Tsla);
        assert_eq!(settings.api_base_url, "http://10.0.0.5:8000");
    }

    #[test]
    fn rejects_unknown_symbol_flag() {
        assert!(Args::try_parse_from(["stockpulse", "--symbol", "IBM"]).is_err());
    }

    #[test]
    fn defaults_leave_settings_untouched() {
        let args = Args::try_parse_from(["stockpulse"]).unwrap();
        assert_eq!(args.log_file, PathBuf::from("stockpulse.log"));

        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.default_symbol, Symbol::Aapl);
        assert_eq!(
            settings.api_base_url,
            stockpulse_core::config::DEFAULT_API_BASE_URL
        );
    }
}
