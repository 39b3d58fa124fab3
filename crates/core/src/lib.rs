pub mod api;
pub mod domain;
pub mod poll;
pub mod time;
pub mod view;

pub mod config {
    use crate::domain::symbol::Symbol;
    use anyhow::Context;
    use std::time::Duration;

    pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
    const DEFAULT_SNAPSHOT_POLL_SECS: u64 = 5;
    const DEFAULT_HISTORY_POLL_SECS: u64 = 10;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub http_timeout: Option<Duration>,
        pub snapshot_poll: Duration,
        pub history_poll: Duration,
        pub default_symbol: Symbol,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                http_timeout: None,
                snapshot_poll: Duration::from_secs(DEFAULT_SNAPSHOT_POLL_SECS),
                history_poll: Duration::from_secs(DEFAULT_HISTORY_POLL_SECS),
                default_symbol: Symbol::Aapl,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let api_base_url = lookup("STOCKPULSE_API_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

            let http_timeout = lookup("STOCKPULSE_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);

            let snapshot_poll_secs = lookup("STOCKPULSE_SNAPSHOT_POLL_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_SNAPSHOT_POLL_SECS);
            anyhow::ensure!(
                snapshot_poll_secs > 0,
                "STOCKPULSE_SNAPSHOT_POLL_SECS must be >= 1"
            );

            let history_poll_secs = lookup("STOCKPULSE_HISTORY_POLL_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_HISTORY_POLL_SECS);
            anyhow::ensure!(
                history_poll_secs > 0,
                "STOCKPULSE_HISTORY_POLL_SECS must be >= 1"
            );

            let default_symbol = match lookup("STOCKPULSE_DEFAULT_SYMBOL") {
                Some(s) if !s.trim().is_empty() => s
                    .parse::<Symbol>()
                    .context("STOCKPULSE_DEFAULT_SYMBOL is not a supported symbol")?,
                _ => Symbol::Aapl,
            };

            Ok(Self {
                api_base_url,
                http_timeout,
                snapshot_poll: Duration::from_secs(snapshot_poll_secs),
                history_poll: Duration::from_secs(history_poll_secs),
                default_symbol,
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }
    }

}
