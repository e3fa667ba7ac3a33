use clap::{Parser, Subcommand, ValueEnum};
use coinquote_app::config::Config;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sets the level of tracing
    #[arg(long, value_enum, ignore_case = true, default_value_t = TraceLevel::WARN)]
    pub trace: TraceLevel,

    /// Base URL of the market data API (overrides COINQUOTE_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// How many cryptocurrencies to list (overrides COINQUOTE_LIMIT)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// How long a notification stays up, in milliseconds (overrides COINQUOTE_NOTICE_MS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub notice_ms: Option<u64>,
}

impl Cli {
    /// Command line flags win over the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(limit) = self.limit {
            config.listing_limit = limit as usize;
        }
        if let Some(ms) = self.notice_ms {
            config.notice_duration = Duration::from_millis(ms);
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pick a currency & a cryptocurrency from menus and fetch quotes (default).
    Interactive,

    /// Print the top cryptocurrencies by market cap.
    List,

    /// Print the supported fiat currencies.
    Currencies,

    /// Fetch a single quote and exit.
    Quote {
        /// Fiat currency code, e.g. USD
        #[arg(long, default_value = "")]
        fiat: String,

        /// Cryptocurrency symbol, e.g. BTC
        #[arg(long, default_value = "")]
        crypto: String,
    },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}
