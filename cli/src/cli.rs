//! Command-line arguments for `newsfeed`.
//!
//! Every option has a default, so a bare `newsfeed` lists the latest
//! articles from the live endpoint with the public developer key.

use std::time::Duration;

use clap::Parser;
use news_core::config::{DEFAULT_API_KEY, DEFAULT_BASE_URL};
use news_core::{ClientConfig, OrderBy, QueryConfig, Timeouts};

/// Fetch one page of Guardian articles and print them.
///
/// # Examples
///
/// ```sh
/// newsfeed --section film --order-by newest
/// newsfeed --author "Peter Bradshaw" --json
/// GUARDIAN_BASE_URL=http://127.0.0.1:3000/search newsfeed
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Restrict results to one section, e.g. "film"
    #[arg(short, long, default_value = "")]
    pub section: String,

    /// Restrict results to one contributor, e.g. "Peter Bradshaw"
    #[arg(short, long, default_value = "")]
    pub author: String,

    /// Sort mode: "", "newest", or "true"/"most-viewed"
    #[arg(short, long, default_value = "")]
    pub order_by: OrderBy,

    /// Search endpoint
    #[arg(long, env = "GUARDIAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API key sent as `api-key`
    #[arg(long, env = "GUARDIAN_API_KEY", default_value = DEFAULT_API_KEY, hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value_t = 15_000)]
    pub connect_timeout_ms: u64,

    #[arg(long, default_value_t = 10_000)]
    pub read_timeout_ms: u64,

    /// Behave as if the device had no network
    #[arg(long)]
    pub offline: bool,

    /// Print the article list as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url, &self.api_key).with_timeouts(Timeouts {
            connect: Duration::from_millis(self.connect_timeout_ms),
            read: Duration::from_millis(self.read_timeout_ms),
        })
    }

    pub fn query(&self) -> QueryConfig {
        QueryConfig::new(&self.section, &self.author, self.order_by)
    }
}
