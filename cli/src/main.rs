//! # newsfeed
//!
//! Terminal presenter for the news pipeline: reads filters from the command
//! line, checks connectivity, runs one fetch off the main task, and prints
//! the resulting feed.
//!
//! ```sh
//! RUST_LOG=news_core=debug newsfeed --section film --order-by newest
//! ```

use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use news_core::{connectivity, FetchPipeline};
use tracing::{debug, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod render;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Logs go to stderr so `--json` output stays machine-readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    debug!(section = %args.section, author = %args.author, order_by = %args.order_by, "parsed CLI arguments");

    let config = args.client_config();
    let pipeline = Arc::new(FetchPipeline::from_config(&config)?);

    let connected = if args.offline {
        false
    } else {
        let base = pipeline.client().base_url().clone();
        let timeout = config.timeouts.connect;
        tokio::task::spawn_blocking(move || connectivity::probe(&base, timeout)).await?
    };
    info!(connected, "connectivity checked");

    let feed = pipeline.spawn(args.query(), connected).await?;

    if args.json {
        println!("{}", render::json(&feed)?);
    } else {
        print!("{}", render::text(&feed));
    }
    Ok(())
}
