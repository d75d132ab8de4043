//! Build → fetch → parse, and the feed handed to the presentation layer.
//!
//! # Design
//! `FetchPipeline` owns a `NewsClient` and an `HttpFetcher` and keeps no
//! state between calls. `run` keeps failures typed. `load` is the only place
//! where they are collapsed into the `Feed` a screen renders, and the only
//! place that logs them as user-visible degradations.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::client::NewsClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::fetcher::{fetch_body, HttpFetcher, UreqFetcher};
use crate::parser::{parse_articles, ParsedArticles};
use crate::query::redacted;
use crate::types::{Article, QueryConfig};

pub const NO_DATA_MESSAGE: &str = "No data to display";
pub const NO_CONNECTION_MESSAGE: &str = "No internet connection";

/// What the presentation layer gets back from one load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "articles", rename_all = "snake_case")]
pub enum Feed {
    HasData(Vec<Article>),
    /// A failure of any kind, or a successful search with no matches.
    NoData,
    /// The host reported no network; nothing was requested.
    NoConnection,
}

impl Feed {
    pub fn has_data(&self) -> bool {
        matches!(self, Feed::HasData(_))
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            Feed::HasData(articles) => articles,
            Feed::NoData | Feed::NoConnection => &[],
        }
    }

    /// Empty-state text, or `None` when there is a list to show.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Feed::HasData(_) => None,
            Feed::NoData => Some(NO_DATA_MESSAGE),
            Feed::NoConnection => Some(NO_CONNECTION_MESSAGE),
        }
    }
}

impl From<Vec<Article>> for Feed {
    fn from(articles: Vec<Article>) -> Self {
        if articles.is_empty() {
            Feed::NoData
        } else {
            Feed::HasData(articles)
        }
    }
}

/// Stateless composition of `NewsClient` and an `HttpFetcher`.
#[derive(Debug, Clone)]
pub struct FetchPipeline<F = UreqFetcher> {
    client: NewsClient,
    fetcher: F,
}

impl FetchPipeline<UreqFetcher> {
    /// Pipeline over a `ureq` fetcher using the configured timeouts.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = NewsClient::new(&config.base_url, &config.api_key)?;
        Ok(Self::new(client, UreqFetcher::new(config.timeouts)))
    }
}

impl<F: HttpFetcher> FetchPipeline<F> {
    pub fn new(client: NewsClient, fetcher: F) -> Self {
        Self { client, fetcher }
    }

    pub fn client(&self) -> &NewsClient {
        &self.client
    }

    /// Like `run`, but keeps the truncation warning for callers that want it.
    pub fn search(&self, config: &QueryConfig) -> Result<ParsedArticles, ApiError> {
        let request = self.client.build_search(config);
        let body = fetch_body(&self.fetcher, &request)?;
        parse_articles(&body)
    }

    /// One fetch. Partial results from a truncated body are returned as
    /// `Ok`; the truncation is logged.
    #[instrument(
        level = "info",
        skip_all,
        fields(section = %config.section, author = %config.author, order_by = %config.order_by)
    )]
    pub fn run(&self, config: &QueryConfig) -> Result<Vec<Article>, ApiError> {
        let parsed = self.search(config)?;
        if let Some(warning) = &parsed.warning {
            warn!(
                url = %redacted(&self.client.search_url(config)),
                kept = parsed.articles.len(),
                error = %warning,
                "search results truncated"
            );
        }
        info!(count = parsed.articles.len(), "search complete");
        Ok(parsed.into_articles())
    }

    /// Run the search and collapse the outcome into a `Feed`.
    ///
    /// `connected` is the host's view of the network. When it is `false` no
    /// request is made.
    pub fn load(&self, config: &QueryConfig, connected: bool) -> Feed {
        if !connected {
            info!("no network connection; skipping fetch");
            return Feed::NoConnection;
        }
        match self.run(config) {
            Ok(articles) => Feed::from(articles),
            Err(e) => {
                let url = redacted(&self.client.search_url(config));
                match e {
                    ApiError::HttpStatus(status) => {
                        error!(stage = e.stage(), %url, status, error = %e, "feed load failed")
                    }
                    _ => error!(stage = e.stage(), %url, error = %e, "feed load failed"),
                }
                Feed::NoData
            }
        }
    }
}

impl<F> FetchPipeline<F>
where
    F: HttpFetcher + Send + Sync + 'static,
{
    /// Run `load` on the blocking pool.
    ///
    /// Dropping or aborting the handle discards the feed; the request itself
    /// runs to completion or timeout.
    pub fn spawn(self: &Arc<Self>, config: QueryConfig, connected: bool) -> JoinHandle<Feed> {
        let pipeline = Arc::clone(self);
        tokio::task::spawn_blocking(move || pipeline.load(&config, connected))
    }
}
