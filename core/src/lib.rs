//! Fetch-and-parse core for a Guardian news feed.
//!
//! # Overview
//! Turns the user's filters into a search URL, performs one blocking GET with
//! fixed timeouts, and decodes the JSON into a flat list of `Article`s. The
//! presentation layer receives a `Feed`: a list, "no data", or "no
//! connection".
//!
//! # Design
//! - `NewsClient` is stateless: `build_search` produces a plain-data request,
//!   `parse_search` consumes a plain-data response. A foreign host can run
//!   the round-trip itself (see the FFI crate).
//! - `FetchPipeline` composes the client with an `HttpFetcher` for the
//!   in-process path and is the only place failures collapse into `Feed`.
//! - Failures stay typed (`ApiError`) up to that boundary. A malformed entry
//!   truncates the list and surfaces as a warning rather than an error.

pub mod client;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod types;

pub use client::NewsClient;
pub use config::{ClientConfig, Timeouts};
pub use error::ApiError;
pub use fetcher::{HttpFetcher, UreqFetcher};
pub use http::{HttpRequest, HttpResponse};
pub use parser::{parse_articles, ParsedArticles};
pub use pipeline::{Feed, FetchPipeline};
pub use query::QueryBuilder;
pub use types::{Article, OrderBy, QueryConfig};
