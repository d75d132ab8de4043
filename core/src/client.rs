//! Stateless request builder and response parser for the search endpoint.
//!
//! # Design
//! `NewsClient` holds only the parsed base URL and API key and carries no
//! mutable state between calls. A search is split into `build_search`, which
//! produces an `HttpRequest`, and `parse_search`, which consumes an
//! `HttpResponse`. Whoever sits between the two executes the round-trip:
//! `FetchPipeline` with an `HttpFetcher`, or a foreign host through the FFI.

use url::Url;

use crate::error::ApiError;
use crate::fetcher::check_status;
use crate::http::{HttpRequest, HttpResponse};
use crate::parser::{parse_articles, ParsedArticles};
use crate::query::QueryBuilder;
use crate::types::QueryConfig;

/// Synchronous, stateless client for the search endpoint.
#[derive(Debug, Clone)]
pub struct NewsClient {
    query: QueryBuilder,
}

impl NewsClient {
    /// Fails only if `base_url` is not an absolute URL.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        Ok(Self {
            query: QueryBuilder::new(base_url, api_key)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        self.query.base_url()
    }

    pub fn search_url(&self, config: &QueryConfig) -> Url {
        self.query.build(config)
    }

    pub fn build_search(&self, config: &QueryConfig) -> HttpRequest {
        HttpRequest {
            url: self.search_url(config).into(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Check the status, then decode the body. A non-200 response is
    /// rejected without looking at the body.
    pub fn parse_search(&self, response: HttpResponse) -> Result<ParsedArticles, ApiError> {
        check_status(&response)?;
        parse_articles(&response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderBy;

    fn client() -> NewsClient {
        NewsClient::new("http://localhost:3000/search", "test").unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_search_produces_get_with_json_accept() {
        let req = client().build_search(&QueryConfig::new("film", "", OrderBy::Newest));
        assert_eq!(
            req.url,
            "http://localhost:3000/search?format=json&page-size=20&show-tags=contributor&api-key=test&section=film&order-by=newest"
        );
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn parse_search_success() {
        let body = r#"{"response":{"results":[{"webPublicationDate":"2018-03-01T12:34:56Z","webTitle":"T","sectionName":"Film","webUrl":"https://x"}]}}"#;
        let parsed = client().parse_search(response(200, body)).unwrap();
        assert_eq!(parsed.articles.len(), 1);
        assert_eq!(parsed.articles[0].author, "No Info");
    }

    #[test]
    fn parse_search_not_found_skips_body() {
        let err = client().parse_search(response(404, "not json at all")).unwrap_err();
        assert_eq!(err, ApiError::HttpStatus(404));
    }

    #[test]
    fn parse_search_server_error() {
        let err = client().parse_search(response(500, "")).unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus(500)));
    }

    #[test]
    fn parse_search_empty_body() {
        let err = client().parse_search(response(200, "")).unwrap_err();
        assert_eq!(err, ApiError::EmptyBody);
    }

    #[test]
    fn parse_search_bad_json() {
        let err = client().parse_search(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn new_rejects_relative_base() {
        let err = NewsClient::new("/search", "test").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }
}
