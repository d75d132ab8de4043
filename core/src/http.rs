//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe a search request and its response as plain data.
//! `NewsClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network, so a host with its own HTTP stack (the
//! mobile app, through the FFI crate) can run the round-trip itself. The
//! in-process path goes through `fetcher::HttpFetcher` instead.
//!
//! All fields use owned types so values can cross FFI boundaries without
//! lifetime concerns.

/// A GET request described as plain data. The search API takes no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// `body` is empty for non-200 responses read by `UreqFetcher`, which never
/// pulls the body of a failed request. Parsing ignores `headers`, so
/// `UreqFetcher` leaves them empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
