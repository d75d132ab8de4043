//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use news_core::{ApiError, Article, Feed, FetchPipeline, ParsedArticles};

/// Opaque handle to a search pipeline. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiNewsClient {
    pub(crate) inner: FetchPipeline,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are
/// dropped rather than failing the whole call.
pub(crate) fn c_string(s: impl Into<String>) -> *mut c_char {
    let mut s = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

/// Leak `items` as a C array. Empty vectors become null.
fn into_raw_array<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let boxed = items.into_boxed_slice();
    let len = boxed.len() as u32;
    (Box::into_raw(boxed) as *mut T, len)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// Built by `news_build_search`. The C caller executes the request and
/// passes the response back through `news_parse_search`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: news_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_array(headers);
        Box::into_raw(Box::new(FfiHttpRequest {
            url: c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing the request,
/// then passes a pointer to `news_parse_search`. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Article payload
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiArticle {
    pub title: *mut c_char,
    pub author: *mut c_char,
    pub section: *mut c_char,
    /// ISO-8601 timestamp as sent by the API.
    pub published_at: *mut c_char,
    pub url: *mut c_char,
}

impl FfiArticle {
    fn from_core(article: Article) -> Self {
        FfiArticle {
            title: c_string(article.title),
            author: c_string(article.author),
            section: c_string(article.section),
            published_at: c_string(article.published_at),
            url: c_string(article.url),
        }
    }
}

/// Articles in source order. `items` is null when `len` is 0.
#[repr(C)]
pub struct FfiArticleList {
    pub items: *mut FfiArticle,
    pub len: u32,
}

impl FfiArticleList {
    pub(crate) fn from_core(articles: Vec<Article>) -> *mut Self {
        let items = articles.into_iter().map(FfiArticle::from_core).collect();
        let (items, len) = into_raw_array(items);
        Box::into_raw(Box::new(FfiArticleList { items, len }))
    }
}

// ---------------------------------------------------------------------------
// Search result
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiSearchResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    Network = 2,
    HttpStatus = 3,
    MalformedResponse = 4,
    EmptyBody = 5,
    Panic = 6,
    NullArg = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
            ApiError::Network(_) => FfiErrorCode::Network,
            ApiError::HttpStatus(_) => FfiErrorCode::HttpStatus,
            ApiError::MalformedResponse(_) => FfiErrorCode::MalformedResponse,
            ApiError::EmptyBody => FfiErrorCode::EmptyBody,
        }
    }
}

/// Result envelope for `news_parse_search`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `articles`
/// points to the decoded list. `warning` is non-null when decoding stopped
/// at a malformed entry; `articles` then holds only the entries before it.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `articles` is null.
#[repr(C)]
pub struct FfiSearchResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub warning: *mut c_char,
    pub articles: *mut FfiArticleList,
}

impl FfiSearchResult {
    pub(crate) fn ok(parsed: ParsedArticles) -> *mut Self {
        let warning = match parsed.warning {
            Some(w) => c_string(w.to_string()),
            None => std::ptr::null_mut(),
        };
        Box::into_raw(Box::new(FfiSearchResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            warning,
            articles: FfiArticleList::from_core(parsed.articles),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = match err {
            ApiError::HttpStatus(status) => status,
            _ => 0,
        };
        Self::failure(FfiErrorCode::from(&err), http_status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiSearchResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            warning: std::ptr::null_mut(),
            articles: std::ptr::null_mut(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

/// Which screen state the host should render.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiFeedState {
    HasData = 0,
    NoData = 1,
    NoConnection = 2,
}

/// What `news_load` hands back.
///
/// `articles` is non-null only for `HasData`; `message` is the empty-state
/// text and is non-null for the other two states.
#[repr(C)]
pub struct FfiFeed {
    pub state: FfiFeedState,
    pub message: *mut c_char,
    pub articles: *mut FfiArticleList,
}

impl FfiFeed {
    pub(crate) fn from_core(feed: Feed) -> *mut Self {
        let message = match feed.message() {
            Some(m) => c_string(m),
            None => std::ptr::null_mut(),
        };
        let (state, articles) = match feed {
            Feed::HasData(articles) => (FfiFeedState::HasData, FfiArticleList::from_core(articles)),
            Feed::NoData => (FfiFeedState::NoData, std::ptr::null_mut()),
            Feed::NoConnection => (FfiFeedState::NoConnection, std::ptr::null_mut()),
        };
        Box::into_raw(Box::new(FfiFeed {
            state,
            message,
            articles,
        }))
    }
}
