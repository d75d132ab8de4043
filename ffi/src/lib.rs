//! C-ABI wrapper around `news-core`.
//!
//! # Overview
//! Exposes the search pipeline through `extern "C"` functions so the mobile
//! host can either run the HTTP round-trip itself (`news_build_search` →
//! its own HTTP stack → `news_parse_search`) or let the library do the whole
//! fetch (`news_load`).
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Filters are passed as three nullable C strings. Null `section` or
//!   `author` means unfiltered; null `order_by` means the API default.
//!   `order_by` takes the stored preference values `""`, `"newest"` and
//!   `"true"` (most viewed).
//! - The C caller owns all returned pointers and must call the matching
//!   `news_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::str::Utf8Error;

use news_core::{ApiError, ClientConfig, FetchPipeline, HttpResponse, OrderBy, QueryConfig};

use types::*;

/// Borrow a nullable C string. `Ok(None)` for null.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn opt_str<'a>(ptr: *const c_char) -> Result<Option<&'a str>, Utf8Error> {
    if ptr.is_null() {
        Ok(None)
    } else {
        unsafe { CStr::from_ptr(ptr) }.to_str().map(Some)
    }
}

/// Assemble a `QueryConfig` from C arguments. `None` if any argument is not
/// UTF-8 or `order_by` names no known sort mode.
///
/// # Safety
/// Each pointer must be null or a valid NUL-terminated string.
unsafe fn query_config(
    section: *const c_char,
    author: *const c_char,
    order_by: *const c_char,
) -> Option<QueryConfig> {
    let order_by = match unsafe { opt_str(order_by) }.ok()? {
        Some(raw) => raw.parse::<OrderBy>().ok()?,
        None => OrderBy::Default,
    };
    let section = unsafe { opt_str(section) }.ok()?.unwrap_or("");
    let author = unsafe { opt_str(author) }.ok()?.unwrap_or("");
    Some(QueryConfig::new(section, author, order_by))
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client for the search endpoint at `base_url`.
///
/// Returns null if either argument is null or not UTF-8, if `base_url` is
/// not an absolute URL, or if an internal panic occurs. The caller must free
/// the returned pointer with `news_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn news_client_new(
    base_url: *const c_char,
    api_key: *const c_char,
) -> *mut FfiNewsClient {
    catch_unwind(|| {
        let (Ok(Some(url)), Ok(Some(key))) =
            (unsafe { opt_str(base_url) }, unsafe { opt_str(api_key) })
        else {
            return std::ptr::null_mut();
        };
        match FetchPipeline::from_config(&ClientConfig::new(url, key)) {
            Ok(inner) => Box::into_raw(Box::new(FfiNewsClient { inner })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `news_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn news_client_free(client: *mut FfiNewsClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Host-executed search
// ---------------------------------------------------------------------------

/// Build the search request for the given filters.
///
/// Returns null if `client` is null, a filter is not UTF-8, or `order_by`
/// is not a known value. The caller must free the returned pointer with
/// `news_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn news_build_search(
    client: *const FfiNewsClient,
    section: *const c_char,
    author: *const c_char,
    order_by: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(config) = (unsafe { query_config(section, author, order_by) }) else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.client().build_search(&config))
    }))
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty; a body that is not UTF-8 is malformed.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = unsafe { opt_str(resp.body) }
        .map_err(|e| ApiError::MalformedResponse(format!("body is not UTF-8: {e}")))?
        .unwrap_or("")
        .to_string();
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Parse the response to a request built by `news_build_search`.
///
/// Never returns null. The caller must free the result with
/// `news_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn news_parse_search(
    client: *const FfiNewsClient,
    response: *const FfiHttpResponse,
) -> *mut FfiSearchResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiSearchResult::null_arg("client");
        }
        if response.is_null() {
            return FfiSearchResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let parsed =
            ffi_response_to_core(resp).and_then(|r| client.inner.client().parse_search(r));
        match parsed {
            Ok(parsed) => FfiSearchResult::ok(parsed),
            Err(e) => FfiSearchResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiSearchResult::panic("panic in news_parse_search"))
}

// ---------------------------------------------------------------------------
// In-process load
// ---------------------------------------------------------------------------

/// Fetch and parse on the calling thread, collapsing the outcome into a
/// feed state. Blocks for up to the connect plus read timeouts.
///
/// `connected` is the host's view of the network; when false nothing is
/// requested and the state is `NoConnection`.
///
/// Returns null if `client` is null, a filter is not UTF-8, `order_by` is
/// not a known value, or an internal panic occurs. The caller must free the
/// result with `news_free_feed`.
#[unsafe(no_mangle)]
pub extern "C" fn news_load(
    client: *const FfiNewsClient,
    section: *const c_char,
    author: *const c_char,
    order_by: *const c_char,
    connected: bool,
) -> *mut FfiFeed {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(config) = (unsafe { query_config(section, author, order_by) }) else {
            return std::ptr::null_mut();
        };
        FfiFeed::from_core(client.inner.load(&config, connected))
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `news_build_search`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn news_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe { boxed_slice(req.headers, req.headers_len) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiSearchResult` returned by `news_parse_search`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn news_free_result(result: *mut FfiSearchResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.warning);
        free_article_list(result.articles);
    });
}

/// Free an `FfiFeed` returned by `news_load`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn news_free_feed(feed: *mut FfiFeed) {
    if feed.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let feed = unsafe { Box::from_raw(feed) };
        free_c_string(feed.message);
        free_article_list(feed.articles);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn news_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

/// Reclaim an array leaked by `types::into_raw_array`.
///
/// # Safety
/// `ptr` and `len` must come from the same leaked boxed slice.
unsafe fn boxed_slice<T>(ptr: *mut T, len: u32) -> Box<[T]> {
    unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)) }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

fn free_article_list(list: *mut FfiArticleList) {
    if list.is_null() {
        return;
    }
    let list = unsafe { Box::from_raw(list) };
    if list.items.is_null() || list.len == 0 {
        return;
    }
    let items = unsafe { boxed_slice(list.items, list.len) };
    for a in items.iter() {
        free_c_string(a.title);
        free_c_string(a.author);
        free_c_string(a.section);
        free_c_string(a.published_at);
        free_c_string(a.url);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
