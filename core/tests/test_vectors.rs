//! Verify `build_search`/`parse_search` against JSON vectors in `test-vectors/`.
//!
//! Each case gives a filter configuration, the request it must build, a
//! simulated response, and either the articles it must parse to or the error
//! it must fail with.

use news_core::{ApiError, Article, HttpResponse, NewsClient, QueryConfig};

const BASE_URL: &str = "http://localhost:3000/search";

fn client() -> NewsClient {
    NewsClient::new(BASE_URL, "test").unwrap()
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::InvalidUrl(_) => "InvalidUrl",
        ApiError::Network(_) => "Network",
        ApiError::HttpStatus(_) => "HttpStatus",
        ApiError::MalformedResponse(_) => "MalformedResponse",
        ApiError::EmptyBody => "EmptyBody",
    }
}

#[test]
fn search_test_vectors() {
    let raw = include_str!("../../test-vectors/search.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: QueryConfig = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_search(&input);
        assert_eq!(
            req.url,
            format!("{BASE_URL}{}", expected_req["query"].as_str().unwrap()),
            "{name}: url"
        );

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_search(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(error_kind(&err), expected_error.as_str().unwrap(), "{name}: error");
        } else {
            let parsed = result.unwrap();
            let expected: Vec<Article> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(parsed.articles, expected, "{name}: parsed result");

            match case.get("expected_warning").and_then(|w| w.as_str()) {
                Some(kind) => {
                    let warning = parsed.warning.as_ref().expect("expected a warning");
                    assert_eq!(error_kind(warning), kind, "{name}: warning");
                }
                None => assert!(parsed.is_complete(), "{name}: unexpected warning"),
            }
        }
    }
}

#[test]
fn equivalent_filters_build_identical_requests() {
    let c = client();
    let messy: QueryConfig =
        serde_json::from_value(serde_json::json!({"section": " Film ", "author": "Peter  Bradshaw"}))
            .unwrap();
    let clean: QueryConfig =
        serde_json::from_value(serde_json::json!({"section": "film", "author": "peterbradshaw"}))
            .unwrap();
    assert_eq!(c.build_search(&messy), c.build_search(&clean));
}
