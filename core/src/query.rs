//! Search URL construction.
//!
//! # Design
//! The base URL is parsed once, in `QueryBuilder::new`, so `build` itself
//! cannot fail. Parameters are appended in a fixed order (static ones,
//! `section`, `tag`, then the sort parameters) which keeps the output stable
//! for tests and logs.

use url::Url;

use crate::config::PAGE_SIZE;
use crate::error::ApiError;
use crate::types::{OrderBy, QueryConfig};

/// Namespace the API uses for contributor tags.
const CONTRIBUTOR_TAG_PREFIX: &str = "profile/";

/// Turns a `QueryConfig` into a fully-qualified search URL.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    base: Url,
    api_key: String,
}

impl QueryBuilder {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{base_url:?}: not a hierarchical URL")));
        }
        Ok(Self {
            base,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn build(&self, config: &QueryConfig) -> Url {
        let mut url = self.base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("format", "json")
                .append_pair("page-size", &PAGE_SIZE.to_string())
                .append_pair("show-tags", "contributor")
                .append_pair("api-key", &self.api_key);

            let section = normalize(&config.section);
            if !section.is_empty() {
                pairs.append_pair("section", &section);
            }

            let author = normalize(&config.author);
            if !author.is_empty() {
                pairs.append_pair("tag", &format!("{CONTRIBUTOR_TAG_PREFIX}{author}"));
            }

            match config.order_by {
                OrderBy::Default => {}
                OrderBy::Newest => {
                    pairs.append_pair("order-by", "newest");
                }
                OrderBy::MostViewed => {
                    pairs
                        .append_pair("show-most-viewed", "true")
                        .append_pair("order-by", "relevance");
                }
            }
        }
        url
    }
}

/// Copy of `url` with the `api-key` value masked, for logs.
pub fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "api-key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    let mut out = url.clone();
    if !pairs.is_empty() {
        out.query_pairs_mut().clear().extend_pairs(pairs);
    }
    out
}

/// Drop every whitespace character and lower-case the rest.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://content.guardianapis.com/search";

    fn builder() -> QueryBuilder {
        QueryBuilder::new(BASE, "test-key").unwrap()
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn value<'a>(pairs: &'a [(String, String)], key: &str) -> Vec<&'a str> {
        pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    #[test]
    fn unfiltered_query_carries_only_static_parameters() {
        let url = builder().build(&QueryConfig::default());
        assert_eq!(
            url.as_str(),
            "https://content.guardianapis.com/search?format=json&page-size=20&show-tags=contributor&api-key=test-key"
        );
    }

    #[test]
    fn section_and_newest_are_appended_in_order() {
        let config = QueryConfig::new("film", "", OrderBy::Newest);
        let url = builder().build(&config);
        assert!(url.as_str().contains("section=film&order-by=newest"));
        assert!(value(&pairs(&url), "tag").is_empty());
    }

    #[test]
    fn author_is_prefixed_with_profile_namespace() {
        let config = QueryConfig::new("", "Peter Bradshaw", OrderBy::Default);
        let p = pairs(&builder().build(&config));
        assert_eq!(value(&p, "tag"), vec!["profile/peterbradshaw"]);
        assert!(value(&p, "section").is_empty());
    }

    #[test]
    fn most_viewed_sets_both_parameters() {
        let config = QueryConfig::new("", "", OrderBy::MostViewed);
        let p = pairs(&builder().build(&config));
        assert_eq!(value(&p, "show-most-viewed"), vec!["true"]);
        assert_eq!(value(&p, "order-by"), vec!["relevance"]);
    }

    #[test]
    fn all_filters_combine() {
        let config = QueryConfig::new("Music", "Alexis Petridis", OrderBy::MostViewed);
        let p = pairs(&builder().build(&config));
        assert_eq!(value(&p, "section"), vec!["music"]);
        assert_eq!(value(&p, "tag"), vec!["profile/alexispetridis"]);
        assert_eq!(value(&p, "show-most-viewed"), vec!["true"]);
        assert_eq!(value(&p, "order-by"), vec!["relevance"]);
        assert_eq!(p.len(), 8);
    }

    #[test]
    fn normalization_makes_equivalent_configs_build_equal_urls() {
        let b = builder();
        let messy = QueryConfig::new("Film ", " Peter\tBradshaw\n", OrderBy::Newest);
        let clean = QueryConfig::new("film", "peterbradshaw", OrderBy::Newest);
        assert_eq!(b.build(&messy), b.build(&clean));
    }

    #[test]
    fn whitespace_only_filters_are_omitted() {
        let config = QueryConfig::new("   ", "\t", OrderBy::Default);
        assert_eq!(builder().build(&config), builder().build(&QueryConfig::default()));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(" Film Reviews ");
        assert_eq!(once, "filmreviews");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn invalid_base_url_is_rejected_at_construction() {
        let err = QueryBuilder::new("not a url", "k").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = QueryBuilder::new("mailto:desk@example.com", "k").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn redacted_masks_only_the_api_key() {
        let url = builder().build(&QueryConfig::new("film", "", OrderBy::Default));
        let masked = redacted(&url);
        let p = pairs(&masked);
        assert_eq!(value(&p, "api-key"), vec!["***"]);
        assert_eq!(value(&p, "section"), vec!["film"]);
        assert!(!masked.as_str().contains("test-key"));
    }

    #[test]
    fn existing_base_query_is_preserved() {
        let b = QueryBuilder::new("http://localhost:3000/search?q=debate", "k").unwrap();
        let p = pairs(&b.build(&QueryConfig::default()));
        assert_eq!(p[0], ("q".to_string(), "debate".to_string()));
        assert_eq!(value(&p, "format"), vec!["json"]);
    }
}
