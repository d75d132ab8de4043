//! Search response decoding.
//!
//! # Design
//! The envelope (`response` → `results`) is walked as a `serde_json::Value`
//! so that a broken document and a broken entry can be told apart. A broken
//! document is an `Err`. A broken entry stops the loop: everything parsed
//! before it is returned, and the entry's error rides along as a warning.
//! Entries after the bad one are not looked at.
//!
//! Required fields accept any JSON scalar and keep its text form, so
//! `"webTitle": 1984` reads as `"1984"`. Only a missing key, `null`, or an
//! array/object value makes an entry bad.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::types::{Article, NO_AUTHOR};

/// Articles decoded from one response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArticles {
    pub articles: Vec<Article>,
    /// Set when decoding stopped early at a malformed entry. `articles` then
    /// holds only the entries that preceded it.
    pub warning: Option<ApiError>,
}

impl ParsedArticles {
    pub fn is_complete(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_articles(self) -> Vec<Article> {
        self.articles
    }
}

#[derive(Deserialize)]
struct ResultEntry {
    #[serde(rename = "webPublicationDate", deserialize_with = "scalar_string")]
    web_publication_date: String,
    #[serde(rename = "webTitle", deserialize_with = "scalar_string")]
    web_title: String,
    #[serde(rename = "sectionName", deserialize_with = "scalar_string")]
    section_name: String,
    #[serde(rename = "webUrl", deserialize_with = "scalar_string")]
    web_url: String,
    #[serde(default)]
    tags: Option<Vec<Value>>,
}

/// Text form of a string, number, or boolean.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| D::Error::custom(format!("expected a scalar, got {value}")))
}

impl ResultEntry {
    fn into_article(self) -> Result<Article, String> {
        let author = match self.tags.as_deref().and_then(<[Value]>::first) {
            Some(tag) => tag
                .get("webTitle")
                .and_then(scalar_text)
                .ok_or("first tag has no scalar `webTitle`")?,
            None => NO_AUTHOR.to_string(),
        };
        Ok(Article {
            title: self.web_title,
            author,
            section: self.section_name,
            published_at: self.web_publication_date,
            url: self.web_url,
        })
    }
}

/// Decode a search response body into articles.
pub fn parse_articles(body: &str) -> Result<ParsedArticles, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let root: Value = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {e}")))?;
    let response = root
        .get("response")
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::MalformedResponse("missing `response` object".to_string()))?;
    let results = response
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::MalformedResponse("missing `results` array".to_string()))?;

    let mut articles = Vec::with_capacity(results.len());
    for (index, raw) in results.iter().enumerate() {
        let decoded = ResultEntry::deserialize(raw)
            .map_err(|e| e.to_string())
            .and_then(ResultEntry::into_article);
        match decoded {
            Ok(article) => articles.push(article),
            Err(reason) => {
                let error = ApiError::MalformedResponse(format!("result {index}: {reason}"));
                debug!(
                    index,
                    kept = articles.len(),
                    skipped = results.len() - index,
                    error = %error,
                    "truncating results at malformed entry"
                );
                return Ok(ParsedArticles {
                    articles,
                    warning: Some(error),
                });
            }
        }
    }

    debug!(count = articles.len(), "parsed search results");
    Ok(ParsedArticles {
        articles,
        warning: None,
    })
}
