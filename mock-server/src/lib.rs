use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 50;
const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "webTitle")]
    pub web_title: String,
}

impl Contributor {
    pub fn new(slug: &str, name: &str) -> Self {
        Self {
            id: format!("profile/{slug}"),
            kind: "contributor".to_string(),
            web_title: name.to_string(),
        }
    }
}

/// An article held by the mock, with the fields the search API exposes plus
/// a view count used for most-viewed ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredArticle {
    pub id: String,
    pub section_id: String,
    pub section_name: String,
    pub web_publication_date: String,
    pub web_title: String,
    pub web_url: String,
    pub contributors: Vec<Contributor>,
    pub views: u32,
}

/// One element of `response.results`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub section_id: String,
    pub section_name: String,
    pub web_publication_date: String,
    pub web_title: String,
    pub web_url: String,
    pub api_url: String,
    pub is_hosted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Contributor>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub section: Option<String>,
    pub tag: Option<String>,
    #[serde(rename = "order-by")]
    pub order_by: Option<String>,
    #[serde(rename = "show-tags")]
    pub show_tags: Option<String>,
    #[serde(rename = "show-most-viewed")]
    pub show_most_viewed: Option<String>,
    #[serde(rename = "page-size")]
    pub page_size: Option<usize>,
    #[serde(rename = "api-key")]
    pub api_key: Option<String>,
}

pub type Db = Arc<Vec<StoredArticle>>;

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(articles: Vec<StoredArticle>) -> Router {
    let db: Db = Arc::new(articles);
    Router::new()
        .route("/search", get(search))
        .route("/slow/search", get(slow_search))
        .route("/broken/search", get(broken_search))
        .route("/empty/search", get(empty_search))
        .route("/truncated/search", get(truncated_search))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Five articles across three sections; two by the same contributor and one
/// with no contributor at all.
pub fn seed() -> Vec<StoredArticle> {
    fn article(
        section: (&str, &str),
        slug: &str,
        date: &str,
        title: &str,
        contributors: Vec<Contributor>,
        views: u32,
    ) -> StoredArticle {
        let (section_id, section_name) = section;
        let id = format!("{section_id}/{slug}");
        StoredArticle {
            web_url: format!("https://www.theguardian.com/{id}"),
            id,
            section_id: section_id.to_string(),
            section_name: section_name.to_string(),
            web_publication_date: date.to_string(),
            web_title: title.to_string(),
            contributors,
            views,
        }
    }

    let bradshaw = || Contributor::new("peterbradshaw", "Peter Bradshaw");
    vec![
        article(
            ("film", "Film"),
            "2018/mar/01/annihilation-review-natalie-portman",
            "2018-03-01T12:34:56Z",
            "Annihilation review – Natalie Portman leads a mind-bending trip",
            vec![bradshaw()],
            900,
        ),
        article(
            ("film", "Film"),
            "2018/mar/05/the-shape-of-water-wins-best-picture",
            "2018-03-05T04:10:00Z",
            "The Shape of Water wins best picture at the Oscars",
            Vec::new(),
            1500,
        ),
        article(
            ("music", "Music"),
            "2018/feb/09/black-panther-the-album-review",
            "2018-02-09T11:00:02Z",
            "Black Panther: The Album review – Kendrick Lamar's stunning curation",
            vec![Contributor::new("alexispetridis", "Alexis Petridis")],
            300,
        ),
        article(
            ("politics", "Politics"),
            "2018/mar/02/brexit-speech-reaction",
            "2018-03-02T18:20:41Z",
            "Brexit speech: reaction from Westminster and Brussels",
            vec![Contributor::new("jessicaelgot", "Jessica Elgot")],
            1200,
        ),
        article(
            ("film", "Film"),
            "2018/feb/01/phantom-thread-review",
            "2018-02-01T09:00:00Z",
            "Phantom Thread review – Daniel Day-Lewis is magnificent",
            vec![bradshaw()],
            400,
        ),
    ]
}

fn to_result(article: &StoredArticle, show_contributors: bool) -> SearchResult {
    SearchResult {
        id: article.id.clone(),
        kind: "article".to_string(),
        section_id: article.section_id.clone(),
        section_name: article.section_name.clone(),
        web_publication_date: article.web_publication_date.clone(),
        web_title: article.web_title.clone(),
        web_url: article.web_url.clone(),
        api_url: format!("https://content.guardianapis.com/{}", article.id),
        is_hosted: false,
        tags: show_contributors.then(|| article.contributors.clone()),
    }
}

/// Filter, order, and page `articles` the way the search endpoint does.
pub fn select(articles: &[StoredArticle], params: &SearchParams) -> Vec<SearchResult> {
    let mut hits: Vec<&StoredArticle> = articles
        .iter()
        .filter(|a| params.section.as_deref().map_or(true, |s| a.section_id == s))
        .filter(|a| {
            params
                .tag
                .as_deref()
                .map_or(true, |t| a.contributors.iter().any(|c| c.id == t))
        })
        .collect();

    let most_viewed = params.show_most_viewed.as_deref() == Some("true");
    match params.order_by.as_deref() {
        Some("newest") => hits.sort_by(|a, b| b.web_publication_date.cmp(&a.web_publication_date)),
        Some("oldest") => hits.sort_by(|a, b| a.web_publication_date.cmp(&b.web_publication_date)),
        Some("relevance") if most_viewed => hits.sort_by(|a, b| b.views.cmp(&a.views)),
        _ => {}
    }

    let show_contributors = params.show_tags.as_deref() == Some("contributor");
    hits.into_iter()
        .take(params.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .map(|a| to_result(a, show_contributors))
        .collect()
}

fn envelope(results: Vec<SearchResult>, page_size: usize, order_by: &str) -> serde_json::Value {
    json!({
        "response": {
            "status": "ok",
            "userTier": "developer",
            "total": results.len(),
            "startIndex": 1,
            "pageSize": page_size,
            "currentPage": 1,
            "pages": 1,
            "orderBy": order_by,
            "results": results,
        }
    })
}

fn api_error(status: StatusCode, message: &str) -> Response {
    let body = json!({"response": {"status": "error", "message": message}});
    (status, Json(body)).into_response()
}

async fn search(State(db): State<Db>, Query(params): Query<SearchParams>) -> Response {
    if params.api_key.as_deref().map_or(true, str::is_empty) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
            .into_response();
    }
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return api_error(
            StatusCode::BAD_REQUEST,
            "page-size must be an integer between 1 and 50",
        );
    }
    let order_by = params.order_by.clone().unwrap_or_else(|| "newest".to_string());
    let results = select(&db, &params);
    Json(envelope(results, page_size, &order_by)).into_response()
}

async fn slow_search(state: State<Db>, params: Query<SearchParams>) -> Response {
    tokio::time::sleep(SLOW_DELAY).await;
    search(state, params).await
}

async fn broken_search() -> (StatusCode, &'static str) {
    (StatusCode::OK, r#"{"response": {"results": ["#)
}

async fn empty_search() -> StatusCode {
    StatusCode::OK
}

/// Three results, the second without `webUrl`.
async fn truncated_search(State(db): State<Db>) -> Json<serde_json::Value> {
    let params = SearchParams {
        show_tags: Some("contributor".to_string()),
        ..SearchParams::default()
    };
    let mut results: Vec<serde_json::Value> = select(&db, &params)
        .into_iter()
        .take(3)
        .filter_map(|r| serde_json::to_value(r).ok())
        .collect();
    if let Some(serde_json::Value::Object(second)) = results.get_mut(1) {
        second.remove("webUrl");
    }
    Json(json!({"response": {"status": "ok", "results": results}}))
}
