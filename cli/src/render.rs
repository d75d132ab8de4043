//! Text and JSON rendering of a `Feed`.

use std::fmt::Write;

use news_core::{Article, Feed};

/// One article as a block of lines: title, labels, date and time, URL.
pub fn article(a: &Article) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", a.title);
    let _ = writeln!(out, "  {} | {}", a.author_label(), a.section_label());
    match (a.display_date(), a.display_time()) {
        (Some(date), Some(time)) => {
            let _ = writeln!(out, "  {date} {time}");
        }
        _ => {
            let _ = writeln!(out, "  {}", a.published_at);
        }
    }
    let _ = writeln!(out, "  {}", a.url);
    out
}

/// The whole feed as text: articles separated by blank lines, or the
/// empty-state message.
pub fn text(feed: &Feed) -> String {
    match feed.message() {
        Some(message) => format!("{message}\n"),
        None => feed
            .articles()
            .iter()
            .map(article)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// The feed's articles as a JSON array. Empty states print `[]`.
pub fn json(feed: &Feed) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(feed.articles())
}
