use std::path::Path;

use anyhow::Context;
use scraper::{Html, Selector};

/// One entry from the browser's bookmark export.
#[derive(Debug, Clone)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

/// Parse an exported bookmarks HTML file into (title, url) pairs.
///
/// Browser exports are Netscape-format HTML where every bookmark is an
/// `<a href=...>` anchor. Anchors without an href are skipped.
pub fn parse_bookmarks(path: &Path) -> anyhow::Result<Vec<Bookmark>> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("reading bookmarks file {}", path.display()))?;
    Ok(parse_bookmarks_html(&html))
}

fn parse_bookmarks_html(html: &str) -> Vec<Bookmark> {
    let doc = Html::parse_document(html);
    let anchors = Selector::parse("a").unwrap();

    doc.select(&anchors)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            let title = a.text().collect::<String>().trim().to_string();
            Some(Bookmark {
                title,
                url: href.to_string(),
            })
        })
        .collect()
}
