use regex::Regex;
use url::Url;

use super::Classification;

pub const DEFAULT_CONTENT_TYPE: &str = "other";
pub const DEFAULT_DOMAIN_CATEGORY: &str = "other";
pub const DEFAULT_THEME: &str = "general";

/// Ordered label -> keyword tables driving the heuristic classifier.
///
/// Order matters: the first label with a matching keyword wins, so the
/// tables are sequences, not maps.
pub struct KeywordTables {
    pub content_types: Vec<(String, Vec<String>)>,
    pub domain_categories: Vec<(String, Vec<String>)>,
    pub themes: Vec<(String, Vec<String>)>,
}

fn table(entries: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    entries
        .iter()
        .map(|(label, words)| {
            (
                label.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            content_types: table(&[
                ("video", &["youtube.com", "vimeo.com", "video"]),
                ("article", &["blog", "news", "article"]),
                ("tool", &["tool", "software", "app"]),
                ("service", &["service", "platform"]),
            ]),
            domain_categories: table(&[
                ("crypto", &["crypto", "blockchain", "bitcoin", "ethereum"]),
                (
                    "self-improvement",
                    &["self improvement", "self-help", "mindfulness"],
                ),
                ("education", &["education", "tutorial", "learn", "course"]),
            ]),
            themes: table(&[
                ("Python", &["python", "django", "flask", "numpy"]),
                (
                    "women's psychology",
                    &["women", "psychology", "relationship"],
                ),
                (
                    "cryptocurrency projects",
                    &["crypto", "token", "blockchain"],
                ),
            ]),
        }
    }
}

/// Keyword-table classifier. Total: every input gets a label, falling back
/// to other/other/general when nothing matches.
pub struct HeuristicClassifier {
    content_types: Vec<(String, Vec<String>)>,
    domain_categories: Vec<(String, Vec<String>)>,
    // Theme keywords are pre-compiled to whole-word regexes.
    themes: Vec<(String, Vec<Regex>)>,
}

impl HeuristicClassifier {
    pub fn new(tables: KeywordTables) -> Self {
        let themes = tables
            .themes
            .into_iter()
            .map(|(label, words)| {
                let patterns = words
                    .iter()
                    .map(|w| {
                        Regex::new(&format!(r"(?i)\b{}\b", regex::escape(w)))
                            .expect("escaped keyword is a valid pattern")
                    })
                    .collect();
                (label, patterns)
            })
            .collect();

        Self {
            content_types: tables.content_types,
            domain_categories: tables.domain_categories,
            themes,
        }
    }

    pub fn classify(&self, url: &str, text: &str) -> Classification {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
            .unwrap_or_default();
        let text_lower = text.to_lowercase();

        Classification {
            content_type: first_match(&self.content_types, &host, &text_lower)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            domain_category: first_match(&self.domain_categories, &host, &text_lower)
                .unwrap_or_else(|| DEFAULT_DOMAIN_CATEGORY.to_string()),
            theme: self.first_theme(text),
        }
    }

    /// Whole-word matching: stricter than the substring tables so short
    /// keywords like "crypto" don't fire inside longer words.
    fn first_theme(&self, text: &str) -> String {
        self.themes
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(text)))
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    }
}

/// First label whose keyword appears as a substring in the host or the
/// lower-cased page text. Table order is the tie-break.
fn first_match(
    table: &[(String, Vec<String>)],
    host: &str,
    text_lower: &str,
) -> Option<String> {
    table
        .iter()
        .find(|(_, words)| {
            words
                .iter()
                .any(|w| host.contains(w.as_str()) || text_lower.contains(w.as_str()))
        })
        .map(|(label, _)| label.clone())
}

// ── Tests ──
