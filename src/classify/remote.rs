use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::heuristic::{DEFAULT_CONTENT_TYPE, DEFAULT_DOMAIN_CATEGORY, DEFAULT_THEME};
use super::Classification;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4o-mini";
// Prefix of page text sent per request, to cap cost and latency.
const MAX_TEXT_CHARS: usize = 2000;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Classifier backed by the OpenAI chat-completions API.
///
/// Constructed only when a credential is available; a missing key disables
/// the remote tier for the whole run rather than being re-checked per call.
pub struct RemoteClassifier {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl RemoteClassifier {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        Some(Self::new(api_key, API_URL.to_string()))
    }

    pub fn new(api_key: String, endpoint: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
        }
    }

    /// One classification request, no retry. Every failure mode collapses
    /// to `None` so the pipeline can fall back to the heuristic tier.
    pub async fn classify(&self, url: &str, text: &str) -> Option<Classification> {
        let snippet = truncate_chars(text, MAX_TEXT_CHARS);
        let prompt = format!(
            "Classify this web page.\n\nURL: {}\n\nPAGE TEXT:\n{}\n\n\
             Respond ONLY with a JSON object, no markdown:\n\
             {{\"content_type\": \"short label like video, article, tool\", \
             \"domain\": \"short label like crypto, education\", \
             \"theme\": \"short free-form topic label\"}}",
            url, snippet
        );

        let request = ChatRequest {
            model: MODEL.to_string(),
            max_tokens: 100,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("remote classifier request failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "remote classifier error for {}: status {}",
                url,
                response.status()
            );
            return None;
        }

        let body: ChatResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                warn!("remote classifier returned malformed body for {}: {}", url, e);
                return None;
            }
        };

        let content = &body.choices.first()?.message.content;
        let parsed = parse_classification(content);
        if parsed.is_none() {
            debug!("remote classifier response not parseable for {}: {}", url, content);
        }
        parsed
    }
}

/// Parse the model's reply into a Classification.
///
/// content_type and domain are normalized to lower case; theme is kept
/// verbatim. Missing fields take the same defaults as the heuristic path.
fn parse_classification(text: &str) -> Option<Classification> {
    let json: serde_json::Value = serde_json::from_str(strip_fence(text).trim()).ok()?;
    let obj = json.as_object()?;

    let field = |key: &str| obj.get(key).and_then(|v| v.as_str());

    Some(Classification {
        content_type: field("content_type")
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
        domain_category: field("domain")
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| DEFAULT_DOMAIN_CATEGORY.to_string()),
        theme: field("theme")
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_THEME.to_string()),
    })
}

/// Models wrap JSON in ``` fences often enough that we strip one if present.
fn strip_fence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        trimmed
            .lines()
            .skip(1)
            .take_while(|l| !l.starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        trimmed.to_string()
    }
}

/// Char-boundary-safe prefix of at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn normalizes_fields() {
        let c = parse_classification(
            r#"{"content_type":"Video","domain":"Education","theme":"Tutorials"}"#,
        )
        .unwrap();
        assert_eq!(c.content_type, "video");
        assert_eq!(c.domain_category, "education");
        assert_eq!(c.theme, "Tutorials");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = parse_classification(r#"{"theme":"Rust"}"#).unwrap();
        assert_eq!(c.content_type, "other");
        assert_eq!(c.domain_category, "other");
        assert_eq!(c.theme, "Rust");

        let c = parse_classification("{}").unwrap();
        assert_eq!(c.theme, "general");
    }

    #[test]
    fn fenced_json_is_accepted() {
        let c = parse_classification(
            "```json\n{\"content_type\":\"Article\",\"domain\":\"News\",\"theme\":\"Politics\"}\n```",
        )
        .unwrap();
        assert_eq!(c.content_type, "article");
        assert_eq!(c.domain_category, "news");
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_classification("I cannot classify this page.").is_none());
        assert!(parse_classification("[1, 2, 3]").is_none());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(3000);
        let cut = truncate_chars(&text, MAX_TEXT_CHARS);
        assert_eq!(cut.chars().count(), MAX_TEXT_CHARS);
        let short = "abc";
        assert_eq!(truncate_chars(short, MAX_TEXT_CHARS), "abc");
    }

    #[tokio::test]
    async fn service_response_round_trip() {
        let server = MockServer::start().await;
        let reply = serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"content_type\":\"Video\",\"domain\":\"Education\",\"theme\":\"Tutorials\"}"
                }
            }]
        });
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .mount(&server)
            .await;

        let remote = RemoteClassifier::new(
            "test-key".to_string(),
            format!("{}/v1/chat/completions", server.uri()),
        );
        let c = remote.classify("https://example.org/x", "some page text").await.unwrap();
        assert_eq!(c.content_type, "video");
        assert_eq!(c.domain_category, "education");
        assert_eq!(c.theme, "Tutorials");
    }

    #[tokio::test]
    async fn service_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let remote = RemoteClassifier::new("test-key".to_string(), server.uri());
        assert!(remote.classify("https://example.org/x", "text").await.is_none());
    }
}
