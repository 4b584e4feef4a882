pub mod heuristic;
pub mod remote;

use tracing::debug;

use heuristic::HeuristicClassifier;
use remote::RemoteClassifier;

/// Three independent labels for one bookmarked page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub content_type: String,
    pub domain_category: String,
    pub theme: String,
}

/// Remote-first classification with an unconditional heuristic fallback.
///
/// A result is fully remote or fully heuristic, never mixed per field.
/// The remote tier is fixed at construction: `None` means no credential
/// was configured for this run.
pub struct Pipeline {
    remote: Option<RemoteClassifier>,
    heuristic: HeuristicClassifier,
}

impl Pipeline {
    pub fn new(remote: Option<RemoteClassifier>, heuristic: HeuristicClassifier) -> Self {
        Self { remote, heuristic }
    }

    /// Total: always yields a Classification.
    pub async fn classify(&self, url: &str, text: &str) -> Classification {
        if let Some(remote) = &self.remote {
            if let Some(c) = remote.classify(url, text).await {
                return c;
            }
            debug!("remote unavailable for {}, using heuristic", url);
        }
        self.heuristic.classify(url, text)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::heuristic::KeywordTables;
    use super::*;

    #[tokio::test]
    async fn no_remote_equals_heuristic() {
        let pipeline = Pipeline::new(None, HeuristicClassifier::new(KeywordTables::default()));
        let direct = HeuristicClassifier::new(KeywordTables::default());

        for (url, text) in [
            ("https://youtube.com/x", "a video about numpy"),
            ("https://example.org/", "crypto market overview"),
            ("https://example.org/", ""),
        ] {
            let from_pipeline = pipeline.classify(url, text).await;
            assert_eq!(from_pipeline, direct.classify(url, text));
        }
    }

    #[tokio::test]
    async fn failing_remote_falls_back() {
        // Endpoint nobody listens on: the remote tier errors, heuristic wins.
        let remote = RemoteClassifier::new(
            "test-key".to_string(),
            "http://127.0.0.1:1/v1/chat/completions".to_string(),
        );
        let pipeline = Pipeline::new(
            Some(remote),
            HeuristicClassifier::new(KeywordTables::default()),
        );

        let c = pipeline.classify("https://youtube.com/x", "").await;
        assert_eq!(c.content_type, "video");
        assert_eq!(c.theme, "general");
    }
}
