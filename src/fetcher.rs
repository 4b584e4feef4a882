use std::time::Duration;

use reqwest::Client;
use tracing::warn;

const USER_AGENT: &str = "bookmark-sorter/1.0";

/// Bounded-time page retrieval. One GET per URL, no retries.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client with static config");
        Self { client }
    }

    /// Fetch a page's body text. Any transport error, timeout, or
    /// non-success status means the URL is unreachable (`None`).
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("fetch failed for {}: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("fetch failed for {}: status {}", url, response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!("fetch failed for {}: {}", url, e);
                None
            }
        }
    }
}
