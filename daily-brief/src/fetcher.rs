use crate::types::{AggregatorError, FetchConfig, Result};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Single-attempt HTTP client shared by all sources in a run.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// GET `url` and return the body. Any non-success status is an error; there are no retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch(url, None).await
    }

    /// Like [`Fetcher::fetch_text`] but with a request timeout that overrides the client's.
    pub async fn fetch_text_within(&self, url: &str, timeout: Duration) -> Result<String> {
        self.fetch(url, Some(timeout)).await
    }

    async fn fetch(&self, url: &str, timeout: Option<Duration>) -> Result<String> {
        let start_time = Instant::now();
        debug!("Fetching: {}", url);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.config.max_feed_size_mb {
                return Err(AggregatorError::FeedTooLarge { size_mb });
            }
        }

        let content = response.text().await?;
        let size_mb = content.len() / (1024 * 1024);
        if size_mb > self.config.max_feed_size_mb {
            return Err(AggregatorError::FeedTooLarge { size_mb });
        }

        info!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }
}
