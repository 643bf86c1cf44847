use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use crate::feed::FeedPayload;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Upstream answered with a non-success status. The error body, if any,
    /// is ignored; the user sees a generic failure message.
    #[error("failed to fetch the news feed (upstream returned {0})")]
    Upstream(StatusCode),
    #[error("failed to fetch the news feed")]
    Transport(#[from] reqwest::Error),
    #[error("news feed response was malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub struct FeedClient {
    client: Client,
    feed_url: String,
}

impl FeedClient {
    pub fn new(feed_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("SpotlightNews/1.0 (Feed Client)")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            feed_url: feed_url.into(),
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub async fn fetch(&self) -> Result<FeedPayload, FeedError> {
        let response = self.client.get(&self.feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Upstream(status));
        }

        let body = response.text().await?;
        let payload: FeedPayload = serde_json::from_str(&body)?;
        info!(
            "Fetched feed: {} items, {} trending topics",
            payload.news_items.as_ref().map_or(0, Vec::len),
            payload.trending_topics.as_ref().map_or(0, Vec::len)
        );
        Ok(payload)
    }
}

/// The three mutually exclusive outcomes of one feed retrieval. States are
/// strictly ordered Pending -> {Failed | Ready}; Failed and Ready are
/// terminal for the controller's lifetime.
#[derive(Debug, Clone)]
pub enum FeedState {
    Pending,
    Failed { message: String },
    Ready { payload: FeedPayload },
}

impl FeedState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FeedState::Pending)
    }
}

/// Owns the retrieval lifecycle for one mounted view: exactly one fetch,
/// settling into Failed or Ready. Each view gets its own controller; there
/// is no shared state between mounts.
pub struct FeedController {
    state: FeedState,
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            state: FeedState::Pending,
        }
    }

    /// Perform the single fetch for this controller. Calling again after the
    /// state has settled keeps the existing outcome.
    pub async fn load(&mut self, client: &FeedClient) {
        if self.state.is_settled() {
            return;
        }

        self.state = match client.fetch().await {
            Ok(payload) => FeedState::Ready { payload },
            Err(e) => {
                warn!("Feed fetch from {} failed: {}", client.feed_url(), e);
                FeedState::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_BODY: &str = r##"{
        "last_updated": "2026-08-20T06:00:00",
        "trending_topics": ["#Tour"],
        "news_items": [
            {"id": 1, "category": "music", "headline": "H", "summary": "S"}
        ]
    }"##;

    async fn mock_feed_server(response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    fn feed_client(server: &MockServer) -> FeedClient {
        FeedClient::new(format!("{}/api/news", server.uri()))
    }

    #[test]
    fn test_new_controller_is_pending() {
        let controller = FeedController::new();
        assert!(matches!(controller.state(), FeedState::Pending));
        assert!(!controller.state().is_settled());
    }

    #[tokio::test]
    async fn test_successful_fetch_reaches_ready() {
        let server = mock_feed_server(
            ResponseTemplate::new(200).set_body_raw(VALID_BODY, "application/json"),
        )
        .await;

        let mut controller = FeedController::new();
        controller.load(&feed_client(&server)).await;

        match controller.state() {
            FeedState::Ready { payload } => {
                assert_eq!(payload.news_items.as_ref().unwrap().len(), 1);
                assert_eq!(payload.trending_topics.as_ref().unwrap()[0], "#Tour");
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_reaches_failed_with_generic_message() {
        let server = mock_feed_server(ResponseTemplate::new(500)).await;

        let mut controller = FeedController::new();
        controller.load(&feed_client(&server)).await;

        match controller.state() {
            FeedState::Failed { message } => {
                assert!(message.contains("failed to fetch the news feed"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_ignored() {
        let server = mock_feed_server(
            ResponseTemplate::new(503).set_body_raw(r#"{"detail": "nope"}"#, "application/json"),
        )
        .await;

        let mut controller = FeedController::new();
        controller.load(&feed_client(&server)).await;

        match controller.state() {
            FeedState::Failed { message } => {
                assert!(message.contains("failed to fetch the news feed"));
                assert!(!message.contains("nope"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_surfaces_parse_detail() {
        let server = mock_feed_server(
            ResponseTemplate::new(200).set_body_raw("not json at all", "application/json"),
        )
        .await;

        let mut controller = FeedController::new();
        controller.load(&feed_client(&server)).await;

        match controller.state() {
            FeedState::Failed { message } => {
                assert!(message.contains("malformed"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_settled_controller_does_not_refetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/news"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(VALID_BODY, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = feed_client(&server);
        let mut controller = FeedController::new();
        controller.load(&client).await;
        assert!(controller.state().is_settled());

        // Second load is a no-op; the mock's expect(1) verifies on drop.
        controller.load(&client).await;
        assert!(matches!(controller.state(), FeedState::Ready { .. }));
    }

    #[tokio::test]
    async fn test_failed_is_terminal() {
        let server = mock_feed_server(ResponseTemplate::new(502)).await;

        let client = feed_client(&server);
        let mut controller = FeedController::new();
        controller.load(&client).await;
        controller.load(&client).await;

        // No path from Failed back to Pending or across to Ready.
        assert!(matches!(controller.state(), FeedState::Failed { .. }));
    }
}
