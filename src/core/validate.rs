use crate::domain::ports::SourceValidator;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Identity sent with every validation fetch.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; US-EAST-1-Tracker/1.0)";

/// Live relevance check for candidate URLs: the page must be reachable
/// (2xx, redirects followed) and its text must contain at least one keyword.
///
/// This is an approximate heuristic, not a correctness proof. Coincidental
/// keyword hits on unrelated pages and misses on JS-rendered content are
/// accepted tradeoffs.
pub struct HttpValidator {
    client: Client,
}

impl HttpValidator {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceValidator for HttpValidator {
    async fn validate(&self, url: &str, keywords: &[String]) -> bool {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Validation fetch failed for {}: {}", url, e);
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Validation fetch for {} returned {}", url, response.status());
            return false;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Validation body read failed for {}: {}", url, e);
                return false;
            }
        };

        let body_lower = body.to_lowercase();
        keywords
            .iter()
            .any(|keyword| body_lower.contains(&keyword.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn validator() -> HttpValidator {
        HttpValidator::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_accepts_page_containing_keyword() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/article");
            then.status(200).body("AWS outage impacted DynamoDB");
        });

        let keywords = vec!["dynamodb".to_string()];
        assert!(validator().validate(&server.url("/article"), &keywords).await);
        page_mock.assert();
    }

    #[tokio::test]
    async fn test_keyword_match_is_case_insensitive() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/article");
            then.status(200).body("aws outage impacted dynamodb");
        });

        let keywords = vec!["DynamoDB".to_string()];
        assert!(validator().validate(&server.url("/article"), &keywords).await);
    }

    #[tokio::test]
    async fn test_rejects_non_success_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404).body("AWS outage impacted DynamoDB");
        });

        let keywords = vec!["dynamodb".to_string()];
        assert!(!validator().validate(&server.url("/gone"), &keywords).await);
    }

    #[tokio::test]
    async fn test_rejects_page_without_keywords() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/unrelated");
            then.status(200).body("Nothing to see here");
        });

        let keywords = vec!["dynamodb".to_string(), "outage".to_string()];
        assert!(
            !validator()
                .validate(&server.url("/unrelated"), &keywords)
                .await
        );
    }

    #[tokio::test]
    async fn test_fetch_error_is_swallowed() {
        let keywords = vec!["outage".to_string()];
        // Nothing listens on this port.
        assert!(
            !validator()
                .validate("http://127.0.0.1:9/article", &keywords)
                .await
        );
    }

    #[tokio::test]
    async fn test_sends_fixed_user_agent() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/article")
                .header("user-agent", USER_AGENT);
            then.status(200).body("outage report");
        });

        let keywords = vec!["outage".to_string()];
        assert!(validator().validate(&server.url("/article"), &keywords).await);
        page_mock.assert();
    }
}
