use crate::utils::error::Result;
use async_trait::async_trait;

/// External research capability: one natural-language query in, free-form
/// text out. All failure causes (timeout, non-zero exit, empty or
/// quota-exhausted output) map to a single error; callers only need to know
/// that no usable answer came back.
#[async_trait]
pub trait Researcher: Send + Sync {
    async fn research(&self, query: &str) -> Result<String>;
}

/// Live check that a candidate URL is reachable and mentions at least one
/// relevance keyword. Fetch failures are swallowed into `false`.
#[async_trait]
pub trait SourceValidator: Send + Sync {
    async fn validate(&self, url: &str, keywords: &[String]) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn research_timeout_secs(&self) -> u64;
    fn fetch_timeout_secs(&self) -> u64;
    fn max_concurrency(&self) -> usize;
    fn log_dir(&self) -> &str;
}
