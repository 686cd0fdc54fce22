use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport used by the feed loader. Implementations execute a single
/// request and hand back the raw response.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
