use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    Status { status: u16 },
}

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    /// URL the request actually landed on after redirects.
    pub final_url: String,
}

#[derive(Debug, Clone)]
pub struct FetchedBytes {
    pub data: Vec<u8>,
    pub final_url: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a listing page as text, following redirects.
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage, FetchError>;

    /// Fetch a media payload as raw bytes, following redirects.
    async fn fetch_bytes(&self, url: &str) -> Result<FetchedBytes, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self.get(url).await?;
        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok(FetchedPage { body, final_url })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<FetchedBytes, FetchError> {
        let response = self.get(url).await?;
        let final_url = response.url().to_string();
        let data = response.bytes().await?.to_vec();
        Ok(FetchedBytes { data, final_url })
    }
}
