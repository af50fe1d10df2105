use super::fetcher::{FetchError, FetchedBytes, FetchedPage, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the HTTP transport. Unregistered URLs answer 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    bytes: HashMap<String, (Vec<u8>, Option<String>)>,
    pub text_requests: Mutex<Vec<String>>,
    pub byte_requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_bytes(mut self, url: &str, data: &[u8]) -> Self {
        self.bytes.insert(url.to_string(), (data.to_vec(), None));
        self
    }

    /// Registers a payload whose response reports a different final URL,
    /// simulating a redirect.
    pub fn with_redirected_bytes(mut self, url: &str, data: &[u8], final_url: &str) -> Self {
        self.bytes.insert(
            url.to_string(),
            (data.to_vec(), Some(final_url.to_string())),
        );
        self
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.text_requests.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                body: body.clone(),
                final_url: url.to_string(),
            }),
            None => Err(FetchError::Status { status: 404 }),
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<FetchedBytes, FetchError> {
        self.byte_requests.lock().unwrap().push(url.to_string());
        match self.bytes.get(url) {
            Some((data, final_url)) => Ok(FetchedBytes {
                data: data.clone(),
                final_url: final_url.clone().unwrap_or_else(|| url.to_string()),
            }),
            None => Err(FetchError::Status { status: 404 }),
        }
    }
}
