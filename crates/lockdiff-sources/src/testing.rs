//! Test doubles shared by the fetcher and resolver tests

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use lockdiff_core::FetchError;

use crate::http::HttpClient;

/// In-memory [`HttpClient`] serving canned bodies; unknown URLs are 404
#[derive(Default)]
pub struct FakeHttpClient {
    responses: HashMap<String, Result<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl FakeHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(url.to_string(), Err(status));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Ok(body)) if body.trim().is_empty() => Err(FetchError::EmptyBody(url.to_string())),
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
            None => Err(FetchError::NotFound(url.to_string())),
        }
    }
}
