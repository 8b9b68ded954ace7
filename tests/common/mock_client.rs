/*!
 * Mock fetch client for testing
 *
 * Serves canned response bodies keyed by URL and records every fetch in call
 * order, so tests can assert both pipeline results and fetch sequencing
 * without touching the network.
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use wwdcdl::download_client::{FetchClient, ProgressObserver};
use wwdcdl::errors::DownloadError;

/// Fetch client that replays canned responses and records call order
#[derive(Debug, Default)]
pub struct MockFetchClient {
    /// Response bodies keyed by URL
    responses: HashMap<String, String>,
    /// Every fetched URL, in call order
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetchClient {
    /// Create an empty mock client
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a response body for a URL
    pub fn with_response(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }

    /// Handle to the recorded call order
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    fn record(&self, url: &str) {
        self.calls.lock().unwrap().push(url.to_string());
    }

    fn body_for(&self, url: &str) -> Result<String, DownloadError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| DownloadError::HttpStatus {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[async_trait]
impl FetchClient for MockFetchClient {
    async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        self.record(url);
        self.body_for(url)
    }

    async fn fetch_to_file(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressObserver<'_>,
    ) -> Result<(), DownloadError> {
        self.record(url);
        let body = self.body_for(url)?;

        on_progress(0.5);
        std::fs::write(dest, body).map_err(|e| DownloadError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;
        on_progress(1.0);

        Ok(())
    }
}
