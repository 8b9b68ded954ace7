/*!
 * HTTP fetch client for page, manifest and media downloads.
 *
 * The `FetchClient` trait is the seam between the pipeline and the network:
 * the application uses `HttpClient` (reqwest), the tests substitute a
 * recording mock. The client performs a single GET per call and no retries;
 * retry policy, if ever wanted, belongs to the caller.
 */

use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use reqwest::Client;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::app_config::DownloadConfig;
use crate::errors::DownloadError;

/// Observer invoked with a non-decreasing completion fraction in [0, 1].
/// Called from the transfer task; must not block or exert back-pressure.
pub type ProgressObserver<'a> = &'a (dyn Fn(f64) + Send + Sync);

/// Common trait for fetch client implementations
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Fetch a URL and return the full decoded body as text
    async fn fetch_text(&self, url: &str) -> Result<String, DownloadError>;

    /// Stream a URL's body to a file, reporting progress.
    ///
    /// The destination file fully replaces any prior file at that path on
    /// success; no partial file is left behind on failure.
    async fn fetch_to_file(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressObserver<'_>,
    ) -> Result<(), DownloadError>;
}

/// HTTP client backed by reqwest
pub struct HttpClient {
    /// Shared reqwest client with connection pooling
    client: Client,
    /// Per-request timeout for text fetches
    text_timeout: Duration,
}

impl HttpClient {
    /// Create a new client from the download configuration
    pub fn new(config: &DownloadConfig) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_default();

        Self {
            client,
            text_timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(&DownloadConfig::default())
    }
}

#[async_trait]
impl FetchClient for HttpClient {
    async fn fetch_text(&self, url: &str) -> Result<String, DownloadError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.text_timeout)
            .send()
            .await
            .map_err(|e| DownloadError::RequestFailed {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| DownloadError::RequestFailed {
            url: url.to_string(),
            source: e,
        })
    }

    async fn fetch_to_file(
        &self,
        url: &str,
        dest: &Path,
        on_progress: ProgressObserver<'_>,
    ) -> Result<(), DownloadError> {
        debug!("GET {} -> {}", url, dest.display());

        // No overall timeout here: large transfers legitimately run for
        // minutes, the connect timeout still bounds a dead endpoint.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::RequestFailed {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_bytes = response.content_length();

        // Stream into a temp file next to the destination, then persist over
        // it, so an interrupted transfer never leaves a partial file.
        let dir = dest.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| DownloadError::Io {
            path: dest.to_path_buf(),
            source: e,
        })?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| DownloadError::RequestFailed {
                url: url.to_string(),
                source: e,
            })?;

            temp_file
                .write_all(&chunk)
                .map_err(|e| DownloadError::Io {
                    path: dest.to_path_buf(),
                    source: e,
                })?;

            downloaded += chunk.len() as u64;
            if let Some(total) = total_bytes {
                if total > 0 {
                    on_progress((downloaded as f64 / total as f64).min(1.0));
                }
            }
        }

        temp_file.persist(dest).map_err(|e| DownloadError::Io {
            path: dest.to_path_buf(),
            source: e.error,
        })?;

        on_progress(1.0);
        Ok(())
    }
}
