/*!
 * Error types for the wwdcdl application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting resource URLs from page or manifest text
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The requested resource URL could not be located in the scanned text.
    /// Carries the pipeline stage and the selector that produced no match.
    #[error("no {resource} found for selector '{selector}'")]
    NotFound {
        /// Which resource was being extracted (e.g. "video URL", "playlist URL")
        resource: &'static str,
        /// The quality or language selector in effect, or "-" when none applies
        selector: String,
    },
}

impl ExtractionError {
    /// Shorthand for the `NotFound` variant
    pub fn not_found(resource: &'static str, selector: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            selector: selector.into(),
        }
    }
}

/// Errors that can occur while fetching a resource over HTTP
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Error when sending the request or reading the response body fails
    #[error("request to {url} failed: {source}")]
    RequestFailed {
        /// The URL that was being fetched
        url: String,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Error when the server answers with a non-success status
    #[error("{url} answered with HTTP status {status}")]
    HttpStatus {
        /// The URL that was being fetched
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Error writing the streamed body to disk
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from URL extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from a download
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
