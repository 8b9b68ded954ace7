/*!
 * Tests for application error types
 */

use std::path::PathBuf;
use wwdcdl::errors::{AppError, DownloadError, ExtractionError};

/// Test NotFound display carries the stage and the selector
#[test]
fn test_extraction_error_display_withNotFound_shouldNameStageAndSelector() {
    let error = ExtractionError::not_found("video URL", "hd");
    assert_eq!(error.to_string(), "no video URL found for selector 'hd'");
}

/// Test HTTP status error display
#[test]
fn test_download_error_display_withHttpStatus_shouldShowStatusAndUrl() {
    let error = DownloadError::HttpStatus {
        url: "https://cdn.example.com/missing.m3u8".to_string(),
        status: 404,
    };
    let message = error.to_string();
    assert!(message.contains("404"));
    assert!(message.contains("https://cdn.example.com/missing.m3u8"));
}

/// Test I/O error display keeps the destination path
#[test]
fn test_download_error_display_withIoError_shouldShowPath() {
    let error = DownloadError::Io {
        path: PathBuf::from("/tmp/out/video.mp4"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.to_string().contains("/tmp/out/video.mp4"));
}

/// Test AppError wraps the typed errors via From
#[test]
fn test_app_error_from_withTypedErrors_shouldWrapVariant() {
    let extraction: AppError = ExtractionError::not_found("playlist URL", "-").into();
    assert!(matches!(extraction, AppError::Extraction(_)));
    assert!(extraction.to_string().contains("playlist URL"));

    let download: AppError = DownloadError::HttpStatus {
        url: "https://cdn.example.com".to_string(),
        status: 500,
    }
    .into();
    assert!(matches!(download, AppError::Download(_)));
}

/// Test AppError conversion from std::io::Error
#[test]
fn test_app_error_from_withIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}
