use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Resolve the output directory for downloaded files.
    ///
    /// An explicit directory wins; otherwise the user's download directory,
    /// falling back to the current directory.
    pub fn resolve_output_dir(configured: Option<&Path>) -> PathBuf {
        match configured {
            Some(dir) => dir.to_path_buf(),
            None => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Derive the local file name for a media asset from its URL.
    ///
    /// Uses the last path segment, with any query string already excluded by
    /// the URL's path.
    pub fn file_name_from_url(url: &Url) -> Result<String> {
        url.path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| anyhow!("URL has no file name component: {}", url))
    }

    /// Derive the subtitle file name from the video asset URL.
    ///
    /// Reuses the video's file name with the extension swapped to `srt`.
    pub fn subtitle_name_from_url(url: &Url) -> Result<String> {
        let video_name = Self::file_name_from_url(url)?;
        let stem = Path::new(&video_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(video_name);

        Ok(format!("{}.srt", stem))
    }
}
