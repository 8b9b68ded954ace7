use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::{Config, VideoQuality};
use crate::download_client::{FetchClient, HttpClient};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::subtitle_converter::{SrtAccumulator, parse_webvtt};
use crate::url_extractor;

// @module: Application controller for session downloads

/// One invocation's worth of work: which session, which artifacts
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    // @field: Session identifier
    pub session_id: String,

    // @field: Download the session video
    pub video: bool,

    // @field: Download the session subtitle
    pub subtitle: bool,
}

/// Main application controller for session downloads
#[derive(Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Fetch client used for every network request
    client: Arc<dyn FetchClient>,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let client = Arc::new(HttpClient::new(&config.download));
        Ok(Self { config, client })
    }

    /// Create a controller with an injected fetch client (used by tests)
    pub fn with_client(config: Config, client: Arc<dyn FetchClient>) -> Self {
        Self { config, client }
    }

    /// Run the requested downloads for one session.
    ///
    /// Each top-level operation runs as a background task whose completion is
    /// awaited here. The subtitle download is chained from the video
    /// download's successful completion: a failed video download aborts the
    /// invocation and the subtitle task is never started.
    pub async fn run(&self, request: DownloadRequest) -> Result<()> {
        if !request.video && !request.subtitle {
            warn!("Nothing to do: pass --video and/or --subtitle");
            return Ok(());
        }

        let controller = self.clone();
        let task = tokio::spawn(async move {
            if request.video {
                let video_path = controller
                    .download_video(&request.session_id, controller.config.quality)
                    .await?;
                info!("Video downloaded at: {}", video_path.display());
            }

            if request.subtitle {
                let subtitle_path = controller
                    .download_subtitle(
                        &request.session_id,
                        &controller.config.language,
                        controller.config.quality,
                    )
                    .await?;
                info!("Subtitle downloaded at: {}", subtitle_path.display());
            }

            Ok::<(), anyhow::Error>(())
        });

        task.await.context("Download task panicked")??;
        Ok(())
    }

    /// Download the session video for the requested quality.
    ///
    /// Fetches the session page, extracts the quality-tagged video URL
    /// (failing fast when the quality is absent), and streams the video to
    /// the output directory under the URL's last path component.
    pub async fn download_video(
        &self,
        session_id: &str,
        quality: VideoQuality,
    ) -> Result<PathBuf> {
        let session_url = self.config.session_url(session_id);
        info!("Fetching session page: {}", session_url);

        let page = self
            .client
            .fetch_text(&session_url)
            .await
            .with_context(|| format!("Failed to fetch session page for '{}'", session_id))?;

        let video_url = url_extractor::extract_video_url(&page, quality)
            .with_context(|| format!("Session '{}' has no {} video", session_id, quality))?;

        let dest = self.output_path(FileManager::file_name_from_url(&video_url)?)?;

        let progress_bar = Self::transfer_progress_bar("Video downloading:");
        let on_progress = Self::fraction_observer(&progress_bar);

        self.client
            .fetch_to_file(video_url.as_str(), &dest, &on_progress)
            .await
            .with_context(|| format!("Failed to download video from {}", video_url))?;

        progress_bar.finish_and_clear();
        Ok(dest)
    }

    /// Download the session subtitle and write it as one SRT file.
    ///
    /// Resolves the caption-manifest URL through the HLS master playlist,
    /// then fetches the caption segments strictly one at a time in playback
    /// order: the accumulator's duplicate suppression and numbering depend on
    /// arrival order, so segment fetches are never issued concurrently.
    pub async fn download_subtitle(
        &self,
        session_id: &str,
        language: &str,
        quality: VideoQuality,
    ) -> Result<PathBuf> {
        let language_name =
            language_utils::get_language_name(language).unwrap_or_else(|_| language.to_string());

        let session_url = self.config.session_url(session_id);
        info!(
            "Fetching session page for {} subtitles: {}",
            language_name, session_url
        );

        let page = self
            .client
            .fetch_text(&session_url)
            .await
            .with_context(|| format!("Failed to fetch session page for '{}'", session_id))?;

        // The subtitle file borrows its name from the quality-selected video
        let video_url = url_extractor::extract_video_url(&page, quality)
            .with_context(|| format!("Session '{}' has no {} video", session_id, quality))?;
        let dest = self.output_path(FileManager::subtitle_name_from_url(&video_url)?)?;

        let playlist_url = url_extractor::extract_playlist_url(&page)
            .with_context(|| format!("Session '{}' has no HLS playlist", session_id))?;
        let playlist = self
            .client
            .fetch_text(playlist_url.as_str())
            .await
            .with_context(|| format!("Failed to fetch playlist {}", playlist_url))?;

        let manifest_url = url_extractor::extract_caption_manifest_url(&playlist, &playlist_url)
            .with_context(|| format!("Playlist {} lists no caption track", playlist_url))?;
        let manifest = self
            .client
            .fetch_text(manifest_url.as_str())
            .await
            .with_context(|| format!("Failed to fetch caption manifest {}", manifest_url))?;

        let segment_urls =
            url_extractor::extract_caption_segment_urls(&manifest, &manifest_url, language)
                .with_context(|| {
                    format!("No {} caption segments for session '{}'", language, session_id)
                })?;

        info!(
            "Downloading {} caption segments ({})",
            segment_urls.len(),
            language_name
        );

        let progress_bar = Self::segment_progress_bar(segment_urls.len() as u64);

        let mut accumulator = SrtAccumulator::new();
        for (completed, segment_url) in segment_urls.iter().enumerate() {
            let segment = self
                .client
                .fetch_text(segment_url.as_str())
                .await
                .with_context(|| format!("Failed to fetch caption segment {}", segment_url))?;

            accumulator.append(parse_webvtt(&segment))?;
            progress_bar.set_position((completed + 1) as u64);
        }

        let srt = accumulator.finalize();
        FileManager::write_to_file(&dest, &srt)?;

        progress_bar.finish_and_clear();
        Ok(dest)
    }

    // @builds: Destination path inside the resolved output directory
    fn output_path(&self, file_name: String) -> Result<PathBuf> {
        let output_dir = FileManager::resolve_output_dir(self.config.output_dir.as_deref());
        FileManager::ensure_dir(&output_dir)?;
        Ok(output_dir.join(file_name))
    }

    // @builds: Percent-style progress bar for one transfer
    fn transfer_progress_bar(message: &'static str) -> ProgressBar {
        let progress_bar = ProgressBar::new(100);
        let template_result = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {percent}%")
            .or_else(|_| ProgressStyle::default_bar().template("{msg} [{bar:40}] {percent}%"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message(message);
        progress_bar
    }

    // @builds: Segment-count progress bar for the subtitle pipeline
    fn segment_progress_bar(total_segments: u64) -> ProgressBar {
        let progress_bar = ProgressBar::new(total_segments);
        let template_result = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%)")
            .or_else(|_| ProgressStyle::default_bar().template("{msg} [{bar:40}] {pos}/{len}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Subtitle downloading:");
        progress_bar
    }

    /// Wrap a progress bar in a fraction observer.
    ///
    /// The transfer task may report from a background context; the observer
    /// clamps updates to be non-decreasing and never exerts back-pressure.
    fn fraction_observer(progress_bar: &ProgressBar) -> impl Fn(f64) + Send + Sync + use<> {
        let bar = progress_bar.clone();
        let last_percent = Arc::new(Mutex::new(0u64));

        move |fraction: f64| {
            let percent = (fraction.clamp(0.0, 1.0) * 100.0).round() as u64;
            let mut last = last_percent.lock();
            if percent > *last {
                *last = percent;
                bar.set_position(percent);
            }
        }
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.language.is_empty() && self.config.year > 0
    }
}
