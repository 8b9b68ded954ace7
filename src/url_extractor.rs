use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::ExtractionError;
use crate::app_config::VideoQuality;
use crate::language_utils;

// @module: Resource URL extraction from page and manifest text

// @const: Absolute mp4 asset URL
static MP4_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+\.mp4[^\s"'<>]*"#).unwrap()
});

// @const: Absolute HLS playlist URL
static M3U8_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://[^\s"'<>]+\.m3u8[^\s"'<>]*"#).unwrap()
});

// @const: Subtitle media entry in a master playlist
static SUBTITLE_MEDIA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#EXT-X-MEDIA:[^\r\n]*TYPE=SUBTITLES[^\r\n]*").unwrap()
});

// @const: URI attribute of a playlist media entry
static MEDIA_URI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"URI="([^"]+)""#).unwrap()
});

/// Extract the video asset URL tagged with the requested quality.
///
/// Scans the session page text for absolute `.mp4` URLs and returns the first
/// one carrying the quality tag (`/hd/` path segment or `_hd.mp4` style
/// suffix). There is no fallback to the other quality; an absent tag is
/// reported to the caller.
///
/// Known limitation: when several URLs carry the same tag, the first match in
/// document order wins.
pub fn extract_video_url(page_text: &str, quality: VideoQuality) -> Result<Url, ExtractionError> {
    MP4_URL_REGEX
        .find_iter(page_text)
        .map(|m| m.as_str())
        .filter(|candidate| has_quality_tag(candidate, quality))
        .find_map(|candidate| Url::parse(candidate).ok())
        .ok_or_else(|| ExtractionError::not_found("video URL", quality.tag()))
}

/// Extract the HLS master-playlist URL referenced by the session page.
pub fn extract_playlist_url(page_text: &str) -> Result<Url, ExtractionError> {
    M3U8_URL_REGEX
        .find_iter(page_text)
        .find_map(|m| Url::parse(m.as_str()).ok())
        .ok_or_else(|| ExtractionError::not_found("playlist URL", "-"))
}

/// Extract the caption-manifest URL from a master playlist.
///
/// Takes the playlist body together with the URL it was fetched from, since
/// subtitle entries usually reference their manifest with a relative URI.
/// Returns the first `TYPE=SUBTITLES` media entry (the default track).
pub fn extract_caption_manifest_url(
    playlist_text: &str,
    playlist_url: &Url,
) -> Result<Url, ExtractionError> {
    SUBTITLE_MEDIA_REGEX
        .find_iter(playlist_text)
        .filter_map(|media| MEDIA_URI_REGEX.captures(media.as_str()))
        .filter_map(|caps| caps.get(1))
        .find_map(|uri| playlist_url.join(uri.as_str()).ok())
        .ok_or_else(|| ExtractionError::not_found("caption manifest URL", "-"))
}

/// Extract the ordered caption-segment URLs for a subtitle language.
///
/// Parses the caption manifest body (non-comment lines are segment names in
/// playback order) and resolves each name against the manifest URL with its
/// language directory rewritten to the requested language. The segment order
/// is the playback order and must be preserved by the caller.
pub fn extract_caption_segment_urls(
    manifest_text: &str,
    manifest_url: &Url,
    language: &str,
) -> Result<Vec<Url>, ExtractionError> {
    let lang_dir = language_utils::caption_directory_code(language)
        .map_err(|_| ExtractionError::not_found("caption track", language))?;

    let base = rewrite_language_directory(manifest_url, &lang_dir);

    let segments: Vec<Url> = manifest_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|name| base.join(name).ok())
        .collect();

    if segments.is_empty() {
        return Err(ExtractionError::not_found("caption segments", language));
    }

    Ok(segments)
}

// @checks: URL carries the quality tag as a path segment or file suffix
fn has_quality_tag(candidate: &str, quality: VideoQuality) -> bool {
    let tag = quality.tag();
    candidate.contains(&format!("/{}/", tag)) || candidate.contains(&format!("_{}.mp4", tag))
}

/// Swap the manifest URL's language directory for the requested one.
///
/// Caption manifests live directly inside a three-letter language directory
/// (`.../subtitles/eng/prog_index.m3u8`), so only the manifest's immediate
/// parent segment is considered. A manifest URL without such a segment is
/// taken as a single implicit track and left untouched.
fn rewrite_language_directory(manifest_url: &Url, lang_dir: &str) -> Url {
    let Some(segments) = manifest_url.path_segments() else {
        return manifest_url.clone();
    };

    let mut segments: Vec<String> = segments.map(str::to_string).collect();
    let count = segments.len();
    if count >= 2 && language_utils::is_language_directory(&segments[count - 2]) {
        segments[count - 2] = lang_dir.to_string();
    }

    let mut rewritten = manifest_url.clone();
    rewritten.set_path(&segments.join("/"));
    rewritten
}
