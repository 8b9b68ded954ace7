use std::fmt;
use anyhow::{Result, anyhow};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

// @module: WebVTT parsing and SRT assembly

// @const: WebVTT cue timing line, hour field optional
static TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(\d{1,2}):)?(\d{2}):(\d{2})\.(\d{3})\s*-->\s*(?:(\d{1,2}):)?(\d{2}):(\d{2})\.(\d{3})",
    )
    .unwrap()
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleCue {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Cue text, lines joined with newlines
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new subtitle cue
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        SubtitleCue {
            start_ms,
            end_ms,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_ms)
    }
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse one WebVTT document into its cues, in document order.
///
/// Cue blocks are separated by blank lines. Each block's timing line is
/// `HH:MM:SS.mmm --> HH:MM:SS.mmm` with the hour field optional (defaulting
/// to 0); the cue text is every non-empty line after it. Header, NOTE and
/// STYLE blocks carry no timing line and are ignored; a block that looks like
/// a cue but fails to parse is skipped, not fatal.
pub fn parse_webvtt(segment_text: &str) -> Vec<SubtitleCue> {
    let mut cues = Vec::new();
    let normalized = segment_text.replace("\r\n", "\n");

    for block in normalized.split("\n\n") {
        let lines: Vec<&str> = block.lines().collect();

        // Locate the timing line; a cue identifier may precede it
        let Some(timing_idx) = lines.iter().position(|line| line.contains("-->")) else {
            continue;
        };

        let Some(caps) = TIMING_REGEX.captures(lines[timing_idx]) else {
            warn!("Skipping malformed cue timing line: {}", lines[timing_idx]);
            continue;
        };

        let start_ms = timestamp_ms(&caps, 1);
        let end_ms = timestamp_ms(&caps, 5);

        let text = lines[timing_idx + 1..]
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            continue;
        }

        cues.push(SubtitleCue::new(start_ms, end_ms, text));
    }

    cues
}

// @parses: Timestamp captures starting at group index to milliseconds
fn timestamp_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
    let hours: u64 = caps
        .get(start_idx)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let minutes: u64 = caps
        .get(start_idx + 1)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let seconds: u64 = caps
        .get(start_idx + 2)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));
    let millis: u64 = caps
        .get(start_idx + 3)
        .map_or(0, |m| m.as_str().parse().unwrap_or(0));

    (hours * 3600 + minutes * 60 + seconds) * 1000 + millis
}

/// Accumulates cues from consecutive caption segments into one SRT document.
///
/// Caption segments overlap at their splice points, repeating the last cue of
/// the previous segment as the first cue of the next. `append` drops a cue
/// whose text equals the previously retained cue's text, so the merged
/// document carries each spoken line once. Indices are 1-based and contiguous
/// in retention order.
#[derive(Debug, Default)]
pub struct SrtAccumulator {
    // @field: Retained cues in emission order
    cues: Vec<SubtitleCue>,

    // @field: Set once finalize has been called
    finalized: bool,
}

impl SrtAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the cues of the next caption segment, in playback order.
    ///
    /// Must be called once per segment in segment order; calling it after
    /// `finalize` is an error.
    pub fn append(&mut self, cues: Vec<SubtitleCue>) -> Result<()> {
        if self.finalized {
            return Err(anyhow!("Cannot append cues after finalize"));
        }

        for cue in cues {
            if self.cues.last().is_some_and(|prev| prev.text == cue.text) {
                continue;
            }
            self.cues.push(cue);
        }

        Ok(())
    }

    /// Number of retained cues
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    /// Whether no cue has been retained yet
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Render the accumulated cues as one SRT document.
    ///
    /// Idempotent as long as no further `append` happens (which is rejected
    /// anyway); repeated calls return identical text.
    pub fn finalize(&mut self) -> String {
        self.finalized = true;
        self.to_string()
    }
}

impl fmt::Display for SrtAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, cue) in self.cues.iter().enumerate() {
            writeln!(f, "{}", index + 1)?;
            writeln!(f, "{} --> {}", cue.format_start_time(), cue.format_end_time())?;
            writeln!(f, "{}", cue.text)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
