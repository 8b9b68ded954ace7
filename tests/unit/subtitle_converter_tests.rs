/*!
 * Tests for WebVTT parsing and SRT assembly
 */

use wwdcdl::subtitle_converter::{SrtAccumulator, SubtitleCue, format_timestamp, parse_webvtt};

use crate::common;

/// Test parsing an empty document
#[test]
fn test_parse_webvtt_withEmptyDocument_shouldYieldNoCues() {
    assert!(parse_webvtt("").is_empty());
    assert!(parse_webvtt("WEBVTT\n").is_empty());
}

/// Test parsing a document with multiple well-formed cue blocks
#[test]
fn test_parse_webvtt_withWellFormedBlocks_shouldYieldCuesInDocumentOrder() {
    let segment = "WEBVTT\n\n\
00:00:01.000 --> 00:00:02.500\nFirst line\n\n\
00:00:02.500 --> 00:00:04.000\nSecond line\nwith a continuation\n\n\
00:00:04.000 --> 00:00:06.000\nThird line\n";

    let cues = parse_webvtt(segment);
    assert_eq!(cues.len(), 3);

    assert_eq!(cues[0].start_ms, 1_000);
    assert_eq!(cues[0].end_ms, 2_500);
    assert_eq!(cues[0].text, "First line");

    assert_eq!(cues[1].text, "Second line\nwith a continuation");
    assert_eq!(cues[2].text, "Third line");
}

/// Test that the hour field is optional and defaults to zero
#[test]
fn test_parse_webvtt_withoutHourField_shouldDefaultToZero() {
    let cues = parse_webvtt("00:01.000 --> 00:02.000\nShort form\n");

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].start_ms, 1_000);
    assert_eq!(cues[0].end_ms, 2_000);
}

/// Test that cue settings after the end timestamp are tolerated
#[test]
fn test_parse_webvtt_withCueSettings_shouldParseTimings() {
    let cues = parse_webvtt("00:00:01.000 --> 00:00:02.000 align:middle line:84%\nStyled\n");

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].end_ms, 2_000);
    assert_eq!(cues[0].text, "Styled");
}

/// Test that a cue identifier line before the timing line is skipped
#[test]
fn test_parse_webvtt_withCueIdentifier_shouldIgnoreIdentifier() {
    let cues = parse_webvtt("intro-1\n00:00:01.000 --> 00:00:02.000\nIdentified\n");

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Identified");
}

/// Test that malformed blocks are skipped without aborting
#[test]
fn test_parse_webvtt_withMalformedBlock_shouldSkipAndContinue() {
    let segment = "WEBVTT\n\n\
not a timing line\njust text\n\n\
garbage --> also garbage\nBroken\n\n\
00:00:05.000 --> 00:00:06.000\nSurvivor\n";

    let cues = parse_webvtt(segment);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Survivor");
}

/// Test CRLF line endings
#[test]
fn test_parse_webvtt_withCrlfEndings_shouldParseBlocks() {
    let segment = "WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nWindows style\r\n";

    let cues = parse_webvtt(segment);
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Windows style");
}

/// Test WebVTT to SRT timestamp conversion
#[test]
fn test_timestamp_conversion_withDotMillis_shouldUseCommaInSrt() {
    let cues = parse_webvtt("01:02:03.456 --> 01:02:04.000\nTimed\n");

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].format_start_time(), "01:02:03,456");
    assert_eq!(cues[0].format_end_time(), "01:02:04,000");
}

/// Test millisecond formatting edges
#[test]
fn test_format_timestamp_withEdgeValues_shouldPadFields() {
    assert_eq!(format_timestamp(0), "00:00:00,000");
    assert_eq!(format_timestamp(5_025_678), "01:23:45,678");
    assert_eq!(format_timestamp(59_999), "00:00:59,999");
}

/// Test duplicate suppression across a segment splice point
#[test]
fn test_accumulator_withSpliceDuplicate_shouldKeepSingleOccurrence() {
    let segment_a = parse_webvtt(&common::sample_webvtt_segment(
        "00:00:00.000",
        "00:00:02.000",
        "Hello",
    ));
    let segment_b = parse_webvtt(
        "WEBVTT\n\n00:00:02.000 --> 00:00:04.000\nHello\n\n00:00:04.000 --> 00:00:06.000\nWorld\n",
    );

    let mut accumulator = SrtAccumulator::new();
    accumulator.append(segment_a).unwrap();
    accumulator.append(segment_b).unwrap();

    let srt = accumulator.finalize();
    assert_eq!(
        srt,
        "1\n00:00:00,000 --> 00:00:02,000\nHello\n\n2\n00:00:04,000 --> 00:00:06,000\nWorld\n\n"
    );
    assert_eq!(srt.matches("Hello").count(), 1);
}

/// Test indices stay contiguous when duplicates are dropped
#[test]
fn test_accumulator_withDroppedCues_shouldKeepIndicesContiguous() {
    let mut accumulator = SrtAccumulator::new();
    accumulator
        .append(vec![
            SubtitleCue::new(0, 1_000, "A".to_string()),
            SubtitleCue::new(1_000, 2_000, "B".to_string()),
        ])
        .unwrap();
    accumulator
        .append(vec![
            SubtitleCue::new(2_000, 3_000, "B".to_string()),
            SubtitleCue::new(3_000, 4_000, "C".to_string()),
        ])
        .unwrap();

    assert_eq!(accumulator.len(), 3);

    let srt = accumulator.finalize();
    let indices: Vec<&str> = srt
        .split("\n\n")
        .filter(|block| !block.is_empty())
        .map(|block| block.lines().next().unwrap())
        .collect();
    assert_eq!(indices, vec!["1", "2", "3"]);
}

/// Test that identical non-adjacent texts are both kept
#[test]
fn test_accumulator_withNonAdjacentRepeat_shouldKeepBoth() {
    let mut accumulator = SrtAccumulator::new();
    accumulator
        .append(vec![
            SubtitleCue::new(0, 1_000, "Echo".to_string()),
            SubtitleCue::new(1_000, 2_000, "Other".to_string()),
            SubtitleCue::new(2_000, 3_000, "Echo".to_string()),
        ])
        .unwrap();

    assert_eq!(accumulator.len(), 3);
}

/// Test finalize idempotence
#[test]
fn test_accumulator_finalize_withNoFurtherAppends_shouldBeIdempotent() {
    let mut accumulator = SrtAccumulator::new();
    accumulator
        .append(vec![SubtitleCue::new(0, 1_000, "Once".to_string())])
        .unwrap();

    let first = accumulator.finalize();
    let second = accumulator.finalize();
    assert_eq!(first, second);
}

/// Test append after finalize is rejected
#[test]
fn test_accumulator_append_afterFinalize_shouldFail() {
    let mut accumulator = SrtAccumulator::new();
    accumulator
        .append(vec![SubtitleCue::new(0, 1_000, "Done".to_string())])
        .unwrap();
    let _ = accumulator.finalize();

    let result = accumulator.append(vec![SubtitleCue::new(1_000, 2_000, "Late".to_string())]);
    assert!(result.is_err());
}

/// Test finalizing an empty accumulator
#[test]
fn test_accumulator_finalize_withNoCues_shouldYieldEmptyDocument() {
    let mut accumulator = SrtAccumulator::new();
    assert!(accumulator.is_empty());
    assert_eq!(accumulator.finalize(), "");
}
