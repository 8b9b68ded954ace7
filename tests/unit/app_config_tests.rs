/*!
 * Tests for application configuration
 */

use std::str::FromStr;
use wwdcdl::app_config::{Config, LogLevel, VideoQuality};

/// Test default configuration values
#[test]
fn test_default_config_withNoOverrides_shouldUseSiteDefaults() {
    let config = Config::default();

    assert_eq!(config.base_url, "https://developer.apple.com/videos/play");
    assert_eq!(config.year, 2020);
    assert_eq!(config.quality, VideoQuality::Hd);
    assert_eq!(config.language, "en");
    assert!(config.output_dir.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test session page URL construction
#[test]
fn test_session_url_withSessionId_shouldTemplateSiteYearAndId() {
    let config = Config::default();
    assert_eq!(
        config.session_url("10001"),
        "https://developer.apple.com/videos/play/wwdc2020/10001"
    );
}

/// Test session URL construction tolerates a trailing slash in the base URL
#[test]
fn test_session_url_withTrailingSlash_shouldNotDoubleSlash() {
    let config = Config {
        base_url: "https://developer.apple.com/videos/play/".to_string(),
        ..Config::default()
    };
    assert_eq!(
        config.session_url("10686"),
        "https://developer.apple.com/videos/play/wwdc2020/10686"
    );
}

/// Test quality parsing from strings
#[test]
fn test_video_quality_fromStr_withValidValues_shouldParse() {
    assert_eq!(VideoQuality::from_str("sd").unwrap(), VideoQuality::Sd);
    assert_eq!(VideoQuality::from_str("HD").unwrap(), VideoQuality::Hd);
    assert!(VideoQuality::from_str("4k").is_err());
}

/// Test quality display matches the URL tag
#[test]
fn test_video_quality_display_shouldMatchUrlTag() {
    assert_eq!(VideoQuality::Sd.to_string(), "sd");
    assert_eq!(VideoQuality::Hd.to_string(), "hd");
    assert_eq!(VideoQuality::Hd.tag(), "hd");
}

/// Test config serialization round trip
#[test]
fn test_config_serde_withRoundTrip_shouldPreserveValues() {
    let config = Config {
        quality: VideoQuality::Sd,
        language: "ja".to_string(),
        ..Config::default()
    };

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.quality, VideoQuality::Sd);
    assert_eq!(parsed.language, "ja");
    assert_eq!(parsed.year, 2020);
}

/// Test deserialization fills omitted fields with defaults
#[test]
fn test_config_serde_withPartialJson_shouldApplyDefaults() {
    let parsed: Config = serde_json::from_str(r#"{"language": "cn"}"#).unwrap();

    assert_eq!(parsed.language, "cn");
    assert_eq!(parsed.quality, VideoQuality::Hd);
    assert_eq!(parsed.base_url, "https://developer.apple.com/videos/play");
    assert_eq!(parsed.download.timeout_secs, 30);
}

/// Test validation rejects a malformed base URL
#[test]
fn test_validate_withInvalidBaseUrl_shouldFail() {
    let config = Config {
        base_url: "not a url".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Test validation rejects a non-http scheme
#[test]
fn test_validate_withFtpScheme_shouldFail() {
    let config = Config {
        base_url: "ftp://example.com/videos".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Test validation rejects an unknown language code
#[test]
fn test_validate_withUnknownLanguage_shouldFail() {
    let config = Config {
        language: "klingon".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

/// Test validation accepts the site's cn alias
#[test]
fn test_validate_withCnAlias_shouldPass() {
    let config = Config {
        language: "cn".to_string(),
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

/// Test validation rejects a zero download timeout
#[test]
fn test_validate_withZeroTimeout_shouldFail() {
    let mut config = Config::default();
    config.download.timeout_secs = 0;
    assert!(config.validate().is_err());
}
