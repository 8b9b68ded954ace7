use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module maps the subtitle language selectors accepted on the command
/// line (ISO 639-1 or ISO 639-2 codes, plus the site's historical `cn` alias
/// for Chinese) to the ISO 639-2/T directory names used by the caption CDN.
/// Translate an ISO 639-2/B code to its 639-2/T equivalent, if it differs
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"), // French
        "ger" => Some("deu"), // German
        "dut" => Some("nld"), // Dutch
        "gre" => Some("ell"), // Greek
        "chi" => Some("zho"), // Chinese
        "cze" => Some("ces"), // Czech
        "ice" => Some("isl"), // Icelandic
        "per" => Some("fas"), // Persian
        "may" => Some("msa"), // Malay
        "rum" => Some("ron"), // Romanian
        "slo" => Some("slk"), // Slovak
        "wel" => Some("cym"), // Welsh
        _ => None,
    }
}

/// Aliases the session site uses that are not ISO codes
fn resolve_site_alias(code: &str) -> &str {
    match code {
        // The site historically labels Chinese subtitles "cn"
        "cn" => "zh",
        other => other,
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = resolve_site_alias(code.trim().to_lowercase().as_str()).to_string();

    // If it's a 2-letter code, convert to 3-letter
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, ensure it's ISO 639-2/T
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }

        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Directory name the caption CDN uses for a subtitle language.
///
/// The per-language caption manifests live under a three-letter language
/// directory (`eng`, `zho`, `jpn`, ...) which matches ISO 639-2/T.
pub fn caption_directory_code(code: &str) -> Result<String> {
    normalize_to_part2t(code)
}

/// Check if a URL path segment looks like a caption language directory
pub fn is_language_directory(segment: &str) -> bool {
    segment.len() == 3
        && segment.chars().all(|c| c.is_ascii_lowercase())
        && Language::from_639_3(segment).is_some()
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(n1), Ok(n2)) => n1 == n2,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
