use anyhow::{Result, anyhow};
use isolang::Language;
use log::warn;

/// Language utilities for synced-lyrics frames
///
/// LRC files carry `[la:]` tags in whatever form their author chose
/// (`en`, `eng`, `ger`, ...). SYLT and USLT frames want a three-letter
/// ISO 639-2 code, so codes are normalized here.
/// Language used when a file names none, or an invalid one
pub const DEFAULT_FRAME_LANGUAGE: &str = "eng";

// @maps: ISO 639-2/B codes that differ from their ISO 639-2/T form
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    } else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
        if let Some(part2t) = part2b_to_part2t(&normalized_code) {
            return Ok(part2t.to_string());
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

/// Language code for a synced-lyrics frame
///
/// Uses the `[la:]` value when it is a valid code, otherwise `fallback`.
pub fn frame_language(found: Option<&str>, fallback: &str) -> String {
    match found {
        Some(code) => match normalize_to_part2t(code) {
            Ok(part2t) => part2t,
            Err(e) => {
                warn!("Language code issue: {}, using {}", e, fallback);
                fallback.to_string()
            }
        },
        None => fallback.to_string(),
    }
}
