//! Offline language identification
//!
//! Detection is script-based: the dominant Unicode script decides the language
//! for non-Latin text, and Latin text is disambiguated by counting common
//! function words. It never needs a model or a network call.

use thiserror::Error;
use tracing::debug;

/// Language code used whenever detection has nothing to go on
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LanguageError {
    #[error("text contains no letters from a recognised script")]
    NoSignal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    Latin,
    Devanagari,
    Bengali,
    Tamil,
    Telugu,
    Arabic,
    Cyrillic,
    Greek,
    Hebrew,
    Thai,
    Hangul,
    Kana,
    Han,
}

const SCRIPTS: [Script; 13] = [
    Script::Latin,
    Script::Devanagari,
    Script::Bengali,
    Script::Tamil,
    Script::Telugu,
    Script::Arabic,
    Script::Cyrillic,
    Script::Greek,
    Script::Hebrew,
    Script::Thai,
    Script::Hangul,
    Script::Kana,
    Script::Han,
];

fn script_of(ch: char) -> Option<Script> {
    let script = match ch as u32 {
        0x41..=0x5A | 0x61..=0x7A | 0xC0..=0x24F => Script::Latin,
        0x0900..=0x097F => Script::Devanagari,
        0x0980..=0x09FF => Script::Bengali,
        0x0B80..=0x0BFF => Script::Tamil,
        0x0C00..=0x0C7F => Script::Telugu,
        0x0600..=0x06FF => Script::Arabic,
        0x0400..=0x04FF => Script::Cyrillic,
        0x0370..=0x03FF => Script::Greek,
        0x0590..=0x05FF => Script::Hebrew,
        0x0E00..=0x0E7F => Script::Thai,
        0x1100..=0x11FF | 0xAC00..=0xD7AF => Script::Hangul,
        0x3040..=0x30FF => Script::Kana,
        0x4E00..=0x9FFF => Script::Han,
        _ => return None,
    };
    Some(script)
}

/// Function words used to tell Latin-script languages apart
const LATIN_MARKERS: &[(&str, &[&str])] = &[
    ("en", &["the", "and", "of", "to", "shall", "is", "with", "this", "for"]),
    ("es", &["el", "los", "las", "del", "y", "que", "por", "con", "para"]),
    ("fr", &["le", "les", "des", "et", "du", "est", "pour", "avec", "dans"]),
    ("de", &["der", "die", "das", "und", "ist", "nicht", "mit", "für", "den"]),
    ("pt", &["os", "as", "do", "da", "e", "não", "para", "com", "uma"]),
];

fn detect_latin(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    let mut best = (0usize, DEFAULT_LANGUAGE);
    for (code, markers) in LATIN_MARKERS {
        let hits = words.iter().filter(|w| markers.contains(w)).count();
        if hits > best.0 {
            best = (hits, *code);
        }
    }
    best.1
}

/// Identify the language of `text`, reporting when there is nothing to detect
pub fn try_detect_language(text: &str) -> Result<&'static str, LanguageError> {
    let mut counts = [0usize; SCRIPTS.len()];
    for script in text.chars().filter_map(script_of) {
        if let Some(slot) = SCRIPTS.iter().position(|s| *s == script) {
            counts[slot] += 1;
        }
    }

    let (slot, &max) = counts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .ok_or(LanguageError::NoSignal)?;
    if max == 0 {
        return Err(LanguageError::NoSignal);
    }

    let count_of = |script: Script| {
        SCRIPTS
            .iter()
            .position(|s| *s == script)
            .map_or(0, |i| counts[i])
    };
    let code = match SCRIPTS[slot] {
        Script::Latin => detect_latin(text),
        Script::Devanagari => "hi",
        Script::Bengali => "bn",
        Script::Tamil => "ta",
        Script::Telugu => "te",
        Script::Arabic => "ar",
        Script::Cyrillic => "ru",
        Script::Greek => "el",
        Script::Hebrew => "he",
        Script::Thai => "th",
        Script::Hangul => "ko",
        Script::Kana => "ja",
        Script::Han if count_of(Script::Kana) > 0 => "ja",
        Script::Han => "zh",
    };
    Ok(code)
}

/// Best-effort language code for `text`; falls back to [`DEFAULT_LANGUAGE`]
pub fn detect_language(text: &str) -> String {
    match try_detect_language(text) {
        Ok(code) => code.to_string(),
        Err(err) => {
            debug!("Language detection failed ({}), using {}", err, DEFAULT_LANGUAGE);
            DEFAULT_LANGUAGE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_english_contract_text() {
        let text = "The Tenant shall pay the rent on the first day of each month.";
        assert_eq!(detect_language(text), "en");
    }

    #[test]
    fn test_detects_hindi_by_script() {
        assert_eq!(detect_language("किरायेदार हर महीने किराया देगा।"), "hi");
    }

    #[test]
    fn test_detects_telugu_by_script() {
        assert_eq!(detect_language("అద్దెదారు ప్రతి నెల అద్దె చెల్లించాలి."), "te");
    }

    #[test]
    fn test_detects_spanish_function_words() {
        let text = "El arrendatario pagará la renta por adelantado y con los intereses del mes.";
        assert_eq!(detect_language(text), "es");
    }

    #[test]
    fn test_empty_text_falls_back_to_default() {
        assert_eq!(try_detect_language(""), Err(LanguageError::NoSignal));
        assert_eq!(detect_language(""), "en");
        assert_eq!(detect_language("12345 !!! 2024-01-01"), "en");
    }
}
