use super::error::OcrError;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Minimal supported Tesseract major version.
///
/// Reading the image from stdin and the LSTM models both require 4.x or newer.
pub const MINIMAL_SUPPORTED_TESSERACT_VERSION: u32 = 4;

/// Separator Tesseract uses to combine several language models in one invocation.
pub const LANGUAGE_SEPARATOR: char = '+';

/// Language codes for which Tesseract publishes trained data.
pub static TESSERACT_SUPPORTED_LANGUAGE_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "afr", "amh", "ara", "asm", "aze", "aze_cyrl", "bel", "ben", "bod", "bos",
        "bre", "bul", "cat", "ceb", "ces", "chi_sim", "chi_tra", "chr", "cos", "cym",
        "dan", "deu", "div", "dzo", "ell", "eng", "enm", "epo", "equ", "est",
        "eus", "fao", "fas", "fil", "fin", "fra", "frk", "frm", "fry", "gla",
        "gle", "glg", "grc", "guj", "hat", "heb", "hin", "hrv", "hun", "hye",
        "iku", "ind", "isl", "ita", "ita_old", "jav", "jpn", "kan", "kat", "kat_old",
        "kaz", "khm", "kir", "kmr", "kor", "lao", "lat", "lav", "lit", "ltz",
        "mal", "mar", "mkd", "mlt", "mon", "mri", "msa", "mya", "nep", "nld",
        "nor", "oci", "ori", "osd", "pan", "pol", "por", "pus", "que", "ron",
        "rus", "san", "sin", "slk", "slv", "snd", "spa", "spa_old", "sqi", "srp",
        "srp_latn", "sun", "swa", "swe", "syr", "tam", "tat", "tel", "tgk", "tha",
        "tir", "ton", "tur", "uig", "ukr", "urd", "uzb", "uzb_cyrl", "vie", "yid",
        "yor",
    ]
    .into_iter()
    .collect()
});

/// Validate a single code or a `+`-joined language spec against the known Tesseract codes.
pub fn validate_language_code(lang_code: &str) -> Result<(), OcrError> {
    if lang_code.trim().is_empty() {
        return Err(OcrError::InvalidLanguageCode(
            "Language cannot be empty. Please specify a valid language code (e.g., 'eng')".to_string(),
        ));
    }

    for code in lang_code.split(LANGUAGE_SEPARATOR) {
        if !TESSERACT_SUPPORTED_LANGUAGE_CODES.contains(code) {
            return Err(OcrError::InvalidLanguageCode(format!(
                "Language code '{}' is not supported by Tesseract",
                code
            )));
        }
    }
    Ok(())
}

pub fn validate_tesseract_version(version: u32) -> Result<(), OcrError> {
    if version < MINIMAL_SUPPORTED_TESSERACT_VERSION {
        return Err(OcrError::UnsupportedVersion(format!(
            "Tesseract version {} is not supported. Minimum required version is {}",
            version, MINIMAL_SUPPORTED_TESSERACT_VERSION
        )));
    }
    Ok(())
}

/// Parse the major version out of `tesseract --version` output (e.g. `tesseract 5.3.0`).
pub fn parse_tesseract_major_version(version_output: &str) -> Option<u32> {
    let first_line = version_output.lines().next()?;
    let version = first_line
        .split_whitespace()
        .map(|token| token.trim_start_matches('v'))
        .find(|token| token.chars().next().is_some_and(|c| c.is_ascii_digit()))?;
    version.split('.').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_language_code_valid() {
        assert!(validate_language_code("eng").is_ok());
        assert!(validate_language_code("hin").is_ok());
        assert!(validate_language_code("chi_sim").is_ok());
        assert!(validate_language_code("kor").is_ok());
    }

    #[test]
    fn test_validate_language_code_multiple() {
        assert!(validate_language_code("eng+hin").is_ok());
        assert!(validate_language_code("eng+fra+deu+jpn").is_ok());
    }

    #[test]
    fn test_validate_language_code_invalid() {
        let result = validate_language_code("invalid_lang");
        assert!(matches!(result.unwrap_err(), OcrError::InvalidLanguageCode(_)));
    }

    #[test]
    fn test_validate_language_code_mixed_valid_invalid() {
        assert!(validate_language_code("eng+invalid").is_err());
    }

    #[test]
    fn test_validate_language_code_empty() {
        assert!(validate_language_code("").is_err());
        assert!(validate_language_code("   ").is_err());
        assert!(validate_language_code("eng+").is_err());
    }

    #[test]
    fn test_validate_tesseract_version() {
        assert!(validate_tesseract_version(4).is_ok());
        assert!(validate_tesseract_version(5).is_ok());
        let result = validate_tesseract_version(3);
        assert!(matches!(result.unwrap_err(), OcrError::UnsupportedVersion(_)));
    }

    #[test]
    fn test_parse_tesseract_major_version() {
        assert_eq!(parse_tesseract_major_version("tesseract 5.3.0\n leptonica-1.82.0"), Some(5));
        assert_eq!(parse_tesseract_major_version("tesseract v4.1.1"), Some(4));
        assert_eq!(parse_tesseract_major_version("tesseract"), None);
        assert_eq!(parse_tesseract_major_version(""), None);
    }

    #[test]
    fn test_language_codes_exist() {
        assert!(TESSERACT_SUPPORTED_LANGUAGE_CODES.contains("eng"));
        assert!(TESSERACT_SUPPORTED_LANGUAGE_CODES.contains("hin"));
        assert!(TESSERACT_SUPPORTED_LANGUAGE_CODES.contains("chi_sim"));
        assert!(!TESSERACT_SUPPORTED_LANGUAGE_CODES.contains("fake"));
    }
}
