//! Language detection using whatlang library.
//!
//! Classifies the dominant natural language of extracted text. Detection is best-effort:
//! empty input, low-confidence guesses and any classifier failure all yield
//! [`UNKNOWN_LANGUAGE`] instead of an error, so detection can never fail an extraction.
//!
//! Codes are ISO 639-1 (`en`, `fr`, `hi`, `zh`, ...).
//!
//! # Example
//!
//! ```rust
//! use polyocr::language_detection::{detect_language, UNKNOWN_LANGUAGE};
//!
//! assert_eq!(detect_language(""), UNKNOWN_LANGUAGE);
//! ```

use crate::core::config::LanguageDetectionConfig;

#[cfg(feature = "language-detection")]
use whatlang::Lang;

/// Sentinel returned whenever no language can be determined.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Trait for natural-language classifiers.
///
/// Implementations must be total: every input maps to a language code or
/// [`UNKNOWN_LANGUAGE`].
pub trait LanguageDetector: Send + Sync {
    fn detect_language(&self, text: &str) -> String;
}

impl<T: LanguageDetector + ?Sized> LanguageDetector for Box<T> {
    fn detect_language(&self, text: &str) -> String {
        (**self).detect_language(text)
    }
}

/// Statistical detector backed by whatlang's trigram models.
///
/// Without the `language-detection` feature every input is [`UNKNOWN_LANGUAGE`].
#[derive(Debug, Clone, Default)]
pub struct StatisticalDetector {
    config: LanguageDetectionConfig,
}

impl StatisticalDetector {
    pub fn new(config: LanguageDetectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LanguageDetectionConfig {
        &self.config
    }

    #[cfg(feature = "language-detection")]
    fn classify(&self, text: &str) -> Option<&'static str> {
        // A classifier panic must degrade to "Unknown" like any other detection failure
        let info = match std::panic::catch_unwind(|| whatlang::detect(text)) {
            Ok(info) => info?,
            Err(_) => {
                tracing::warn!("language classifier panicked; reporting unknown language");
                return None;
            }
        };

        if info.confidence() < self.config.min_confidence {
            tracing::debug!(
                lang = info.lang().code(),
                confidence = info.confidence(),
                threshold = self.config.min_confidence,
                "language detection below confidence threshold"
            );
            return None;
        }

        Some(lang_to_iso639_1(info.lang()))
    }

    #[cfg(not(feature = "language-detection"))]
    fn classify(&self, _text: &str) -> Option<&'static str> {
        None
    }
}

impl LanguageDetector for StatisticalDetector {
    fn detect_language(&self, text: &str) -> String {
        if !self.config.enabled || text.trim().is_empty() {
            return UNKNOWN_LANGUAGE.to_string();
        }

        self.classify(text)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }
}

/// Detect the language of `text` with the default configuration.
pub fn detect_language(text: &str) -> String {
    StatisticalDetector::default().detect_language(text)
}

/// Convert whatlang Lang enum to ISO 639-1 language code.
#[cfg(feature = "language-detection")]
fn lang_to_iso639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Rus => "ru",
        Lang::Cmn => "zh",
        Lang::Spa => "es",
        Lang::Por => "pt",
        Lang::Ita => "it",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ukr => "uk",
        Lang::Kat => "ka",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Jpn => "ja",
        Lang::Heb => "he",
        Lang::Yid => "yi",
        Lang::Pol => "pl",
        Lang::Amh => "am",
        Lang::Jav => "jv",
        Lang::Kor => "ko",
        Lang::Nob => "nb",
        Lang::Dan => "da",
        Lang::Swe => "sv",
        Lang::Fin => "fi",
        Lang::Tur => "tr",
        Lang::Nld => "nl",
        Lang::Hun => "hu",
        Lang::Ces => "cs",
        Lang::Ell => "el",
        Lang::Bul => "bg",
        Lang::Bel => "be",
        Lang::Mar => "mr",
        Lang::Kan => "kn",
        Lang::Ron => "ro",
        Lang::Slv => "sl",
        Lang::Hrv => "hr",
        Lang::Srp => "sr",
        Lang::Mkd => "mk",
        Lang::Lit => "lt",
        Lang::Lav => "lv",
        Lang::Est => "et",
        Lang::Tam => "ta",
        Lang::Vie => "vi",
        Lang::Urd => "ur",
        Lang::Tha => "th",
        Lang::Guj => "gu",
        Lang::Uzb => "uz",
        Lang::Pan => "pa",
        Lang::Aze => "az",
        Lang::Ind => "id",
        Lang::Tel => "te",
        Lang::Pes => "fa",
        Lang::Mal => "ml",
        Lang::Ori => "or",
        Lang::Mya => "my",
        Lang::Nep => "ne",
        Lang::Sin => "si",
        Lang::Khm => "km",
        Lang::Tuk => "tk",
        Lang::Aka => "ak",
        Lang::Zul => "zu",
        Lang::Sna => "sn",
        Lang::Afr => "af",
        Lang::Lat => "la",
        Lang::Slk => "sk",
        Lang::Cat => "ca",
        Lang::Tgl => "tl",
        Lang::Hye => "hy",
        Lang::Epo => "eo",
        Lang::Ben => "bn",
        Lang::Cym => "cy",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unknown() {
        assert_eq!(detect_language(""), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_whitespace_is_unknown() {
        assert_eq!(detect_language("  \n\t \u{c}"), UNKNOWN_LANGUAGE);
    }

    #[test]
    fn test_disabled_detector_is_unknown() {
        let detector = StatisticalDetector::new(LanguageDetectionConfig {
            enabled: false,
            ..Default::default()
        });
        assert_eq!(
            detector.detect_language("The quick brown fox jumps over the lazy dog."),
            UNKNOWN_LANGUAGE
        );
    }

    #[test]
    fn test_unreachable_threshold_is_unknown() {
        let detector = StatisticalDetector::new(LanguageDetectionConfig {
            enabled: true,
            min_confidence: 1.01,
        });
        assert_eq!(
            detector.detect_language("The quick brown fox jumps over the lazy dog."),
            UNKNOWN_LANGUAGE
        );
    }

    #[cfg(feature = "language-detection")]
    #[test]
    fn test_detect_english() {
        let text = "Hello world! This is a test of the language detection system for scanned documents.";
        assert_eq!(detect_language(text), "en");
    }

    #[cfg(feature = "language-detection")]
    #[test]
    fn test_detect_french() {
        let text = "Bonjour le monde! Ceci est un texte en français. Le renard brun rapide saute par-dessus le chien paresseux.";
        assert_eq!(detect_language(text), "fr");
    }

    #[cfg(feature = "language-detection")]
    #[test]
    fn test_detect_by_script() {
        assert_eq!(detect_language("これは日本語のテキストです。ひらがなとカタカナを含みます。"), "ja");
        assert_eq!(detect_language("이것은 한국어로 작성된 문장입니다. 한글을 사용합니다."), "ko");
    }

    #[cfg(feature = "language-detection")]
    #[test]
    fn test_text_without_letters_is_unknown() {
        assert_eq!(detect_language("12345 67890 !!! ???"), UNKNOWN_LANGUAGE);
    }

    #[cfg(feature = "language-detection")]
    #[test]
    fn test_lang_to_iso639_1() {
        assert_eq!(lang_to_iso639_1(Lang::Eng), "en");
        assert_eq!(lang_to_iso639_1(Lang::Hin), "hi");
        assert_eq!(lang_to_iso639_1(Lang::Cmn), "zh");
        assert_eq!(lang_to_iso639_1(Lang::Deu), "de");
        assert_eq!(lang_to_iso639_1(Lang::Pes), "fa");
    }

    #[cfg(not(feature = "language-detection"))]
    #[test]
    fn test_without_feature_everything_is_unknown() {
        assert_eq!(
            detect_language("The quick brown fox jumps over the lazy dog."),
            UNKNOWN_LANGUAGE
        );
    }
}
