//! Recognition engine abstraction.
//!
//! The batch pipeline only talks to OCR backends through [`RecognitionEngine`], so swapping
//! Tesseract's command-line tool for the in-process library (or any other OCR engine) never
//! touches pipeline logic.

use crate::Result;
use crate::core::languages::LanguageSet;
use crate::preprocessing::NormalizedImage;

/// Trait for OCR backends.
///
/// # Contract
///
/// - `recognize` makes at most one backend attempt; callers never retry.
/// - The returned text is raw backend output. Trimming is the caller's job.
/// - An empty string is a valid result (no text found).
/// - Any backend failure (unsupported language, unreadable image, backend unavailable) is
///   reported as `PolyocrError::Recognition` and concerns only the image passed in.
///
/// # Thread Safety
///
/// Engines must be `Send + Sync` so a pipeline can be shared across threads, even though a
/// single batch run calls `recognize` strictly sequentially.
///
/// # Example
///
/// ```rust
/// use polyocr::ocr::RecognitionEngine;
/// use polyocr::preprocessing::NormalizedImage;
/// use polyocr::{LanguageSet, Result};
///
/// struct FixedText(&'static str);
///
/// impl RecognitionEngine for FixedText {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn recognize(&self, _image: &NormalizedImage, _languages: &LanguageSet) -> Result<String> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
pub trait RecognitionEngine: Send + Sync {
    /// Short backend identifier used in logs and diagnostics.
    fn name(&self) -> &str;

    /// Extract text from `image` using the union of the language models in `languages`.
    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String>;
}

impl<T: RecognitionEngine + ?Sized> RecognitionEngine for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String> {
        (**self).recognize(image, languages)
    }
}

impl<T: RecognitionEngine + ?Sized> RecognitionEngine for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String> {
        (**self).recognize(image, languages)
    }
}
