use std::time::Duration;
use thiserror::Error;

/// Backend-level OCR errors.
///
/// These are produced by [`RecognitionEngine`](super::RecognitionEngine) implementations and
/// surface to callers as [`PolyocrError::Recognition`](crate::PolyocrError::Recognition) with the
/// `OcrError` preserved as the error source.
#[derive(Debug, Clone, Error)]
pub enum OcrError {
    #[error("Tesseract initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Unsupported Tesseract version: {0}")]
    UnsupportedVersion(String),

    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    #[error("OCR backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Image encoding failed: {0}")]
    ImageEncoding(String),

    #[error("OCR processing failed: {0}")]
    ProcessFailed(String),

    #[error("OCR timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid OCR output: {0}")]
    InvalidOutput(String),
}

// NOTE: No From<std::io::Error> impl - spawn and pipe failures are classified explicitly
