//! OCR (Optical Character Recognition) backends.
//!
//! Recognition is reached only through the [`RecognitionEngine`] trait. Two Tesseract-based
//! engines ship with the crate:
//!
//! - [`TesseractCliEngine`] (backend `"tesseract-cli"`, always available): pipes the normalized
//!   image to the `tesseract` executable.
//! - `TesseractNativeEngine` (backend `"tesseract"`, feature `tesseract`): calls libtesseract
//!   in-process.
//!
//! # Example
//!
//! ```rust,no_run
//! use polyocr::ocr::{RecognitionEngine, TesseractCliEngine};
//! use polyocr::preprocessing::{RawImage, normalize};
//! use polyocr::LanguageSet;
//!
//! # fn example() -> polyocr::Result<()> {
//! let engine = TesseractCliEngine::default();
//! let image = normalize(&RawImage::from_path("scan.png")?)?;
//! let text = engine.recognize(&image, &LanguageSet::default_selection())?;
//! println!("{}", text.trim());
//! # Ok(())
//! # }
//! ```
pub mod engine;
pub mod error;
pub mod tesseract_cli;
pub mod validation;

#[cfg(feature = "tesseract")]
pub mod tesseract_backend;

pub use engine::RecognitionEngine;
pub use error::OcrError;
pub use tesseract_cli::TesseractCliEngine;
pub use validation::{validate_language_code, validate_tesseract_version};

#[cfg(feature = "tesseract")]
pub use tesseract_backend::TesseractNativeEngine;

use crate::core::config::OcrConfig;
use crate::{PolyocrError, Result};

/// Backend name of [`TesseractCliEngine`].
pub const BACKEND_TESSERACT_CLI: &str = "tesseract-cli";

/// Backend name of the in-process engine.
pub const BACKEND_TESSERACT_NATIVE: &str = "tesseract";

/// Backends understood by [`create_engine`] in this build.
pub fn available_backends() -> Vec<&'static str> {
    let mut backends = vec![BACKEND_TESSERACT_CLI];
    if cfg!(feature = "tesseract") {
        backends.push(BACKEND_TESSERACT_NATIVE);
    }
    backends
}

/// Instantiate the engine named by `config.backend`.
///
/// # Errors
///
/// Returns `PolyocrError::Config` for an unknown backend, or for `"tesseract"` when the crate
/// was built without the `tesseract` feature.
pub fn create_engine(config: &OcrConfig) -> Result<Box<dyn RecognitionEngine>> {
    match config.backend.as_str() {
        BACKEND_TESSERACT_CLI => Ok(Box::new(TesseractCliEngine::from_config(config))),
        #[cfg(feature = "tesseract")]
        BACKEND_TESSERACT_NATIVE => Ok(Box::new(TesseractNativeEngine::from_config(config))),
        #[cfg(not(feature = "tesseract"))]
        BACKEND_TESSERACT_NATIVE => Err(PolyocrError::config(
            "The 'tesseract' backend requires building polyocr with the `tesseract` feature",
        )),
        other => Err(PolyocrError::config(format!(
            "Unknown OCR backend '{}'. Available backends: {}",
            other,
            available_backends().join(", ")
        ))),
    }
}
