//! In-process Tesseract backend (cargo feature `tesseract`).
//!
//! Links libtesseract through `kreuzberg-tesseract` and feeds it the normalized grayscale
//! buffer directly, skipping the PNG round trip the command-line backend needs.

use std::env;
use std::path::{Path, PathBuf};

use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};

use super::engine::RecognitionEngine;
use super::error::OcrError;
use super::validation::{LANGUAGE_SEPARATOR, validate_language_code};
use crate::Result;
use crate::core::config::OcrConfig;
use crate::core::languages::LanguageSet;
use crate::preprocessing::NormalizedImage;

const FALLBACK_TESSDATA_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    r#"C:\Program Files\Tesseract-OCR\tessdata"#,
    r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
];

/// Recognition engine backed by the Tesseract C API.
#[derive(Debug, Clone)]
pub struct TesseractNativeEngine {
    tessdata_dir: Option<PathBuf>,
    psm: u8,
}

impl Default for TesseractNativeEngine {
    fn default() -> Self {
        Self {
            tessdata_dir: None,
            psm: super::tesseract_cli::DEFAULT_PSM,
        }
    }
}

impl TesseractNativeEngine {
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            tessdata_dir: config.tessdata_dir.clone(),
            psm: config.psm,
        }
    }

    /// Explicit directory, then `TESSDATA_PREFIX`, then the first well-known install location.
    pub fn resolve_tessdata_dir(&self) -> Option<PathBuf> {
        self.tessdata_dir
            .clone()
            .or_else(|| env::var_os("TESSDATA_PREFIX").map(PathBuf::from))
            .or_else(|| {
                FALLBACK_TESSDATA_PATHS
                    .iter()
                    .map(Path::new)
                    .find(|path| path.exists())
                    .map(Path::to_path_buf)
            })
    }

    fn ensure_traineddata(tessdata: &Path, language_spec: &str) -> std::result::Result<(), OcrError> {
        // libtesseract can crash instead of returning an error when a model is missing
        for code in language_spec.split(LANGUAGE_SEPARATOR) {
            let traineddata = tessdata.join(format!("{}.traineddata", code));
            if !traineddata.exists() {
                return Err(OcrError::InitializationFailed(format!(
                    "Language '{}' not found. Traineddata file does not exist: {}",
                    code,
                    traineddata.display()
                )));
            }
        }
        Ok(())
    }

    fn run(&self, image: &NormalizedImage, language_spec: &str) -> std::result::Result<String, OcrError> {
        let tessdata = self.resolve_tessdata_dir();
        if let Some(dir) = &tessdata {
            Self::ensure_traineddata(dir, language_spec)?;
        }
        let tessdata = tessdata.map(|dir| dir.display().to_string()).unwrap_or_default();

        let api = TesseractAPI::new();
        api.init(&tessdata, language_spec).map_err(|e| {
            OcrError::InitializationFailed(format!("Failed to initialize language '{}': {}", language_spec, e))
        })?;

        api.set_page_seg_mode(TessPageSegMode::from_int(i32::from(self.psm)))
            .map_err(|e| OcrError::ProcessFailed(format!("Failed to set PSM mode: {}", e)))?;

        let gray = image.as_gray();
        let (width, height) = gray.dimensions();
        let bytes_per_pixel = 1;
        api.set_image(
            gray.as_raw(),
            width as i32,
            height as i32,
            bytes_per_pixel,
            width as i32 * bytes_per_pixel,
        )
        .map_err(|e| OcrError::ProcessFailed(format!("Failed to set image: {}", e)))?;

        api.recognize()
            .map_err(|e| OcrError::ProcessFailed(format!("Failed to recognize text: {}", e)))?;

        api.get_utf8_text()
            .map_err(|e| OcrError::ProcessFailed(format!("Failed to extract text: {}", e)))
    }
}

impl RecognitionEngine for TesseractNativeEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String> {
        let language_spec = languages.tesseract_spec();
        validate_language_code(&language_spec)?;

        tracing::debug!(
            languages = %language_spec,
            psm = self.psm,
            width = image.width(),
            height = image.height(),
            "running native tesseract"
        );

        Ok(self.run(image, &language_spec)?)
    }
}
