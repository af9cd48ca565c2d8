//! Batch extraction orchestration.
//!
//! Runs every image through normalize → recognize → detect, strictly in input order. A failure
//! in normalization or recognition is confined to its own slot: the slot is marked failed, a
//! [`Diagnostic`] is recorded and the run moves on to the next image.

use crate::core::config::ExtractionConfig;
use crate::core::languages::LanguageSet;
use crate::language_detection::{LanguageDetector, StatisticalDetector};
use crate::ocr::{RecognitionEngine, create_engine};
use crate::preprocessing::{RawImage, normalize};
use crate::types::{BatchOutput, Diagnostic, DiagnosticKind, ExtractionResult};
use crate::{PolyocrError, Result};

/// Sequential OCR pipeline over a batch of images.
///
/// # Example
///
/// ```rust,no_run
/// use polyocr::core::config::ExtractionConfig;
/// use polyocr::core::pipeline::BatchExtractionPipeline;
/// use polyocr::preprocessing::RawImage;
///
/// # fn example() -> polyocr::Result<()> {
/// let config = ExtractionConfig::default();
/// let pipeline = BatchExtractionPipeline::from_config(&config)?;
/// let images = vec![RawImage::from_path("page1.png")?, RawImage::from_path("page2.jpg")?];
///
/// let output = pipeline.extract_all(&images, &config.language_set()?)?;
/// for result in &output.results {
///     println!("{}\n{}", result.heading(), result.display_text());
/// }
/// # Ok(())
/// # }
/// ```
pub struct BatchExtractionPipeline {
    engine: Box<dyn RecognitionEngine>,
    detector: Box<dyn LanguageDetector>,
}

impl std::fmt::Debug for BatchExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchExtractionPipeline")
            .field("engine", &self.engine.name())
            .finish_non_exhaustive()
    }
}

impl BatchExtractionPipeline {
    pub fn new(engine: impl RecognitionEngine + 'static, detector: impl LanguageDetector + 'static) -> Self {
        Self {
            engine: Box::new(engine),
            detector: Box::new(detector),
        }
    }

    /// Build the configured OCR backend and a statistical detector.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::Config` if the configured backend is unknown or not compiled in.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        let engine = create_engine(&config.ocr)?;
        let detector = StatisticalDetector::new(config.language_detection.clone());
        Ok(Self {
            engine,
            detector: Box::new(detector),
        })
    }

    pub fn engine(&self) -> &dyn RecognitionEngine {
        self.engine.as_ref()
    }

    /// Extract text from every image.
    ///
    /// The returned results line up one-to-one with `images`. Per-image failures never surface
    /// as an `Err`; they become failed slots with a matching diagnostic.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::InvalidInput` if `images` is empty.
    #[tracing::instrument(skip_all, fields(images = images.len(), languages = %languages, engine = self.engine.name()))]
    pub fn extract_all(&self, images: &[RawImage], languages: &LanguageSet) -> Result<BatchOutput> {
        if images.is_empty() {
            return Err(PolyocrError::invalid_input("At least one image is required"));
        }

        let mut output = BatchOutput {
            results: Vec::with_capacity(images.len()),
            diagnostics: Vec::new(),
        };

        for (index, image) in images.iter().enumerate() {
            let result = match self.recognize_one(image, languages) {
                Ok(text) => {
                    let detected_language = self.detector.detect_language(&text);
                    tracing::debug!(
                        index,
                        source = image.name(),
                        chars = text.chars().count(),
                        language = %detected_language,
                        "image extracted"
                    );
                    ExtractionResult::succeeded(index, image.name(), text, detected_language)
                }
                Err(e) => {
                    let diagnostic = Diagnostic {
                        index,
                        source_name: image.name().to_string(),
                        kind: diagnostic_kind(&e),
                        message: e.to_string(),
                    };
                    tracing::warn!(index, source = image.name(), kind = ?diagnostic.kind, "{}", diagnostic);
                    output.diagnostics.push(diagnostic.clone());
                    ExtractionResult::failed(diagnostic)
                }
            };
            output.results.push(result);
        }

        tracing::info!(
            succeeded = output.succeeded(),
            failed = output.failed(),
            "batch extraction finished"
        );

        Ok(output)
    }

    fn recognize_one(&self, image: &RawImage, languages: &LanguageSet) -> Result<String> {
        let normalized = normalize(image)?;
        let text = self.engine.recognize(&normalized, languages)?;
        Ok(text.trim().to_string())
    }
}

fn diagnostic_kind(error: &PolyocrError) -> DiagnosticKind {
    match error {
        PolyocrError::Decode { .. } => DiagnosticKind::Decode,
        _ => DiagnosticKind::Recognition,
    }
}
