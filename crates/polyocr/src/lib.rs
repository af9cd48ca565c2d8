//! polyocr - Multi-language OCR batch extraction
//!
//! Extracts text from batches of raster images with Tesseract, using several recognition
//! languages at once, tags each result with its detected natural language and highlights search
//! terms in the extracted text.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use polyocr::{BatchExtractionPipeline, ExtractionConfig, RawImage};
//!
//! # fn main() -> polyocr::Result<()> {
//! let config = ExtractionConfig::default();
//! let pipeline = BatchExtractionPipeline::from_config(&config)?;
//! let images = vec![RawImage::from_path("receipt.jpg")?];
//!
//! let output = pipeline.extract_all(&images, &config.language_set()?)?;
//! for result in &output.results {
//!     println!("{}", result.heading());
//!     println!("{}", polyocr::text::highlight(result.display_text(), "total"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): configuration, the language table and the batch pipeline
//! - **Preprocessing** (`preprocessing`): decoding, grayscale conversion and contrast enhancement
//! - **OCR** (`ocr`): the `RecognitionEngine` trait and the Tesseract backends
//! - **Language Detection** (`language_detection`): best-effort classification of extracted text
//! - **Text** (`text`): search highlighting
//! - **Session** (`session`): the latest results, kept for search and export
//!
//! # Features
//!
//! - `language-detection` (default): statistical language detection via whatlang
//! - `tesseract`: in-process Tesseract backend linking libtesseract

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod language_detection;
pub mod ocr;
pub mod preprocessing;
pub mod session;
pub mod text;
pub mod types;

pub use error::{PolyocrError, Result};
pub use types::*;

pub use core::config::{ExtractionConfig, LanguageDetectionConfig, OcrConfig};
pub use core::languages::{LanguageSet, LanguageTable};
pub use core::pipeline::BatchExtractionPipeline;
pub use language_detection::{LanguageDetector, UNKNOWN_LANGUAGE, detect_language};
pub use ocr::RecognitionEngine;
pub use preprocessing::{NormalizedImage, RawImage, normalize};
pub use session::{ExportPayload, ExtractionSession};
pub use text::{HighlightMarkers, HighlightedText, highlight};
