//! Core extraction orchestration module.
//!
//! - **Configuration** (`config`): loading, discovery and validation of [`ExtractionConfig`]
//! - **Languages** (`languages`): the display name → Tesseract code table and validated selections
//! - **Pipeline** (`pipeline`): the sequential batch extraction loop
//!
//! # Example
//!
//! ```rust,no_run
//! use polyocr::core::config::ExtractionConfig;
//! use polyocr::core::pipeline::BatchExtractionPipeline;
//! use polyocr::preprocessing::RawImage;
//!
//! # fn example() -> polyocr::Result<()> {
//! let config = ExtractionConfig::discover()?.unwrap_or_default();
//! let pipeline = BatchExtractionPipeline::from_config(&config)?;
//! let output = pipeline.extract_all(&[RawImage::from_path("scan.png")?], &config.language_set()?)?;
//! println!("{}", output.results[0].display_text());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod languages;
pub mod pipeline;

pub use config::{ExtractionConfig, LanguageDetectionConfig, OcrConfig};
pub use languages::{LanguageEntry, LanguageSet, LanguageTable};
pub use pipeline::BatchExtractionPipeline;
