//! Error types for polyocr.
//!
//! All fallible library operations return [`PolyocrError`]. The variants map onto the
//! extraction error taxonomy:
//!
//! - `Decode` - an image payload could not be parsed as a raster image (per image, non-fatal)
//! - `Recognition` - the OCR backend failed for one image (per image, non-fatal)
//! - `InvalidLanguageSelection` - the requested language set is empty or unknown (fatal to a run)
//! - `InvalidInput` - any other run-level precondition failed (e.g. no images supplied)
//! - `Config` / `Serialization` - configuration loading and output encoding
//! - `Io` - file system errors, which always bubble up unchanged
//!
//! Language detection has no variant: detection failures are normalised to
//! [`UNKNOWN_LANGUAGE`](crate::language_detection::UNKNOWN_LANGUAGE) and never escalate.
//!
//! # Example
//!
//! ```rust
//! use polyocr::{PolyocrError, Result};
//!
//! fn read_payload(path: &str) -> Result<Vec<u8>> {
//!     let bytes = std::fs::read(path)?;
//!     if bytes.is_empty() {
//!         return Err(PolyocrError::decode(format!("Image is empty: {}", path)));
//!     }
//!     Ok(bytes)
//! }
//! ```
use thiserror::Error;

/// Result type alias using `PolyocrError`.
pub type Result<T> = std::result::Result<T, PolyocrError>;

/// Main error type for all polyocr operations.
#[derive(Debug, Error)]
pub enum PolyocrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {message}")]
    Decode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Recognition error: {message}")]
    Recognition {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid language selection: {0}")]
    InvalidLanguageSelection(String),

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for PolyocrError {
    fn from(err: serde_json::Error) -> Self {
        PolyocrError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<image::ImageError> for PolyocrError {
    fn from(err: image::ImageError) -> Self {
        PolyocrError::Decode {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::OcrError> for PolyocrError {
    fn from(err: crate::ocr::OcrError) -> Self {
        PolyocrError::Recognition {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl PolyocrError {
    error_constructor!(decode, Decode);
    error_constructor!(recognition, Recognition);
    error_constructor!(invalid_input, InvalidInput);
    error_constructor!(config, Config);
    error_constructor!(serialization, Serialization);

    /// Create an InvalidLanguageSelection error
    pub fn invalid_language_selection<S: Into<String>>(message: S) -> Self {
        Self::InvalidLanguageSelection(message.into())
    }

    /// Whether this error is confined to a single image of a batch.
    pub fn is_per_image(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Recognition { .. })
    }
}
