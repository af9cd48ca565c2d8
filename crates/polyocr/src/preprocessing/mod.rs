//! Image normalization ahead of recognition.
//!
//! Every uploaded image goes through the same fixed transform before it reaches an OCR
//! backend: decode, convert to single-channel grayscale with BT.601 weights, then stretch
//! contrast around the mean luminance by [`CONTRAST_FACTOR`].
//!
//! # Example
//!
//! ```rust,no_run
//! use polyocr::preprocessing::{RawImage, normalize};
//!
//! # fn example() -> polyocr::Result<()> {
//! let raw = RawImage::from_path("receipt.jpg")?;
//! let normalized = normalize(&raw)?;
//! println!("{}x{}", normalized.width(), normalized.height());
//! # Ok(())
//! # }
//! ```
mod contrast;
mod grayscale;

pub use contrast::{CONTRAST_FACTOR, enhance_contrast, mean_luminance};
pub use grayscale::to_grayscale;

use crate::{PolyocrError, Result};
use image::{GrayImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

/// An uploaded image: an opaque encoded payload plus the name it was uploaded under.
///
/// The pipeline only ever borrows a `RawImage`; the payload is not inspected until
/// [`normalize`] decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    name: String,
    bytes: Vec<u8>,
}

impl RawImage {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an image file, using its file name as the display name.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::Io` if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Grayscale, contrast-enhanced derivative of a [`RawImage`], ready for recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage {
    pixels: GrayImage,
}

impl NormalizedImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    pub fn into_gray(self) -> GrayImage {
        self.pixels
    }

    /// Encode as PNG for backends that consume encoded images.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PolyocrError::decode_with_source("Failed to encode normalized image as PNG", e))?;
        Ok(buffer)
    }
}

impl From<GrayImage> for NormalizedImage {
    fn from(pixels: GrayImage) -> Self {
        Self { pixels }
    }
}

/// Decode `image`, convert it to grayscale and apply the fixed contrast enhancement.
///
/// The format is sniffed from the payload, not from the display name.
///
/// # Errors
///
/// Returns `PolyocrError::Decode` when the payload is empty or is not a supported raster format.
pub fn normalize(image: &RawImage) -> Result<NormalizedImage> {
    if image.bytes().is_empty() {
        return Err(PolyocrError::decode(format!("Image '{}' is empty", image.name())));
    }

    let reader = ImageReader::new(Cursor::new(image.bytes()))
        .with_guessed_format()
        .map_err(|e| PolyocrError::decode_with_source(format!("Failed to read image '{}'", image.name()), e))?;

    if reader.format().is_none() {
        return Err(PolyocrError::decode(format!(
            "Image '{}' is not a supported raster format",
            image.name()
        )));
    }

    let decoded = reader
        .decode()
        .map_err(|e| PolyocrError::decode_with_source(format!("Failed to decode image '{}'", image.name()), e))?;

    tracing::debug!(
        image = image.name(),
        width = decoded.width(),
        height = decoded.height(),
        "decoded image"
    );

    let gray = to_grayscale(&decoded);
    Ok(NormalizedImage::from(enhance_contrast(gray, CONTRAST_FACTOR)))
}
