//! Shared fixtures for integration tests.
//!
//! Images are synthesised with the `image` crate so the suite carries no binary fixtures.

#![allow(dead_code)]

use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use polyocr::language_detection::LanguageDetector;
use polyocr::ocr::RecognitionEngine;
use polyocr::preprocessing::NormalizedImage;
use polyocr::{LanguageSet, PolyocrError, RawImage, Result};
use std::io::Cursor;
use std::sync::Mutex;

pub fn encode_gray(image: &GrayImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, format).unwrap();
    bytes.into_inner()
}

/// Gray PNG with a dark horizontal band, so the contrast step has something to stretch.
pub fn banded_png(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |_, y| {
        if y >= height / 3 && y < 2 * height / 3 {
            Luma([60])
        } else {
            Luma([180])
        }
    });
    encode_gray(&image, ImageFormat::Png)
}

/// Colour JPEG, exercising the RGB → luma path.
pub fn colour_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| if x % 2 == 0 { Rgb([200, 40, 40]) } else { Rgb([20, 20, 220]) });
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Jpeg).unwrap();
    bytes.into_inner()
}

pub fn png_image(name: &str, width: u32, height: u32) -> RawImage {
    RawImage::new(name, banded_png(width, height))
}

pub fn corrupt_image(name: &str) -> RawImage {
    RawImage::new(name, b"\x89PNG\r\n\x1a\nthis is not really a png".to_vec())
}

/// Engine returning a fixed script of outputs keyed by image width.
///
/// Widths without an entry yield a recognition error.
pub struct ScriptedEngine {
    outputs: Vec<(u32, String)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    pub fn new(outputs: &[(u32, &str)]) -> Self {
        Self {
            outputs: outputs.iter().map(|(w, t)| (*w, (*t).to_string())).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Language specs seen by each call, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn recognize(&self, image: &NormalizedImage, languages: &LanguageSet) -> Result<String> {
        self.calls.lock().unwrap().push(languages.tesseract_spec());
        self.outputs
            .iter()
            .find(|(width, _)| *width == image.width())
            .map(|(_, text)| text.clone())
            .ok_or_else(|| PolyocrError::recognition(format!("no scripted output for width {}", image.width())))
    }
}

/// Detector answering with a fixed code for any non-empty text.
pub struct FixedDetector(pub &'static str);

impl LanguageDetector for FixedDetector {
    fn detect_language(&self, text: &str) -> String {
        if text.is_empty() {
            polyocr::UNKNOWN_LANGUAGE.to_string()
        } else {
            self.0.to_string()
        }
    }
}

/// Write an executable shell script standing in for the `tesseract` binary.
#[cfg(unix)]
pub fn fake_tesseract(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-tesseract");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Whether a real `tesseract` executable is on `PATH`.
pub fn tesseract_available() -> bool {
    std::process::Command::new("tesseract")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
