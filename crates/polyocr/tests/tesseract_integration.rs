//! Checks against an installed `tesseract`. Each test returns early when none is on `PATH`.

mod helpers;

use helpers::*;
use polyocr::LanguageSet;
use polyocr::core::languages::LanguageTable;
use polyocr::ocr::{RecognitionEngine, TesseractCliEngine};
use polyocr::preprocessing::normalize;
use serial_test::serial;

#[test]
#[serial]
fn test_probe_installed_tesseract() {
    if !tesseract_available() {
        eprintln!("tesseract not installed, skipping");
        return;
    }

    let engine = TesseractCliEngine::default();
    let version = engine.probe().unwrap();
    assert!(!version.is_empty());
}

#[test]
#[serial]
fn test_blank_image_yields_no_error() {
    if !tesseract_available() {
        eprintln!("tesseract not installed, skipping");
        return;
    }

    let engine = TesseractCliEngine::default();
    let installed = engine.available_languages().unwrap();
    if !installed.iter().any(|code| code == "eng") {
        eprintln!("eng.traineddata not installed, skipping");
        return;
    }

    let image = normalize(&png_image("blank.png", 120, 40)).unwrap();
    let languages = LanguageSet::from_codes(&LanguageTable::reference(), ["eng"]).unwrap();
    let text = engine.recognize(&image, &languages).unwrap();
    assert!(text.trim().chars().count() < 20);
}
