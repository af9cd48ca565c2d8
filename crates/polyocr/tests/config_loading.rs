//! Configuration files driving a real pipeline against a stand-in tesseract executable.

mod helpers;

use helpers::*;
use polyocr::{BatchExtractionPipeline, ExtractionConfig, PolyocrError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_drives_language_spec() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("polyocr.toml");
    fs::write(
        &path,
        r#"
languages = ["Japanese", "Korean", "English"]

[ocr]
psm = 6
"#,
    )
    .unwrap();

    let config = ExtractionConfig::from_file(&path).unwrap();
    config.validate().unwrap();
    assert_eq!(config.language_set().unwrap().tesseract_spec(), "jpn+kor+eng");
}

#[test]
fn test_unknown_language_in_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("polyocr.toml");
    fs::write(&path, "languages = [\"Klingon\"]\n").unwrap();

    let config = ExtractionConfig::from_file(&path).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, PolyocrError::InvalidLanguageSelection(_)));
    assert!(err.to_string().contains("Klingon"));
}

#[test]
fn test_extra_language_with_unknown_code_is_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("polyocr.toml");
    fs::write(&path, "[extra_languages]\nElvish = \"qya\"\n").unwrap();

    let config = ExtractionConfig::from_file(&path).unwrap();
    assert!(matches!(config.validate().unwrap_err(), PolyocrError::Config { .. }));
}

#[cfg(unix)]
mod with_fake_tesseract {
    use super::*;
    use polyocr::DiagnosticKind;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_pipeline_from_config_runs_configured_command() {
        let dir = tempdir().unwrap();
        let command = fake_tesseract(dir.path(), "cat > /dev/null\necho \"  spec=$4 psm=$6  \"");
        let path = dir.path().join("polyocr.yaml");
        fs::write(
            &path,
            format!(
                "languages: [Hindi, German]\nocr:\n  tesseract_cmd: {}\n  psm: 4\n",
                command.display()
            ),
        )
        .unwrap();

        let config = ExtractionConfig::from_file(&path).unwrap();
        let pipeline = BatchExtractionPipeline::from_config(&config).unwrap();
        let output = pipeline
            .extract_all(&[png_image("scan.png", 20, 20)], &config.language_set().unwrap())
            .unwrap();

        assert_eq!(output.results[0].text, "spec=hin+deu psm=4");
    }

    #[test]
    #[serial]
    fn test_env_override_replaces_command() {
        let dir = tempdir().unwrap();
        let command = fake_tesseract(dir.path(), "cat > /dev/null\necho overridden");

        let mut config = ExtractionConfig::default();
        config.ocr.tesseract_cmd = "/nonexistent/tesseract".to_string();
        config.apply_overrides_from(|key| {
            (key == "POLYOCR_TESSERACT_CMD").then(|| command.display().to_string())
        });

        let pipeline = BatchExtractionPipeline::from_config(&config).unwrap();
        let output = pipeline
            .extract_all(&[png_image("scan.png", 20, 20)], &config.language_set().unwrap())
            .unwrap();
        assert_eq!(output.results[0].text, "overridden");
    }

    #[test]
    #[serial]
    fn test_backend_failure_is_isolated_per_image() {
        let dir = tempdir().unwrap();
        let command = fake_tesseract(
            dir.path(),
            "cat > /dev/null\necho \"Error opening data file hin.traineddata\" >&2\nexit 1",
        );

        let mut config = ExtractionConfig::default();
        config.ocr.tesseract_cmd = command.display().to_string();
        let pipeline = BatchExtractionPipeline::from_config(&config).unwrap();

        let output = pipeline
            .extract_all(
                &[png_image("a.png", 10, 10), png_image("b.png", 12, 12)],
                &config.language_set().unwrap(),
            )
            .unwrap();

        assert_eq!(output.results.len(), 2);
        assert_eq!(output.diagnostics.len(), 2);
        assert!(output.diagnostics.iter().all(|d| d.kind == DiagnosticKind::Recognition));
        assert!(output.diagnostics[0].message.contains("hin.traineddata"));
    }
}
