//! Configuration loading and management.
//!
//! This module provides utilities for loading extraction configuration from various
//! sources (TOML, YAML, JSON) and discovering configuration files in the project hierarchy.

use crate::core::languages::{DEFAULT_LANGUAGE_NAMES, LanguageSet, LanguageTable};
use crate::ocr::tesseract_cli::{DEFAULT_PSM, DEFAULT_TESSERACT_COMMAND, DEFAULT_TIMEOUT_SECS};
use crate::ocr::{BACKEND_TESSERACT_CLI, BACKEND_TESSERACT_NATIVE};
use crate::text::HighlightMarkers;
use crate::{PolyocrError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name searched for by [`ExtractionConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "polyocr.toml";

/// Environment variable overriding [`OcrConfig::tesseract_cmd`].
pub const TESSERACT_CMD_ENV: &str = "POLYOCR_TESSERACT_CMD";

/// Highest page segmentation mode Tesseract accepts.
pub const MAX_PSM: u8 = 13;

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use polyocr::core::config::ExtractionConfig;
///
/// // Create with defaults
/// let config = ExtractionConfig::default();
/// assert_eq!(config.languages, vec!["English", "Hindi"]);
///
/// // Load from TOML file
/// // let config = ExtractionConfig::from_toml_file("polyocr.toml")?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Recognition languages by display name
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Additional display name → Tesseract code pairs appended to the reference table
    #[serde(default)]
    pub extra_languages: BTreeMap<String, String>,

    /// OCR backend configuration
    #[serde(default)]
    pub ocr: OcrConfig,

    /// Language detection configuration
    #[serde(default)]
    pub language_detection: LanguageDetectionConfig,

    /// Markers wrapped around search matches
    #[serde(default)]
    pub highlight: HighlightMarkers,
}

/// OCR backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Backend name: "tesseract-cli" or "tesseract" (requires the `tesseract` feature)
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Path or name of the tesseract executable
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,

    /// Directory holding `*.traineddata` models (None = backend default)
    #[serde(default)]
    pub tessdata_dir: Option<PathBuf>,

    /// Page segmentation mode (0-13)
    #[serde(default = "default_psm")]
    pub psm: u8,

    /// Upper bound for one recognition call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Language detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageDetectionConfig {
    /// Enable language detection
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Minimum confidence threshold (0.0-1.0); 0.0 accepts the best guess
    #[serde(default)]
    pub min_confidence: f64,
}

fn default_true() -> bool {
    true
}
fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGE_NAMES.iter().map(|name| (*name).to_string()).collect()
}
fn default_backend() -> String {
    BACKEND_TESSERACT_CLI.to_string()
}
fn default_tesseract_cmd() -> String {
    DEFAULT_TESSERACT_COMMAND.to_string()
}
fn default_psm() -> u8 {
    DEFAULT_PSM
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            extra_languages: BTreeMap::new(),
            ocr: OcrConfig::default(),
            language_detection: LanguageDetectionConfig::default(),
            highlight: HighlightMarkers::default(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            tesseract_cmd: default_tesseract_cmd(),
            tessdata_dir: None,
            psm: default_psm(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LanguageDetectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_confidence: 0.0,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::Config` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| PolyocrError::config(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| PolyocrError::config(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| PolyocrError::config(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(PolyocrError::config(format!(
                "Unsupported config format for {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover configuration file in parent directories.
    ///
    /// Searches for `polyocr.toml` in current directory and parent directories.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(PolyocrError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "discovered configuration file");
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using `lookup` in place of the process environment.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command) = lookup(TESSERACT_CMD_ENV).filter(|value| !value.trim().is_empty()) {
            tracing::debug!(command = %command, "tesseract command overridden from environment");
            self.ocr.tesseract_cmd = command;
        }
    }

    /// Reference table extended with [`ExtractionConfig::extra_languages`].
    pub fn language_table(&self) -> Result<LanguageTable> {
        LanguageTable::reference().with_extra(
            self.extra_languages
                .iter()
                .map(|(name, code)| (name.clone(), code.clone())),
        )
    }

    /// The configured language selection, validated against [`Self::language_table`].
    pub fn language_set(&self) -> Result<LanguageSet> {
        LanguageSet::from_names(&self.language_table()?, &self.languages)
    }

    /// Check every setting that can be checked without running a backend.
    pub fn validate(&self) -> Result<()> {
        if self.ocr.psm > MAX_PSM {
            return Err(PolyocrError::config(format!(
                "Invalid psm {}: must be between 0 and {}",
                self.ocr.psm, MAX_PSM
            )));
        }

        if self.ocr.timeout_secs == 0 {
            return Err(PolyocrError::config("ocr.timeout_secs must be greater than zero"));
        }

        if self.ocr.tesseract_cmd.trim().is_empty() {
            return Err(PolyocrError::config("ocr.tesseract_cmd cannot be empty"));
        }

        match self.ocr.backend.as_str() {
            BACKEND_TESSERACT_CLI | BACKEND_TESSERACT_NATIVE => {}
            other => {
                return Err(PolyocrError::config(format!("Unknown OCR backend '{}'", other)));
            }
        }

        if !(0.0..=1.0).contains(&self.language_detection.min_confidence) {
            return Err(PolyocrError::config(format!(
                "language_detection.min_confidence must be within 0.0-1.0, got {}",
                self.language_detection.min_confidence
            )));
        }

        self.highlight.validate()?;
        self.language_set()?;
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        PolyocrError::config_with_source(format!("Failed to read config file {}", path.display()), e)
    })
}
