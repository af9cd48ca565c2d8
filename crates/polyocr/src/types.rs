use serde::Serialize;
use std::fmt;

use crate::language_detection::UNKNOWN_LANGUAGE;

// ============================================================================
// ============================================================================

/// Shown in place of an empty extraction.
pub const NO_TEXT_PLACEHOLDER: &str = "No text detected";

/// One slot of a batch run, at the same position as its input image.
///
/// Failed slots still occupy their position, with empty `text` and an unknown language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionResult {
    /// Zero-based position of the source image in the input sequence
    pub index: usize,
    pub source_name: String,
    /// Recognized text, trimmed at both ends; possibly empty
    pub text: String,
    /// ISO 639-1 code or `"Unknown"`
    pub detected_language: String,
    pub status: ExtractionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Ok,
    Failed(Diagnostic),
}

/// Which per-image step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Decode,
    Recognition,
}

/// User-facing report of one failed slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub index: usize,
    pub source_name: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error processing image {} ({}): {}",
            self.index + 1,
            self.source_name,
            self.message
        )
    }
}

impl ExtractionResult {
    pub(crate) fn succeeded(index: usize, source_name: &str, text: String, detected_language: String) -> Self {
        Self {
            index,
            source_name: source_name.to_string(),
            text,
            detected_language,
            status: ExtractionStatus::Ok,
        }
    }

    pub(crate) fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            index: diagnostic.index,
            source_name: diagnostic.source_name.clone(),
            text: String::new(),
            detected_language: UNKNOWN_LANGUAGE.to_string(),
            status: ExtractionStatus::Failed(diagnostic),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.status, ExtractionStatus::Ok)
    }

    /// The slot as a `Result`: the text on success, the diagnostic on failure.
    pub fn outcome(&self) -> Result<&str, &Diagnostic> {
        match &self.status {
            ExtractionStatus::Ok => Ok(&self.text),
            ExtractionStatus::Failed(diagnostic) => Err(diagnostic),
        }
    }

    /// `Image <n> (Detected Language: <Lang>)`, numbered from one.
    pub fn heading(&self) -> String {
        format!(
            "Image {} (Detected Language: {})",
            self.index + 1,
            capitalize(&self.detected_language)
        )
    }

    /// What a result card shows: the diagnostic for a failed slot, otherwise the text or a
    /// placeholder when nothing was recognized.
    pub fn display_text(&self) -> &str {
        match &self.status {
            ExtractionStatus::Failed(diagnostic) => &diagnostic.message,
            ExtractionStatus::Ok if self.text.is_empty() => NO_TEXT_PLACEHOLDER,
            ExtractionStatus::Ok => &self.text,
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Everything a batch run produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchOutput {
    /// One entry per input image, in input order
    pub results: Vec<ExtractionResult>,
    /// One entry per failed slot, in encounter order
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchOutput {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|result| result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.diagnostics.len()
    }
}
