//! Caller-owned state for one interactive extraction session.
//!
//! A session keeps the most recent batch output so it can be searched and exported repeatedly
//! without re-running OCR. Recording a new batch replaces the previous one.

use serde::Serialize;

use crate::text::{HighlightMarkers, HighlightedText, highlight_with};
use crate::types::{BatchOutput, Diagnostic, ExtractionResult};

/// MIME type of exported text.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// What a download sink needs to save one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPayload {
    pub text: String,
    pub file_name: String,
    pub mime_type: &'static str,
}

/// Suggested download name for the result at zero-based `index`.
pub fn export_file_name(index: usize) -> String {
    format!("extracted_text_image_{}.txt", index + 1)
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionSession {
    markers: HighlightMarkers,
    last: BatchOutput,
}

impl ExtractionSession {
    pub fn new(markers: HighlightMarkers) -> Self {
        Self {
            markers,
            last: BatchOutput::default(),
        }
    }

    /// Replace the stored results with `output`.
    pub fn record(&mut self, output: BatchOutput) {
        tracing::debug!(
            results = output.results.len(),
            diagnostics = output.diagnostics.len(),
            "session results replaced"
        );
        self.last = output;
    }

    pub fn clear(&mut self) {
        self.last = BatchOutput::default();
    }

    pub fn results(&self) -> &[ExtractionResult] {
        &self.last.results
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.last.diagnostics
    }

    pub fn markers(&self) -> &HighlightMarkers {
        &self.markers
    }

    /// Highlight `query` in every stored result, in result order.
    pub fn search(&self, query: &str) -> Vec<HighlightedText> {
        self.last
            .results
            .iter()
            .map(|result| highlight_with(&result.text, query, &self.markers))
            .collect()
    }

    /// Text for a clipboard sink.
    pub fn copy_text(&self, index: usize) -> Option<&str> {
        self.last.results.get(index).map(|result| result.text.as_str())
    }

    /// Payload for a download sink, or `None` if `index` is out of range.
    pub fn export(&self, index: usize) -> Option<ExportPayload> {
        self.last.results.get(index).map(|result| ExportPayload {
            text: result.text.clone(),
            file_name: export_file_name(result.index),
            mime_type: EXPORT_MIME_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiagnosticKind;

    fn output() -> BatchOutput {
        let diagnostic = Diagnostic {
            index: 1,
            source_name: "b.png".to_string(),
            kind: DiagnosticKind::Recognition,
            message: "Recognition error: timeout".to_string(),
        };
        BatchOutput {
            results: vec![
                ExtractionResult::succeeded(0, "a.png", "The Cat sat on the mat".to_string(), "en".to_string()),
                ExtractionResult::failed(diagnostic.clone()),
                ExtractionResult::succeeded(2, "c.png", "CATALOG".to_string(), "en".to_string()),
            ],
            diagnostics: vec![diagnostic],
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = ExtractionSession::default();
        assert!(session.results().is_empty());
        assert!(session.search("cat").is_empty());
        assert!(session.export(0).is_none());
    }

    #[test]
    fn test_search_covers_every_result() {
        let mut session = ExtractionSession::new(HighlightMarkers::default());
        session.record(output());

        let highlights = session.search("cat");
        assert_eq!(highlights.len(), 3);
        assert_eq!(highlights[0].rendered, "The <mark>Cat</mark> sat on the mat");
        assert_eq!(highlights[1].rendered, "");
        assert_eq!(highlights[2].rendered, "<mark>CAT</mark>ALOG");
    }

    #[test]
    fn test_search_with_empty_query_is_identity() {
        let mut session = ExtractionSession::default();
        session.record(output());
        let rendered: Vec<String> = session.search("").into_iter().map(|h| h.rendered).collect();
        assert_eq!(rendered, vec!["The Cat sat on the mat", "", "CATALOG"]);
    }

    #[test]
    fn test_export_payload() {
        let mut session = ExtractionSession::default();
        session.record(output());

        let payload = session.export(2).unwrap();
        assert_eq!(payload.text, "CATALOG");
        assert_eq!(payload.file_name, "extracted_text_image_3.txt");
        assert_eq!(payload.mime_type, "text/plain");
        assert!(session.export(3).is_none());
        assert_eq!(session.copy_text(0), Some("The Cat sat on the mat"));
    }

    #[test]
    fn test_record_replaces_previous_run() {
        let mut session = ExtractionSession::default();
        session.record(output());
        assert_eq!(session.diagnostics().len(), 1);

        session.record(BatchOutput {
            results: vec![ExtractionResult::succeeded(0, "z.png", "new".to_string(), "en".to_string())],
            diagnostics: Vec::new(),
        });
        assert_eq!(session.results().len(), 1);
        assert!(session.diagnostics().is_empty());

        session.clear();
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_custom_markers() {
        let mut session = ExtractionSession::new(HighlightMarkers::new("[", "]"));
        session.record(output());
        assert_eq!(session.search("mat")[0].rendered, "The Cat sat on the [mat]");
    }
}
