//! Search highlighting over extracted text.
//!
//! Matching is literal and case-insensitive: regex metacharacters in the query have no special
//! meaning, and matched text keeps its original casing inside the markers.
//!
//! # Example
//!
//! ```rust
//! use polyocr::text::highlight;
//!
//! assert_eq!(highlight("The Cat sat", "cat"), "The <mark>Cat</mark> sat");
//! assert_eq!(highlight("The Cat sat", ""), "The Cat sat");
//! ```

use crate::{PolyocrError, Result};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const DEFAULT_OPEN_MARKER: &str = "<mark>";
pub const DEFAULT_CLOSE_MARKER: &str = "</mark>";

/// Strings inserted around each match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMarkers {
    #[serde(default = "default_open")]
    pub open: String,

    #[serde(default = "default_close")]
    pub close: String,
}

fn default_open() -> String {
    DEFAULT_OPEN_MARKER.to_string()
}

fn default_close() -> String {
    DEFAULT_CLOSE_MARKER.to_string()
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        Self {
            open: default_open(),
            close: default_close(),
        }
    }
}

impl HighlightMarkers {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Both markers must be non-empty, otherwise highlights are invisible.
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(PolyocrError::config("Highlight markers cannot be empty"));
        }
        Ok(())
    }
}

/// Byte range of one match in the original (unmarked) text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// A result's text rendered against one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedText {
    /// Text with every match wrapped in markers
    pub rendered: String,
    /// Matches in left-to-right order, never overlapping
    pub spans: Vec<MatchSpan>,
    pub match_count: usize,
}

impl HighlightedText {
    fn unchanged(text: &str) -> Self {
        Self {
            rendered: text.to_string(),
            spans: Vec::new(),
            match_count: 0,
        }
    }

    pub fn has_matches(&self) -> bool {
        self.match_count > 0
    }
}

fn query_pattern(query: &str) -> Option<Regex> {
    match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::debug!(error = %e, query_len = query.len(), "search pattern rejected; leaving text unmarked");
            None
        }
    }
}

/// Highlight `query` in `text` with the default `<mark>` markers.
///
/// An empty query returns the text unchanged.
pub fn highlight<'a>(text: &'a str, query: &str) -> Cow<'a, str> {
    if query.is_empty() {
        return Cow::Borrowed(text);
    }
    let rendered = highlight_with(text, query, &HighlightMarkers::default());
    if rendered.has_matches() {
        Cow::Owned(rendered.rendered)
    } else {
        Cow::Borrowed(text)
    }
}

/// Highlight `query` in `text` using `markers`, reporting the matched spans.
pub fn highlight_with(text: &str, query: &str, markers: &HighlightMarkers) -> HighlightedText {
    if query.is_empty() {
        return HighlightedText::unchanged(text);
    }

    let Some(pattern) = query_pattern(query) else {
        return HighlightedText::unchanged(text);
    };

    let spans: Vec<MatchSpan> = pattern
        .find_iter(text)
        .map(|m| MatchSpan {
            start: m.start(),
            end: m.end(),
        })
        .collect();

    if spans.is_empty() {
        return HighlightedText::unchanged(text);
    }

    let mut rendered =
        String::with_capacity(text.len() + spans.len() * (markers.open.len() + markers.close.len()));
    let mut last = 0;
    for span in &spans {
        rendered.push_str(&text[last..span.start]);
        rendered.push_str(&markers.open);
        rendered.push_str(&text[span.start..span.end]);
        rendered.push_str(&markers.close);
        last = span.end;
    }
    rendered.push_str(&text[last..]);

    HighlightedText {
        rendered,
        match_count: spans.len(),
        spans,
    }
}
