//! Text transforms applied to extracted results.
pub mod highlight;

pub use highlight::{DEFAULT_CLOSE_MARKER, DEFAULT_OPEN_MARKER, HighlightMarkers, HighlightedText, MatchSpan};
pub use highlight::{highlight, highlight_with};
