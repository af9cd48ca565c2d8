//! Recognition language table and validated language selections.
//!
//! Users pick languages by display name ("English", "Chinese (Simplified)"); the OCR backend
//! wants Tesseract codes (`eng`, `chi_sim`). [`LanguageTable`] holds the fixed name→code
//! mapping and [`LanguageSet`] is the validated, deduplicated selection passed to a run.

use crate::ocr::validation::{LANGUAGE_SEPARATOR, validate_language_code};
use crate::{PolyocrError, Result};
use serde::Serialize;

/// Reference name→code pairs, in display order.
pub const REFERENCE_LANGUAGES: &[(&str, &str)] = &[
    ("English", "eng"),
    ("Hindi", "hin"),
    ("French", "fra"),
    ("Spanish", "spa"),
    ("German", "deu"),
    ("Chinese (Simplified)", "chi_sim"),
    ("Japanese", "jpn"),
    ("Korean", "kor"),
];

/// Languages selected when the caller does not choose any.
pub const DEFAULT_LANGUAGE_NAMES: &[&str] = &["English", "Hindi"];

/// One row of the language table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    pub name: String,
    pub code: String,
}

/// The supported-language table every [`LanguageSet`] is validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageTable {
    entries: Vec<LanguageEntry>,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl LanguageTable {
    /// The built-in table of [`REFERENCE_LANGUAGES`].
    pub fn reference() -> Self {
        Self {
            entries: REFERENCE_LANGUAGES
                .iter()
                .map(|(name, code)| LanguageEntry {
                    name: (*name).to_string(),
                    code: (*code).to_string(),
                })
                .collect(),
        }
    }

    /// Extend the table with additional name→code pairs.
    ///
    /// A name already in the table is remapped to the new code.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::Config` if a name is blank or a code is not a known Tesseract code.
    pub fn with_extra<I, N, C>(mut self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, C)>,
        N: Into<String>,
        C: Into<String>,
    {
        for (name, code) in extra {
            let name = name.into().trim().to_string();
            let code = code.into().trim().to_string();

            if name.is_empty() {
                return Err(PolyocrError::config(format!(
                    "Language name for code '{}' cannot be empty",
                    code
                )));
            }
            if code.contains(LANGUAGE_SEPARATOR) {
                return Err(PolyocrError::config(format!(
                    "Language '{}' must map to a single code, got '{}'",
                    name, code
                )));
            }
            validate_language_code(&code)
                .map_err(|e| PolyocrError::config_with_source(format!("Invalid code for language '{}'", name), e))?;

            match self.entries.iter_mut().find(|entry| entry.name.eq_ignore_ascii_case(&name)) {
                Some(existing) => existing.code = code,
                None => self.entries.push(LanguageEntry { name, code }),
            }
        }
        Ok(self)
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    /// Look up a code by display name, ignoring ASCII case and surrounding whitespace.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
            .map(|entry| entry.code.as_str())
    }

    /// Look up a display name by code.
    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.name.as_str())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.name_for(code).is_some()
    }
}

/// A non-empty, ordered, deduplicated set of recognition-language codes.
///
/// Constructed only through [`LanguageSet::from_names`] or [`LanguageSet::from_codes`], so every
/// code is guaranteed to come from the table it was built against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSet {
    codes: Vec<String>,
    names: Vec<String>,
}

impl LanguageSet {
    /// Build a set from display names.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::InvalidLanguageSelection` if the selection is empty or names a
    /// language missing from `table`.
    pub fn from_names<I, S>(table: &LanguageTable, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            codes: Vec::new(),
            names: Vec::new(),
        };

        for name in names {
            let name = name.as_ref();
            let code = table.code_for(name).ok_or_else(|| {
                PolyocrError::invalid_language_selection(format!("Unsupported language '{}'", name.trim()))
            })?;
            set.push(table, code);
        }

        set.ensure_not_empty()
    }

    /// Build a set from Tesseract codes already present in `table`.
    ///
    /// # Errors
    ///
    /// Returns `PolyocrError::InvalidLanguageSelection` if the selection is empty or contains a
    /// code missing from `table`.
    pub fn from_codes<I, S>(table: &LanguageTable, codes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self {
            codes: Vec::new(),
            names: Vec::new(),
        };

        for code in codes {
            let code = code.as_ref().trim();
            if !table.contains_code(code) {
                return Err(PolyocrError::invalid_language_selection(format!(
                    "Unsupported language code '{}'",
                    code
                )));
            }
            set.push(table, code);
        }

        set.ensure_not_empty()
    }

    /// The default English + Hindi selection against the reference table.
    pub fn default_selection() -> Self {
        let table = LanguageTable::reference();
        let mut set = Self {
            codes: Vec::new(),
            names: Vec::new(),
        };

        for name in DEFAULT_LANGUAGE_NAMES {
            if let Some(code) = table.code_for(name) {
                set.push(&table, code);
            }
        }

        set
    }

    fn push(&mut self, table: &LanguageTable, code: &str) {
        if self.codes.iter().any(|existing| existing == code) {
            return;
        }
        self.codes.push(code.to_string());
        self.names.push(table.name_for(code).unwrap_or(code).to_string());
    }

    fn ensure_not_empty(self) -> Result<Self> {
        if self.codes.is_empty() {
            return Err(PolyocrError::invalid_language_selection(
                "At least one recognition language must be selected",
            ));
        }
        Ok(self)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes joined with `+`, the form Tesseract reads as "use all of these models".
    pub fn tesseract_spec(&self) -> String {
        let separator = LANGUAGE_SEPARATOR.to_string();
        self.codes.join(separator.as_str())
    }
}

impl std::fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tesseract_spec())
    }
}
