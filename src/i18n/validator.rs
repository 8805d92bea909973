//! Catalog coverage validation.
//!
//! Compares a locale's translation catalog against the default locale's
//! catalog (the reference): every key the reference defines should exist
//! with the same shape, and interpolation placeholders (e.g. `{year}`)
//! should survive translation. Missing and orphan keys are warnings; shape
//! divergence and empty catalogs are errors.

use crate::i18n::document::TranslationDocument;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical problems: the catalog cannot serve its locale correctly
    pub errors: Vec<String>,

    /// Coverage gaps that fall back at runtime rather than breaking
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog coverage against the reference catalog.
pub struct CatalogValidator;

// Regex pattern for extraction (cached for performance)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Validate a candidate catalog against the reference catalog.
    ///
    /// This function checks that:
    /// - every key of the reference exists in the candidate (missing keys
    ///   are warnings, they fall back to the default at runtime)
    /// - the candidate defines no keys the reference lacks (orphans are
    ///   warnings)
    /// - shapes agree: a string leaf in one catalog is not a nested section
    ///   in the other (errors)
    /// - `{placeholder}` tokens in reference strings survive translation
    ///
    /// # Arguments
    /// * `reference` - The default locale's catalog
    /// * `candidate` - The catalog being validated
    ///
    /// # Returns
    /// A `ValidationReport` containing any errors or warnings found.
    pub fn validate(
        reference: &TranslationDocument,
        candidate: &TranslationDocument,
    ) -> ValidationReport {
        let mut report = ValidationReport::new();

        if reference.is_empty() {
            report
                .errors
                .push("Reference catalog is empty".to_string());
            return report;
        }
        if candidate.is_empty() {
            report.errors.push("Catalog is empty".to_string());
            return report;
        }

        for key in reference.dotted_keys() {
            match candidate.value_at(&key) {
                Some(Value::String(translated)) => {
                    let reference_text = reference.get(&key).unwrap_or_default();
                    Self::check_placeholders(&key, reference_text, translated, &mut report);
                }
                Some(other) => {
                    report.errors.push(format!(
                        "Key '{}' should be a string but is {}",
                        key,
                        value_kind(other)
                    ));
                }
                None => {
                    report.warnings.push(format!("Missing key '{}'", key));
                }
            }
        }

        for key in candidate.dotted_keys() {
            match reference.value_at(&key) {
                Some(Value::String(_)) => {} // covered above
                Some(other) => {
                    report.errors.push(format!(
                        "Key '{}' is a string but the reference has {} there",
                        key,
                        value_kind(other)
                    ));
                }
                None => {
                    report
                        .warnings
                        .push(format!("Orphan key '{}' not in the reference catalog", key));
                }
            }
        }

        report
    }

    /// Compare placeholder sets between a reference string and its translation.
    ///
    /// Order is not compared; translations legitimately reorder placeholders.
    fn check_placeholders(
        key: &str,
        reference_text: &str,
        translated: &str,
        report: &mut ValidationReport,
    ) {
        let mut expected = Self::extract_placeholders(reference_text);
        let mut found = Self::extract_placeholders(translated);
        expected.sort();
        found.sort();

        if expected != found {
            report.warnings.push(format!(
                "Placeholder mismatch in '{}': reference has {:?}, catalog has {:?}",
                key, expected, found
            ));
        }
    }

    /// Extract all `{placeholder}` tokens from text
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex =
            PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([a-zA-Z0-9_]+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(0).map(|m| m.as_str().to_string()))
            .collect()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a nested section",
    }
}
