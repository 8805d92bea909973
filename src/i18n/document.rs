//! Translation document: nested catalog of translated strings for one locale.
//!
//! A document is a JSON object whose values are either leaf strings or nested
//! objects, addressed with dotted keys ("contact.form.submit"). Lookups are
//! total: a missing or malformed path resolves to caller-supplied fallback
//! text, or to the raw key so untranslated spots are visible on the page
//! rather than silently blank.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error returned when raw content cannot form a translation document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The content parsed, but the root is not a JSON object.
    #[error("translation data is not a JSON object")]
    NotAnObject,

    /// The content is not valid JSON at all.
    #[error("translation data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Nested tree of translated strings for one locale.
///
/// Immutable after construction; the store replaces documents wholesale
/// rather than patching them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TranslationDocument {
    root: Value,
}

impl TranslationDocument {
    /// The empty document. Every lookup against it falls through to the
    /// caller's fallback text.
    pub fn empty() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// # Arguments
    /// * `value` - The parsed content; must be a JSON object at the root
    ///
    /// # Returns
    /// * `Ok(TranslationDocument)` if the root is an object
    /// * `Err(DocumentError::NotAnObject)` for any other JSON type
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        if value.is_object() {
            Ok(Self { root: value })
        } else {
            Err(DocumentError::NotAnObject)
        }
    }

    /// Parse a document from raw JSON text.
    pub fn from_json(raw: &str) -> Result<Self, DocumentError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    /// Whether the document contains no keys at all.
    pub fn is_empty(&self) -> bool {
        self.root
            .as_object()
            .map(|map| map.is_empty())
            .unwrap_or(true)
    }

    /// Walk the document along a dotted key.
    ///
    /// Returns the leaf string only when every segment matches a nested
    /// object key and the final value is a string. Any early abort (missing
    /// segment, non-object intermediate, non-string leaf) yields `None`.
    ///
    /// # Arguments
    /// * `key` - Dotted lookup path (e.g., "hero.title")
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.get(segment)?;
        }
        current.as_str()
    }

    /// Resolve a dotted key with fallback semantics.
    ///
    /// Returns the translated string when the key resolves; otherwise the
    /// provided fallback, or the raw key itself when no fallback is given.
    /// Never fails.
    ///
    /// # Arguments
    /// * `key` - Dotted lookup path
    /// * `fallback` - Literal text to use when the key does not resolve
    pub fn resolve(&self, key: &str, fallback: Option<&str>) -> String {
        match self.get(key) {
            Some(value) => value.to_string(),
            None => fallback.unwrap_or(key).to_string(),
        }
    }

    /// Raw value at a dotted path, if every segment matches.
    ///
    /// Low-level accessor used by catalog validation to distinguish missing
    /// keys from shape mismatches.
    pub fn value_at(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// All dotted paths that resolve to leaf strings, in sorted order.
    pub fn dotted_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, String::new(), &mut keys);
        keys.sort();
        keys
    }
}

impl Default for TranslationDocument {
    fn default() -> Self {
        Self::empty()
    }
}

fn collect_keys(node: &Value, prefix: String, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (segment, child) in map {
                let path = if prefix.is_empty() {
                    segment.clone()
                } else {
                    format!("{}.{}", prefix, segment)
                };
                collect_keys(child, path, out);
            }
        }
        Value::String(_) => {
            if !prefix.is_empty() {
                out.push(prefix);
            }
        }
        // Non-string leaves are unreachable through `get` and are reported
        // by catalog validation, not collected here.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> TranslationDocument {
        TranslationDocument::from_value(json!({
            "a": { "b": "X" },
            "hero": {
                "title": "Coverage that follows you home",
                "cta": { "label": "Get a quote" }
            },
            "count": 3
        }))
        .expect("Should build from object")
    }

    // ==================== get Tests ====================

    #[test]
    fn test_get_nested_key() {
        let doc = sample_document();
        assert_eq!(doc.get("a.b"), Some("X"));
        assert_eq!(doc.get("hero.cta.label"), Some("Get a quote"));
    }

    #[test]
    fn test_get_missing_segment() {
        let doc = sample_document();
        assert_eq!(doc.get("a.c"), None);
        assert_eq!(doc.get("nav.home"), None);
    }

    #[test]
    fn test_get_stops_at_string_leaf() {
        // Walking "through" a string aborts rather than erroring
        let doc = sample_document();
        assert_eq!(doc.get("a.b.deeper"), None);
    }

    #[test]
    fn test_get_non_string_leaf() {
        let doc = sample_document();
        assert_eq!(doc.get("count"), None);
    }

    #[test]
    fn test_get_intermediate_node_is_not_a_leaf() {
        let doc = sample_document();
        assert_eq!(doc.get("hero"), None);
        assert_eq!(doc.get("hero.cta"), None);
    }

    #[test]
    fn test_get_empty_key() {
        let doc = sample_document();
        assert_eq!(doc.get(""), None);
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_found_key() {
        let doc = sample_document();
        assert_eq!(doc.resolve("a.b", None), "X");
    }

    #[test]
    fn test_resolve_missing_key_with_fallback() {
        let doc = sample_document();
        assert_eq!(doc.resolve("a.c", Some("F")), "F");
    }

    #[test]
    fn test_resolve_missing_key_without_fallback_returns_key() {
        let doc = sample_document();
        assert_eq!(doc.resolve("a.c", None), "a.c");
    }

    #[test]
    fn test_resolve_against_empty_document() {
        let doc = TranslationDocument::empty();
        assert_eq!(doc.resolve("a.b", Some("F")), "F");
        assert_eq!(doc.resolve("a.b", None), "a.b");
    }

    #[test]
    fn test_resolve_prefers_translation_over_fallback() {
        let doc = sample_document();
        assert_eq!(doc.resolve("hero.cta.label", Some("F")), "Get a quote");
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_from_value_accepts_object() {
        assert!(TranslationDocument::from_value(json!({})).is_ok());
    }

    #[test]
    fn test_from_value_rejects_array() {
        let result = TranslationDocument::from_value(json!(["en", "fr"]));
        assert!(matches!(result, Err(DocumentError::NotAnObject)));
    }

    #[test]
    fn test_from_value_rejects_null() {
        let result = TranslationDocument::from_value(json!(null));
        assert!(matches!(result, Err(DocumentError::NotAnObject)));
    }

    #[test]
    fn test_from_value_rejects_bare_string() {
        let result = TranslationDocument::from_value(json!("hello"));
        assert!(matches!(result, Err(DocumentError::NotAnObject)));
    }

    #[test]
    fn test_from_json_valid() {
        let doc = TranslationDocument::from_json(r#"{"nav":{"home":"Home"}}"#)
            .expect("Should parse");
        assert_eq!(doc.get("nav.home"), Some("Home"));
    }

    #[test]
    fn test_from_json_invalid_syntax() {
        let result = TranslationDocument::from_json("{not json");
        assert!(matches!(result, Err(DocumentError::Json(_))));
    }

    #[test]
    fn test_empty_document_is_empty() {
        assert!(TranslationDocument::empty().is_empty());
        assert!(!sample_document().is_empty());
    }

    // ==================== dotted_keys Tests ====================

    #[test]
    fn test_dotted_keys_flattens_nested_paths() {
        let doc = sample_document();
        let keys = doc.dotted_keys();

        assert!(keys.contains(&"a.b".to_string()));
        assert!(keys.contains(&"hero.title".to_string()));
        assert!(keys.contains(&"hero.cta.label".to_string()));
    }

    #[test]
    fn test_dotted_keys_skips_non_string_leaves() {
        let doc = sample_document();
        let keys = doc.dotted_keys();
        assert!(!keys.contains(&"count".to_string()));
    }

    #[test]
    fn test_dotted_keys_sorted() {
        let doc = sample_document();
        let keys = doc.dotted_keys();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_dotted_keys_empty_document() {
        assert!(TranslationDocument::empty().dotted_keys().is_empty());
    }

    // ==================== value_at Tests ====================

    #[test]
    fn test_value_at_returns_intermediate_nodes() {
        let doc = sample_document();
        assert!(doc.value_at("hero").is_some_and(|v| v.is_object()));
        assert!(doc.value_at("count").is_some_and(|v| v.is_number()));
        assert!(doc.value_at("nav").is_none());
    }

    // ==================== Property Tests ====================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolve_never_panics_and_is_total(key in ".{0,64}") {
                let doc = sample_document();
                let resolved = doc.resolve(&key, None);
                // Either a real translation or the key echoed back
                prop_assert!(resolved == key || doc.get(&key).is_some());
            }

            #[test]
            fn empty_document_always_echoes_fallback(
                key in "[a-z.]{0,32}",
                fallback in "[A-Za-z ]{1,16}",
            ) {
                let doc = TranslationDocument::empty();
                prop_assert_eq!(doc.resolve(&key, Some(fallback.as_str())), fallback);
            }
        }
    }
}
