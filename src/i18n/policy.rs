//! Locale resolution precedence.
//!
//! Pure selection logic, no I/O: given the signals a request carries (an
//! explicit path locale, a stored cookie preference, the browser's language
//! list), pick the locale a session starts in. Later locale switches do not
//! re-run this chain; an explicit switch always wins and is persisted,
//! becoming the stored preference of the next session.

use crate::i18n::locale::Locale;

/// Pick the initial locale for a session.
///
/// Precedence, first match wins:
/// 1. `explicit`, when it names a supported locale
/// 2. `stored` (the persisted preference), when supported
/// 3. the first of `browser_tags` whose primary subtag names a supported
///    locale
/// 4. the registry default
///
/// Matching is exact and case-sensitive at every step; browser tags are the
/// only place a region subtag is tolerated, and only its primary subtag is
/// compared.
pub fn resolve_initial_locale(
    explicit: Option<&str>,
    stored: Option<&str>,
    browser_tags: &[String],
) -> Locale {
    if let Some(locale) = supported(explicit) {
        return locale;
    }
    if let Some(locale) = supported(stored) {
        return locale;
    }
    if let Some(locale) = browser_match(browser_tags) {
        return locale;
    }
    Locale::default_locale()
}

/// Parse an `Accept-Language` header value into tags in order of appearance.
///
/// Quality weights are stripped, not used for re-ordering: the header is
/// treated as the ordered preference list browsers already emit it as.
pub fn parse_language_tags(header: &str) -> Vec<String> {
    header
        .split(',')
        .filter_map(|part| {
            let tag = part.split(';').next()?.trim();
            // The wildcard carries no locale information
            if tag.is_empty() || tag == "*" {
                None
            } else {
                Some(tag.to_string())
            }
        })
        .collect()
}

fn supported(code: Option<&str>) -> Option<Locale> {
    Locale::from_code(code?).ok()
}

/// First tag whose primary subtag names a supported locale.
fn browser_match(tags: &[String]) -> Option<Locale> {
    tags.iter()
        .find_map(|tag| Locale::from_code(primary_subtag(tag)).ok())
}

/// Text before the first region delimiter: `fr-CA` and `fr_CA` yield `fr`.
fn primary_subtag(tag: &str) -> &str {
    match tag.find(['-', '_']) {
        Some(idx) => &tag[..idx],
        None => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|tag| tag.to_string()).collect()
    }

    // ==================== Precedence Tests ====================

    #[test]
    fn test_explicit_code_outranks_everything() {
        let browser = tags(&["pa-IN"]);
        let locale = resolve_initial_locale(Some("fr"), Some("hi"), &browser);
        assert_eq!(locale.code(), "fr");
    }

    #[test]
    fn test_stored_preference_outranks_browser() {
        let browser = tags(&["pa-IN"]);
        let locale = resolve_initial_locale(None, Some("hi"), &browser);
        assert_eq!(locale.code(), "hi");
    }

    #[test]
    fn test_browser_outranks_default() {
        let browser = tags(&["pa-IN"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "pa");
    }

    #[test]
    fn test_default_when_no_signal_matches() {
        let locale = resolve_initial_locale(None, None, &[]);
        assert_eq!(locale.code(), "en");
    }

    #[test]
    fn test_unsupported_explicit_falls_through_to_stored() {
        let locale = resolve_initial_locale(Some("de"), Some("fr"), &[]);
        assert_eq!(locale.code(), "fr");
    }

    #[test]
    fn test_unsupported_stored_falls_through_to_browser() {
        let browser = tags(&["hi-IN"]);
        let locale = resolve_initial_locale(None, Some("de"), &browser);
        assert_eq!(locale.code(), "hi");
    }

    #[test]
    fn test_unmatched_browser_falls_through_to_default() {
        let browser = tags(&["de-DE", "ja"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "en");
    }

    #[test]
    fn test_first_matching_browser_tag_wins() {
        let browser = tags(&["de-DE", "pa-IN", "fr"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "pa");
    }

    #[test]
    fn test_region_tags_match_by_primary_subtag() {
        // No cookie, no explicit code, browser prefers Canadian French
        let browser = tags(&["fr-CA", "pa-CA"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "fr");
    }

    #[test]
    fn test_underscore_delimiter_is_recognized() {
        let browser = tags(&["pa_IN"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "pa");
    }

    // ==================== Case Sensitivity Tests ====================

    #[test]
    fn test_explicit_match_is_case_sensitive() {
        let locale = resolve_initial_locale(Some("EN"), None, &[]);
        assert_eq!(locale.code(), "en"); // fell through to the default
    }

    #[test]
    fn test_browser_match_is_case_sensitive() {
        let browser = tags(&["FR-ca", "PA"]);
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "en");
    }

    // ==================== Header Parsing Tests ====================

    #[test]
    fn test_parse_language_tags_strips_quality_weights() {
        let parsed = parse_language_tags("fr-CA,fr;q=0.9,en-US;q=0.8,en;q=0.7");
        assert_eq!(parsed, vec!["fr-CA", "fr", "en-US", "en"]);
    }

    #[test]
    fn test_parse_language_tags_keeps_appearance_order() {
        // Quality weights do not re-sort the list
        let parsed = parse_language_tags("en;q=0.1,fr;q=0.9");
        assert_eq!(parsed, vec!["en", "fr"]);
    }

    #[test]
    fn test_parse_language_tags_trims_whitespace() {
        let parsed = parse_language_tags(" pa-IN , hi ;q=0.5");
        assert_eq!(parsed, vec!["pa-IN", "hi"]);
    }

    #[test]
    fn test_parse_language_tags_drops_wildcard_and_empties() {
        let parsed = parse_language_tags("*,fr,,;q=0.2");
        assert_eq!(parsed, vec!["fr"]);
    }

    #[test]
    fn test_parse_language_tags_empty_header() {
        assert!(parse_language_tags("").is_empty());
    }

    #[test]
    fn test_parsed_header_feeds_resolution() {
        let browser = parse_language_tags("de-DE,fr-CA;q=0.9,en;q=0.8");
        let locale = resolve_initial_locale(None, None, &browser);
        assert_eq!(locale.code(), "fr");
    }

    // ==================== Subtag Tests ====================

    #[test]
    fn test_primary_subtag_extraction() {
        assert_eq!(primary_subtag("fr-CA"), "fr");
        assert_eq!(primary_subtag("pa_IN"), "pa");
        assert_eq!(primary_subtag("en"), "en");
        assert_eq!(primary_subtag(""), "");
    }

    // ==================== Property Tests ====================

    mod properties {
        use super::*;
        use crate::i18n::registry::LocaleRegistry;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolved_locale_is_always_supported(
                explicit in proptest::option::of("[a-zA-Z-]{0,8}"),
                stored in proptest::option::of("[a-zA-Z-]{0,8}"),
                browser in proptest::collection::vec("[a-zA-Z_-]{0,8}", 0..4),
            ) {
                let locale =
                    resolve_initial_locale(explicit.as_deref(), stored.as_deref(), &browser);
                prop_assert!(LocaleRegistry::get().is_supported(locale.code()));
            }

            #[test]
            fn supported_explicit_code_always_wins(
                stored in proptest::option::of("[a-z]{0,4}"),
                browser in proptest::collection::vec("[a-z-]{0,8}", 0..4),
            ) {
                let locale = resolve_initial_locale(Some("pa"), stored.as_deref(), &browser);
                prop_assert_eq!(locale.code(), "pa");
            }
        }
    }
}
