//! Locale registry: Single source of truth for all supported locales.
//!
//! This module provides a centralized registry of every locale the site can
//! serve. It uses a singleton pattern with `OnceLock` to ensure thread-safe
//! initialization and access. The registration order is meaningful: it is the
//! priority order used when matching browser language preferences.

use std::sync::OnceLock;

/// Configuration for a supported locale.
///
/// Contains all metadata for a specific locale, including its code, display
/// names, decorative flag, text direction, and whether it is the default.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Short language code (e.g., "en", "fr", "pa")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "French", "Punjabi")
    pub english_name: &'static str,

    /// Native name of the language (e.g., "English", "Français", "ਪੰਜਾਬੀ")
    pub native_name: &'static str,

    /// Decorative flag glyph shown in the language switcher
    pub flag: &'static str,

    /// Whether the language is written right-to-left
    pub rtl: bool,

    /// Whether this is the default locale (only one should be true)
    pub is_default: bool,
}

/// Global locale registry singleton.
///
/// The registry holds every supported locale in priority order and provides
/// methods to query them. It is initialized once on first access and remains
/// immutable thereafter.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    ///
    /// Initializes the registry on first call and returns a reference to the
    /// singleton instance on subsequent calls.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code.
    ///
    /// Matching is exact and case-sensitive; region subtags are not
    /// normalized at this layer ("fr-CA" does not match "fr").
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "en", "pa")
    ///
    /// # Returns
    /// * `Some(&LocaleConfig)` if the locale is registered
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Get all supported locales in registration order.
    ///
    /// The order is stable and encodes matching priority for browser
    /// language detection.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// Get the default locale configuration.
    ///
    /// The default locale is served without a URL prefix and is the terminal
    /// fallback for translation loading. There should be exactly one.
    ///
    /// # Panics
    /// Panics if no default locale is configured, if multiple defaults are
    /// configured, or if the default is marked right-to-left (this indicates
    /// a configuration error).
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale configured in registry"),
            1 => {
                let default = defaults[0];
                if default.rtl {
                    panic!(
                        "Default locale '{}' must be left-to-right",
                        default.code
                    );
                }
                default
            }
            _ => panic!("Multiple default locales configured in registry"),
        }
    }

    /// Check whether a locale code is supported.
    ///
    /// # Arguments
    /// * `code` - The locale code to check
    ///
    /// # Returns
    /// `true` if the code is registered (exact match), `false` otherwise.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Default locale configurations.
///
/// Returns the set of locales the site serves, in matching-priority order.
/// English is the default; French, Punjabi, and Hindi are served under a
/// path prefix.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            english_name: "English",
            native_name: "English",
            flag: "🇬🇧",
            rtl: false,
            is_default: true,
        },
        LocaleConfig {
            code: "fr",
            english_name: "French",
            native_name: "Français",
            flag: "🇫🇷",
            rtl: false,
            is_default: false,
        },
        LocaleConfig {
            code: "pa",
            english_name: "Punjabi",
            native_name: "ਪੰਜਾਬੀ",
            flag: "🇮🇳",
            rtl: false,
            is_default: false,
        },
        LocaleConfig {
            code: "hi",
            english_name: "Hindi",
            native_name: "हिन्दी",
            flag: "🇮🇳",
            rtl: false,
            is_default: false,
        },
    ]
}
