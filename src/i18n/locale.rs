//! Locale type: Flexible, validated locale representation.
//!
//! This module provides the `Locale` type, a lightweight handle that is
//! guaranteed to refer to a locale registered in the `LocaleRegistry`.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use anyhow::{bail, Result};

/// A validated locale.
///
/// This type represents a locale that has been validated against the
/// registry. It ensures that only supported locales can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Short language code (e.g., "en", "fr")
    code: &'static str,
}

impl Locale {
    /// English, the default locale.
    pub const ENGLISH: Locale = Locale { code: "en" };

    /// French.
    pub const FRENCH: Locale = Locale { code: "fr" };

    /// Punjabi.
    pub const PUNJABI: Locale = Locale { code: "pa" };

    /// Hindi.
    pub const HINDI: Locale = Locale { code: "hi" };

    /// Create a Locale from a locale code string.
    ///
    /// # Arguments
    /// * `code` - The locale code (e.g., "en", "pa")
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered
    /// * `Err` if the code is unknown
    ///
    /// # Example
    /// ```ignore
    /// let punjabi = Locale::from_code("pa")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Locale> {
        let registry = LocaleRegistry::get();

        match registry.get_by_code(code) {
            // Use the static str from the registry
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown locale code: '{}'", code),
        }
    }

    /// Get the default locale.
    ///
    /// This is the locale served without a URL prefix and the terminal
    /// fallback when a translation document cannot be loaded.
    pub fn default_locale() -> Locale {
        let config = LocaleRegistry::get().default_locale();
        Locale { code: config.code }
    }

    /// All registered locales, in registry priority order.
    pub fn all() -> Vec<Locale> {
        LocaleRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    /// Get the locale code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full locale configuration from the registry.
    ///
    /// # Panics
    /// Panics if the locale code is not found in the registry. This should
    /// never happen if the Locale was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LocaleConfig {
        LocaleRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be valid")
    }

    /// Get the English name of the locale's language.
    pub fn english_name(&self) -> &'static str {
        self.config().english_name
    }

    /// Get the native name of the locale's language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Get the decorative flag glyph for the locale.
    pub fn flag(&self) -> &'static str {
        self.config().flag
    }

    /// Whether the locale's language is written right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.config().rtl
    }

    /// Whether this is the default locale.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}
