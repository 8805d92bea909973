//! Locale gateway for a multilingual marketing site.
//!
//! The crate resolves which locale a visitor sees and what translated text
//! reaches the page: a registry of supported locales, cached catalog loading
//! with default-locale fallback, a fixed resolution precedence chain
//! (explicit path locale, persisted cookie, browser languages, default), and
//! routing middleware that keeps the default locale unprefixed in the URL
//! while every other locale lives under its code.

pub mod config;
pub mod i18n;
pub mod routing;
pub mod server;
