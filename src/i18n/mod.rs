//! Internationalization (i18n) module for multi-language support.
//!
//! This module provides a centralized, extensible architecture for resolving
//! which locale a visitor sees and what translated text reaches the page.
//! All locale-related logic, catalog loading, and translation infrastructure
//! is contained here.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and their metadata
//! - `locale`: Type-safe Locale type that replaces hardcoded enums
//! - `document`: Nested translation catalog with dotted-key lookup
//! - `source`: Catalog content sources (local directory or remote HTTP)
//! - `store`: Cached catalog loading with default-locale fallback
//! - `policy`: Initial-locale resolution precedence
//! - `session`: Per-session locale state with guarded switching
//! - `validator`: Catalog coverage validation
//! - `metrics`: Store observability counters
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Locale, LocaleSession, TranslationSource, TranslationStore};
//!
//! // Load catalogs from a directory, shared by all sessions
//! let store = Arc::new(TranslationStore::new(TranslationSource::directory("locales")));
//!
//! // Start a session in French and look up a key
//! let session = LocaleSession::start(store, "fr", true).await;
//! let heading = session.resolve("hero.title", Some("Insurance made simple"));
//! ```

mod document;
mod locale;
mod metrics;
mod policy;
mod registry;
mod session;
mod source;
mod store;
mod validator;

pub use document::{DocumentError, TranslationDocument};
pub use locale::Locale;
pub use metrics::{MetricsSnapshot, StoreMetrics};
pub use policy::{parse_language_tags, resolve_initial_locale};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use session::{LocaleSession, SessionStatus};
pub use source::{SourceError, TranslationSource};
pub use store::{CachedLocale, LoadedTranslations, TranslationStore};
pub use validator::{CatalogValidator, ValidationReport};
