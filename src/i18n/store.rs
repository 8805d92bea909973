//! Translation store: cached catalog loading with fallback.
//!
//! The store owns a per-instance, append-only document cache keyed by locale
//! code and a content source to fill it from. `load` never fails from the
//! caller's point of view: unsupported codes are substituted with the default
//! locale, fetch failures fall back to the default locale's catalog, and only
//! when the default itself cannot be loaded does the store hand back an empty
//! document alongside the terminal error.
//!
//! Cache entries are written once per code and never mutated. Two concurrent
//! loads of the same uncached code may both fetch and both insert; the writes
//! carry equivalent content, so the race is tolerated rather than locked out.

use crate::i18n::document::TranslationDocument;
use crate::i18n::locale::Locale;
use crate::i18n::metrics::StoreMetrics;
use crate::i18n::registry::LocaleRegistry;
use crate::i18n::source::{SourceError, TranslationSource};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info, warn};

/// One cached catalog and when it was loaded.
#[derive(Debug, Clone)]
struct CacheEntry {
    document: Arc<TranslationDocument>,
    loaded_at: DateTime<Utc>,
}

/// Result of a document load.
///
/// `locale` is the locale in effect: the requested code, or the default
/// after an unsupported code was substituted. When a fetch failure forces
/// the content to fall back, `document` holds the default locale's catalog
/// while `locale` keeps the requested code. `error` is set only in the
/// terminal state where even the default locale could not be loaded; the
/// document is then empty and every lookup falls through to fallback text.
#[derive(Debug)]
pub struct LoadedTranslations {
    /// Locale in effect after unsupported-code substitution
    pub locale: Locale,

    /// The catalog to serve; empty when `error` is set
    pub document: Arc<TranslationDocument>,

    /// Terminal failure, present only when the default locale failed too
    pub error: Option<SourceError>,
}

impl LoadedTranslations {
    /// Whether the load produced a usable catalog.
    pub fn is_ready(&self) -> bool {
        self.error.is_none()
    }
}

/// A cache entry summary for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CachedLocale {
    /// Locale code of the cached catalog
    pub code: String,

    /// When the catalog was loaded
    pub loaded_at: DateTime<Utc>,
}

/// Cached, fallback-aware access to translation catalogs.
///
/// Each store instance owns its cache and metrics; shared access happens by
/// wrapping the store in an `Arc`, not through globals.
#[derive(Debug)]
pub struct TranslationStore {
    source: TranslationSource,
    cache: RwLock<HashMap<String, CacheEntry>>,
    metrics: StoreMetrics,
}

impl TranslationStore {
    /// Create a store over a content source, with an empty cache.
    pub fn new(source: TranslationSource) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
            metrics: StoreMetrics::new(),
        }
    }

    /// Load the catalog for a locale code.
    ///
    /// Idempotent per code: once a load succeeds, later calls return the
    /// cached document without touching the source. Unsupported codes are
    /// silently substituted with the default locale (logged and counted,
    /// never surfaced as an error). A fetch failure for a non-default locale
    /// falls back to the default locale's catalog; only a failure of the
    /// default itself yields the empty-document terminal state.
    ///
    /// Failures cache nothing, so a later call retries the source.
    pub async fn load(&self, code: &str) -> LoadedTranslations {
        let default = Locale::default_locale();

        let locale = match Locale::from_code(code) {
            Ok(locale) => locale,
            Err(_) => {
                warn!(
                    "Requested locale '{}' is not supported, serving '{}'",
                    code,
                    default.code()
                );
                self.metrics.record_substitution();
                default
            }
        };

        match self.load_single(locale).await {
            Ok(document) => LoadedTranslations {
                locale,
                document,
                error: None,
            },
            Err(err) if locale != default => {
                warn!(
                    "Failed to load translations for '{}' ({}), falling back to '{}'",
                    locale.code(),
                    err,
                    default.code()
                );
                // The document falls back; the locale selection does not
                match self.load_single(default).await {
                    Ok(document) => LoadedTranslations {
                        locale,
                        document,
                        error: None,
                    },
                    Err(default_err) => self.terminal_failure(locale, default_err),
                }
            }
            Err(err) => self.terminal_failure(locale, err),
        }
    }

    /// Load one registered locale: cache first, then a single source fetch.
    async fn load_single(&self, locale: Locale) -> Result<Arc<TranslationDocument>, SourceError> {
        if let Some(document) = self.cached(locale.code()) {
            self.metrics.record_cache_hit();
            debug!("Translation cache hit for '{}'", locale.code());
            return Ok(document);
        }
        self.metrics.record_cache_miss();

        let document = match self.source.fetch(locale.code()).await {
            Ok(document) => Arc::new(document),
            Err(err) => {
                self.metrics.record_fetch_failure();
                return Err(err);
            }
        };

        self.insert(locale.code(), Arc::clone(&document));
        info!("Loaded translations for '{}'", locale.code());
        Ok(document)
    }

    /// Terminal state: the default locale itself could not be loaded.
    fn terminal_failure(&self, locale: Locale, err: SourceError) -> LoadedTranslations {
        error!(
            "Failed to load translations for default locale '{}': {}",
            Locale::default_locale().code(),
            err
        );
        LoadedTranslations {
            locale,
            document: Arc::new(TranslationDocument::empty()),
            error: Some(err),
        }
    }

    /// Preload every registered locale's catalog concurrently.
    ///
    /// Failures are logged by `load` and do not abort the warmup; requests
    /// for a locale that failed to warm will retry on demand.
    pub async fn warm(&self) {
        let registry = LocaleRegistry::get();
        let loads = registry.list().iter().map(|config| self.load(config.code));
        let total = join_all(loads).await.len();

        // Failures cache nothing, so the cache size is the ready count
        let ready = self.cached_locales().len();
        info!("Warmed translation cache: {}/{} locales ready", ready, total);
    }

    /// Codes currently cached, with load timestamps, sorted by code.
    pub fn cached_locales(&self) -> Vec<CachedLocale> {
        let cache = self.cache.read().expect("translation cache lock poisoned");
        let mut entries: Vec<CachedLocale> = cache
            .iter()
            .map(|(code, entry)| CachedLocale {
                code: code.clone(),
                loaded_at: entry.loaded_at,
            })
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        entries
    }

    /// Counters for this store instance.
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    // Lock guards below are scoped to these helpers so they never live
    // across an await point.

    fn cached(&self, code: &str) -> Option<Arc<TranslationDocument>> {
        let cache = self.cache.read().expect("translation cache lock poisoned");
        cache.get(code).map(|entry| Arc::clone(&entry.document))
    }

    fn insert(&self, code: &str, document: Arc<TranslationDocument>) {
        let mut cache = self.cache.write().expect("translation cache lock poisoned");
        // Last write wins on a same-code race; the content is equivalent
        cache.insert(
            code.to_string(),
            CacheEntry {
                document,
                loaded_at: Utc::now(),
            },
        );
    }
}
