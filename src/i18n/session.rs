//! Per-session locale state.
//!
//! A `LocaleSession` owns the resolved locale state for one rendering
//! session: the active locale, the loaded document, a status, and the last
//! terminal error. Sessions share the translation store (and its cache) but
//! never each other's state.
//!
//! Locale switches are guarded by a monotonic epoch: each `set_locale` call
//! takes a ticket, and a result whose ticket is no longer current is
//! discarded instead of overwriting a newer switch. A superseded slow fetch
//! therefore cannot clobber session state after the user has moved on.

use crate::i18n::document::TranslationDocument;
use crate::i18n::locale::Locale;
use crate::i18n::store::TranslationStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Lifecycle of a session's translation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No load has been requested yet
    Idle,
    /// A locale switch is in flight
    Loading,
    /// A usable document is active
    Ready,
    /// Terminal load failure, document is empty
    Error,
}

#[derive(Debug)]
struct SessionState {
    status: SessionStatus,
    active_locale: Locale,
    document: Arc<TranslationDocument>,
    last_error: Option<String>,
}

/// Resolved locale state for one rendering session.
pub struct LocaleSession {
    store: Arc<TranslationStore>,
    inner: RwLock<SessionState>,
    epoch: AtomicU64,
    warn_missing: bool,
}

impl LocaleSession {
    /// Create an idle session with an empty document.
    ///
    /// `warn_missing` enables the per-lookup missing-key warning, meant for
    /// non-production environments; the missing-key counter is recorded
    /// either way.
    pub fn new(store: Arc<TranslationStore>, warn_missing: bool) -> Self {
        Self {
            store,
            inner: RwLock::new(SessionState {
                status: SessionStatus::Idle,
                active_locale: Locale::default_locale(),
                document: Arc::new(TranslationDocument::empty()),
                last_error: None,
            }),
            epoch: AtomicU64::new(0),
            warn_missing,
        }
    }

    /// Create a session and immediately load `code`.
    pub async fn start(store: Arc<TranslationStore>, code: &str, warn_missing: bool) -> Self {
        let session = Self::new(store, warn_missing);
        session.set_locale(code).await;
        session
    }

    /// Switch the session to a locale.
    ///
    /// Always leaves the session in `Ready` or `Error`, never propagates a
    /// load failure. Persisting the choice (the preference cookie) is the
    /// caller's concern. If a newer switch starts while this one's load is
    /// in flight, this one's result is discarded when it resolves.
    pub async fn set_locale(&self, code: &str) {
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.inner.write().expect("locale session lock poisoned");
            state.status = SessionStatus::Loading;
        }

        let loaded = self.store.load(code).await;

        let mut state = self.inner.write().expect("locale session lock poisoned");
        // A newer switch owns the session now; applying this result would
        // roll the state back
        if self.epoch.load(Ordering::SeqCst) != ticket {
            debug!("Discarding superseded locale switch to '{}'", code);
            return;
        }

        state.active_locale = loaded.locale;
        state.document = loaded.document;
        match loaded.error {
            Some(err) => {
                state.status = SessionStatus::Error;
                state.last_error = Some(err.to_string());
            }
            None => {
                state.status = SessionStatus::Ready;
                state.last_error = None;
            }
        }
    }

    /// Look up a dotted key in the active document.
    ///
    /// Missing keys are expected, not errors: the lookup falls back to
    /// `fallback` or the key itself, records the miss, and warns only when
    /// the session was built with `warn_missing`.
    pub fn resolve(&self, key: &str, fallback: Option<&str>) -> String {
        let state = self.inner.read().expect("locale session lock poisoned");
        match state.document.get(key) {
            Some(value) => value.to_string(),
            None => {
                self.store.metrics().record_missing_key();
                if self.warn_missing {
                    warn!(
                        "Missing translation key '{}' for locale '{}'",
                        key,
                        state.active_locale.code()
                    );
                }
                fallback.unwrap_or(key).to_string()
            }
        }
    }

    /// Locale currently in effect.
    pub fn active_locale(&self) -> Locale {
        self.inner
            .read()
            .expect("locale session lock poisoned")
            .active_locale
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.inner
            .read()
            .expect("locale session lock poisoned")
            .status
    }

    /// Terminal error message, present only in the `Error` status.
    pub fn last_error(&self) -> Option<String> {
        self.inner
            .read()
            .expect("locale session lock poisoned")
            .last_error
            .clone()
    }

    /// The active document.
    pub fn document(&self) -> Arc<TranslationDocument> {
        Arc::clone(
            &self
                .inner
                .read()
                .expect("locale session lock poisoned")
                .document,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::source::TranslationSource;
    use serde_json::json;
    use std::path::Path;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_catalog(dir: &Path, code: &str, body: &str) {
        std::fs::write(dir.join(format!("{}.json", code)), body).expect("Should write catalog");
    }

    fn store_over(dir: &Path) -> Arc<TranslationStore> {
        Arc::new(TranslationStore::new(TranslationSource::directory(dir)))
    }

    // ==================== Lifecycle Tests ====================

    #[tokio::test]
    async fn test_new_session_is_idle_and_empty() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let session = LocaleSession::new(store_over(dir.path()), false);

        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.active_locale().code(), "en");
        assert!(session.document().is_empty());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_start_loads_requested_locale() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);
        write_catalog(dir.path(), "pa", r#"{"nav": {"home": "ਮੁੱਖ ਪੰਨਾ"}}"#);

        let session = LocaleSession::start(store_over(dir.path()), "pa", false).await;

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.active_locale().code(), "pa");
        assert_eq!(session.resolve("nav.home", None), "ਮੁੱਖ ਪੰਨਾ");
    }

    #[tokio::test]
    async fn test_set_locale_switches_document() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);
        write_catalog(dir.path(), "fr", r#"{"nav": {"home": "Accueil"}}"#);

        let session = LocaleSession::start(store_over(dir.path()), "en", false).await;
        assert_eq!(session.resolve("nav.home", None), "Home");

        session.set_locale("fr").await;

        assert_eq!(session.active_locale().code(), "fr");
        assert_eq!(session.resolve("nav.home", None), "Accueil");
    }

    // ==================== Fallback Tests ====================

    #[tokio::test]
    async fn test_fetch_failure_keeps_locale_and_serves_default_document() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);
        // No fr.json

        let session = LocaleSession::start(store_over(dir.path()), "fr", false).await;

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.active_locale().code(), "fr");
        assert_eq!(session.resolve("nav.home", None), "Home");
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_unsupported_code_activates_default() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);

        let session = LocaleSession::start(store_over(dir.path()), "xx", false).await;

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.active_locale().code(), "en");
    }

    #[tokio::test]
    async fn test_double_failure_is_terminal_error() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        // No catalogs at all

        let session = LocaleSession::start(store_over(dir.path()), "fr", false).await;

        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.last_error().is_some());
        assert!(session.document().is_empty());
        assert_eq!(session.resolve("hero.title", Some("Welcome")), "Welcome");
        assert_eq!(session.resolve("hero.title", None), "hero.title");
    }

    #[tokio::test]
    async fn test_recovery_after_terminal_error() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let session = LocaleSession::start(store_over(dir.path()), "en", false).await;
        assert_eq!(session.status(), SessionStatus::Error);

        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);
        session.set_locale("en").await;

        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(session.last_error().is_none());
        assert_eq!(session.resolve("nav.home", None), "Home");
    }

    // ==================== Lookup Tests ====================

    #[tokio::test]
    async fn test_missing_keys_are_counted() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"nav": {"home": "Home"}}"#);

        let store = store_over(dir.path());
        let session = LocaleSession::start(Arc::clone(&store), "en", false).await;

        session.resolve("nav.home", None);
        assert_eq!(store.metrics().missing_keys(), 0);

        session.resolve("nav.gone", Some("F"));
        session.resolve("also.gone", None);
        assert_eq!(store.metrics().missing_keys(), 2);
    }

    // ==================== Switch Sequencing Tests ====================

    #[tokio::test]
    async fn test_superseded_switch_is_discarded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fr.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"which": "fr"}))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/pa.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"which": "pa"})))
            .mount(&server)
            .await;

        let store = Arc::new(TranslationStore::new(
            TranslationSource::remote(server.uri()).expect("Should build source"),
        ));
        let session = Arc::new(LocaleSession::new(store, false));

        let slow = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.set_locale("fr").await })
        };
        // Let the slow switch take its ticket before the newer one starts
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(session.status(), SessionStatus::Loading);

        session.set_locale("pa").await;
        slow.await.expect("Should join the slow switch");

        // The slow result resolved last but must not win
        assert_eq!(session.active_locale().code(), "pa");
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.resolve("which", None), "pa");
    }

    #[tokio::test]
    async fn test_sequential_switches_apply_in_order() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        write_catalog(dir.path(), "en", r#"{"which": "en"}"#);
        write_catalog(dir.path(), "fr", r#"{"which": "fr"}"#);
        write_catalog(dir.path(), "hi", r#"{"which": "hi"}"#);

        let session = LocaleSession::start(store_over(dir.path()), "en", false).await;
        session.set_locale("fr").await;
        session.set_locale("hi").await;

        assert_eq!(session.active_locale().code(), "hi");
        assert_eq!(session.resolve("which", None), "hi");
    }
}
