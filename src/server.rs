//! HTTP surface of the locale gateway.
//!
//! The router serves a thin localized page shell (resolved title, `lang` and
//! `dir` attributes, hreflang alternates) plus a small JSON API: the registry
//! listing for the language switcher, translation documents by code, the
//! preference cookie endpoint, and a health report. The locale routing
//! middleware is applied around this router in `main`, so the page routes
//! only ever see locale-prefixed paths.

use crate::config::Config;
use crate::i18n::{
    parse_language_tags, resolve_initial_locale, Locale, LocaleRegistry, LocaleSession,
    SessionStatus, TranslationStore,
};
use crate::routing::{
    localized_path, persist_locale, split_locale_prefix, InternalRewrite, LOCALE_COOKIE,
};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state: configuration plus the process-wide store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<TranslationStore>,
}

/// Build the application router.
///
/// The caller wraps this in `routing::locale_routing`; without the rewrite
/// the page routes match only explicitly prefixed paths.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/locales", get(list_locales))
        .route("/api/translations/:code", get(serve_translations))
        .route("/api/locale", post(persist_preference))
        .route("/api/health", get(health))
        .route("/:locale", get(localized_page))
        .route("/:locale/*page", get(localized_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Localized page shell.
///
/// Runs the resolution precedence chain with the path locale as the explicit
/// input, the preference cookie as the stored input, and `Accept-Language`
/// as the browser signal, then starts a request-scoped session and renders
/// the shell from it.
async fn localized_page(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    rewritten: Option<Extension<InternalRewrite>>,
    uri: Uri,
) -> Html<String> {
    let (path_locale, page) = match split_locale_prefix(uri.path()) {
        Some((locale, page)) => (Some(locale), page),
        None => (None, uri.path().to_string()),
    };

    // The path locale counts as the visitor's explicit choice only when it
    // was visibly in the URL; after an internal rewrite it reflects routing.
    let explicit = if rewritten.is_some() {
        None
    } else {
        path_locale.map(|locale| locale.code())
    };
    let stored = jar
        .get(LOCALE_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let browser = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(parse_language_tags)
        .unwrap_or_default();

    let locale = resolve_initial_locale(explicit, stored.as_deref(), &browser);
    let session = LocaleSession::start(
        Arc::clone(&state.store),
        locale.code(),
        !state.config.is_production(),
    )
    .await;

    Html(render_page_shell(&session, &page))
}

/// One HTML shell standing in for the page tree.
///
/// Emits the resolved title and tagline, `lang`/`dir` attributes, and one
/// hreflang alternate per registered locale (default unprefixed, the others
/// under their code). On a terminal load failure the shell still renders,
/// with fallback text and a degraded notice.
fn render_page_shell(session: &LocaleSession, page: &str) -> String {
    let locale = session.active_locale();
    let dir = if locale.is_rtl() { "rtl" } else { "ltr" };
    let title = session.resolve("site.title", Some("Sentinel Shield Insurance"));
    let tagline = session.resolve("site.tagline", Some("Coverage you can count on"));

    let alternates = Locale::all()
        .iter()
        .map(|alternate| {
            format!(
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                alternate.code(),
                localized_path(*alternate, page),
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    let notice = if session.status() == SessionStatus::Error {
        format!(
            "\n    <p class=\"degraded\">{}</p>",
            session.resolve(
                "errors.translationsUnavailable",
                Some("Translations are temporarily unavailable."),
            )
        )
    } else {
        String::new()
    };

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\" dir=\"{dir}\">\n\
         <head>\n    \
             <meta charset=\"utf-8\">\n    \
             <title>{title}</title>\n    \
             {alternates}\n\
         </head>\n\
         <body>\n    \
             <h1>{title}</h1>\n    \
             <p>{tagline}</p>{notice}\n\
         </body>\n\
         </html>\n",
        lang = locale.code(),
        dir = dir,
        title = title,
        alternates = alternates,
        tagline = tagline,
        notice = notice,
    )
}

#[derive(Debug, Serialize)]
struct LocaleEntry {
    code: &'static str,
    english_name: &'static str,
    native_name: &'static str,
    flag: &'static str,
    rtl: bool,
    is_default: bool,
}

/// Registry listing for the language switcher, in registry order.
async fn list_locales() -> Json<serde_json::Value> {
    let registry = LocaleRegistry::get();
    let locales: Vec<LocaleEntry> = registry
        .list()
        .iter()
        .map(|config| LocaleEntry {
            code: config.code,
            english_name: config.english_name,
            native_name: config.native_name,
            flag: config.flag,
            rtl: config.rtl,
            is_default: config.is_default,
        })
        .collect();

    Json(json!({
        "default": registry.default_locale().code,
        "locales": locales,
    }))
}

/// Serve a locale's loaded document as JSON.
///
/// The `x-resolved-locale` header names the locale in effect, so an
/// unsupported-code substitution stays observable to callers.
async fn serve_translations(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> impl IntoResponse {
    let loaded = state.store.load(&code).await;
    (
        [("x-resolved-locale", loaded.locale.code())],
        Json((*loaded.document).clone()),
    )
}

#[derive(Debug, Deserialize)]
struct LocalePreference {
    locale: String,
}

/// Persist an explicit locale choice to the preference cookie.
///
/// Unknown codes are a client bug here, not a lenient-substitution case:
/// persisting one would poison the stored-preference input of the resolution
/// chain, so the endpoint answers 422 and leaves the cookie alone.
async fn persist_preference(Json(preference): Json<LocalePreference>) -> Response {
    match Locale::from_code(&preference.locale) {
        Ok(locale) => {
            let mut response = Json(json!({ "locale": locale.code() })).into_response();
            persist_locale(&mut response, locale);
            response
        }
        Err(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("Unsupported locale '{}'", preference.locale)
            })),
        )
            .into_response(),
    }
}

/// Health report: environment, cached catalogs, and store counters.
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "default_locale": LocaleRegistry::get().default_locale().code,
        "cached_locales": state.store.cached_locales(),
        "metrics": state.store.metrics().snapshot(),
    }))
}
