//! Locale-aware request routing.
//!
//! The middleware here wraps the whole router and settles, per request, which
//! locale owns the URL and what path the page tree actually serves:
//!
//! - reserved infrastructure paths bypass locale handling entirely
//! - a default-locale prefix is stripped with a redirect, so the default
//!   locale is never double-represented in the address bar
//! - other supported prefixes pass through unchanged
//! - bare paths are rewritten internally to the default-prefixed form, so a
//!   single page tree serves `/about` and `/en/about` identically
//!
//! Every non-bypassed response carries the preference cookie for the locale
//! the URL landed on. The mapping is one-way: only the default locale is
//! served unprefixed, and `localized_path` generates links accordingly.

use crate::i18n::Locale;
use axum::extract::Request;
use axum::http::{header, HeaderValue, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Name of the persisted locale preference cookie.
pub const LOCALE_COOKIE: &str = "site_locale";

/// Path prefixes that never carry a locale.
const RESERVED_PREFIXES: [&str; 3] = ["/api", "/assets", "/static"];

static FILE_EXTENSION_REGEX: OnceLock<Regex> = OnceLock::new();

/// Marker extension set when a bare path was internally rewritten to the
/// default-prefixed form. The path locale downstream then reflects the
/// rewrite, not a visitor's choice.
#[derive(Debug, Clone, Copy)]
pub struct InternalRewrite;

/// Request middleware applying the locale routing rules.
///
/// Must wrap the router itself rather than sit inside it: the rewrite has
/// to happen before route matching for the prefixed route tree to pick the
/// request up.
pub async fn locale_routing(request: Request, next: Next) -> Response {
    let path = request.uri().path();

    // Rule 1: infrastructure paths bypass locale handling, no cookie
    if is_reserved_path(path) {
        return next.run(request).await;
    }

    let default = Locale::default_locale();

    if let Some((locale, remainder)) = split_locale_prefix(path) {
        if locale == default {
            // Rule 2: strip the redundant default prefix with a redirect
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", remainder, query),
                None => remainder,
            };
            debug!("Redirecting default-prefixed '{}' to '{}'", path, target);
            let mut response = Redirect::temporary(&target).into_response();
            persist_locale(&mut response, default);
            return response;
        }

        // Rule 3: non-default locale prefixes pass through unchanged
        let mut response = next.run(request).await;
        persist_locale(&mut response, locale);
        return response;
    }

    // Rule 4: no locale prefix, serve as the default locale internally
    // while the visible URL stays unprefixed
    let mut request = request;
    request.extensions_mut().insert(InternalRewrite);
    let request = rewrite_with_prefix(request, default.code());
    let mut response = next.run(request).await;
    persist_locale(&mut response, default);
    response
}

/// Whether a path belongs to infrastructure rather than pages.
///
/// Reserved prefixes and anything whose final segment carries a file
/// extension (built assets, favicons) are infrastructure.
pub fn is_reserved_path(path: &str) -> bool {
    let reserved = RESERVED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });
    if reserved {
        return true;
    }

    let regex = FILE_EXTENSION_REGEX.get_or_init(|| Regex::new(r"\.[A-Za-z0-9]+$").unwrap());
    regex.is_match(path)
}

/// Split a leading supported-locale segment off a path.
///
/// `/fr/about` yields the French locale and `"/about"`; `/fr` yields it
/// with `"/"`. Returns `None` when the first segment is not a registered
/// code; matching is exact and case-sensitive like the registry itself.
pub fn split_locale_prefix(path: &str) -> Option<(Locale, String)> {
    let trimmed = path.strip_prefix('/')?;
    let (head, remainder) = match trimmed.split_once('/') {
        Some((head, rest)) => (head, format!("/{}", rest)),
        None => (trimmed, "/".to_string()),
    };

    let locale = Locale::from_code(head).ok()?;
    Some((locale, remainder))
}

/// Canonical path for a page in a given locale.
///
/// The inverse of the routing rules: the default locale is unprefixed,
/// every other locale carries its code as the first segment. `page` is the
/// unprefixed form (`/` or `/about`).
pub fn localized_path(locale: Locale, page: &str) -> String {
    if locale.is_default() {
        page.to_string()
    } else if page == "/" {
        format!("/{}", locale.code())
    } else {
        format!("/{}{}", locale.code(), page)
    }
}

/// Append the locale preference cookie to a response.
///
/// Path `/`, one year max-age, `SameSite=Lax`; appends rather than replaces
/// so an upstream `Set-Cookie` survives.
pub fn persist_locale(response: &mut Response, locale: Locale) {
    let cookie = Cookie::build((LOCALE_COOKIE, locale.code()))
        .path("/")
        .max_age(time::Duration::days(365))
        .same_site(SameSite::Lax)
        .build();

    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => warn!("Skipping locale cookie for '{}': {}", locale.code(), err),
    }
}

fn rewrite_with_prefix(mut request: Request, code: &str) -> Request {
    let path = request.uri().path().to_string();
    // The root collapses to the bare prefix so "/" serves as "/en", not "/en/"
    let prefixed = if path == "/" {
        format!("/{}", code)
    } else {
        format!("/{}{}", code, path)
    };
    let rewritten = match request.uri().query() {
        Some(query) => format!("{}?{}", prefixed, query),
        None => prefixed,
    };

    match rewritten.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(err) => warn!("Skipping locale rewrite for '{}': {}", path, err),
    }
    request
}
