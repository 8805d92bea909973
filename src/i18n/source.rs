//! Translation content sources.
//!
//! A source turns a locale code into raw catalog content: either one
//! `<code>.json` file per locale under a directory, or a remote content
//! endpoint serving the same layout over HTTP. Sources perform a single
//! fetch per call; caching and fallback live in the store.

use crate::i18n::document::{DocumentError, TranslationDocument};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single remote fetch, so a stalled request cannot pin a
/// session in its loading state.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a translation document could not be produced from the source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed before a response arrived.
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The content endpoint answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The content was fetched but is not a well-formed catalog.
    #[error("translations for '{code}' are malformed: {source}")]
    Malformed {
        code: String,
        #[source]
        source: DocumentError,
    },
}

/// Where locale catalogs are fetched from.
#[derive(Debug, Clone)]
pub enum TranslationSource {
    /// JSON files under a directory, one `<code>.json` per locale.
    Directory(PathBuf),

    /// A remote content endpoint serving `<base_url>/<code>.json`.
    Remote {
        client: reqwest::Client,
        base_url: String,
    },
}

impl TranslationSource {
    /// Source backed by a local directory of `<code>.json` files.
    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::Directory(path.into())
    }

    /// Source backed by a remote content endpoint.
    ///
    /// # Arguments
    /// * `base_url` - Endpoint prefix; catalogs are fetched from
    ///   `<base_url>/<code>.json`
    pub fn remote(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for translation source")?;

        Ok(Self::Remote {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch and parse the catalog for one locale code.
    ///
    /// Performs exactly one read or request; the caller decides what a
    /// failure means (the store falls back to the default locale).
    pub async fn fetch(&self, code: &str) -> Result<TranslationDocument, SourceError> {
        match self {
            Self::Directory(dir) => {
                let path = dir.join(format!("{}.json", code));
                let raw = tokio::fs::read_to_string(&path).await.map_err(|source| {
                    SourceError::Io {
                        path: path.display().to_string(),
                        source,
                    }
                })?;

                TranslationDocument::from_json(&raw).map_err(|source| SourceError::Malformed {
                    code: code.to_string(),
                    source,
                })
            }
            Self::Remote { client, base_url } => {
                let url = format!("{}/{}.json", base_url.trim_end_matches('/'), code);

                let response = client.get(&url).send().await.map_err(|source| {
                    SourceError::Http {
                        url: url.clone(),
                        source,
                    }
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status { url, status });
                }

                let raw = response.text().await.map_err(|source| SourceError::Http {
                    url: url.clone(),
                    source,
                })?;

                TranslationDocument::from_json(&raw).map_err(|source| SourceError::Malformed {
                    code: code.to_string(),
                    source,
                })
            }
        }
    }

    /// Human-readable description of the source for startup logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Directory(dir) => format!("directory {}", dir.display()),
            Self::Remote { base_url, .. } => format!("remote {}", base_url),
        }
    }
}
