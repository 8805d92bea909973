//! Catalog validation binary - checks every locale's catalog against the default
//!
//! Fetches each registered locale's translation catalog straight from the
//! content source (no cache, no fallback) and diffs it against the default
//! locale's catalog: missing keys, orphan keys, shape mismatches, and dropped
//! `{placeholder}` tokens.
//!
//! Usage:
//!   cargo run --bin validate-locales                 # Validate all registered locales
//!   cargo run --bin validate-locales -- --strict     # Treat warnings as failures
//!
//! Required environment variables: none
//!
//! Optional:
//! - LOCALES_DIR (defaults to locales)
//! - TRANSLATIONS_URL (remote catalog endpoint; wins over LOCALES_DIR)
//!
//! Exits nonzero when any catalog fails to load or has errors (or warnings
//! with --strict), so the check can gate CI.

use anyhow::{Context, Result};
use tracing::info;

use locale_gateway::config::Config;
use locale_gateway::i18n::{CatalogValidator, LocaleRegistry, TranslationSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_gateway=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let strict = args.iter().any(|arg| arg == "--strict");

    let config = Config::from_env()?;
    let source = match &config.translations_url {
        Some(url) => TranslationSource::remote(url.clone())?,
        None => TranslationSource::directory(&config.locales_dir),
    };
    info!("Validating catalogs from {}", source.describe());

    let registry = LocaleRegistry::get();
    let default_code = registry.default_locale().code;

    // The default locale's catalog is the reference key set; without it
    // there is nothing to validate against
    let reference = source
        .fetch(default_code)
        .await
        .with_context(|| format!("Failed to load the reference catalog '{}'", default_code))?;

    println!();
    println!("========== CATALOG VALIDATION ==========");
    println!("Reference: {} ({} keys)", default_code, reference.dotted_keys().len());
    println!();

    let mut clean = 0;
    let mut with_warnings = 0;
    let mut failed = 0;

    for locale in registry.list() {
        if locale.code == default_code {
            continue;
        }

        let candidate = match source.fetch(locale.code).await {
            Ok(candidate) => candidate,
            Err(err) => {
                println!("✗ {}: failed to load: {}", locale.code, err);
                println!();
                failed += 1;
                continue;
            }
        };

        let report = CatalogValidator::validate(&reference, &candidate);

        if report.is_clean() {
            println!("✓ {}: complete ({} keys)", locale.code, candidate.dotted_keys().len());
        } else if report.has_errors() {
            println!(
                "✗ {}: {} error(s), {} warning(s)",
                locale.code,
                report.errors.len(),
                report.warnings.len()
            );
        } else {
            println!("⚠ {}: {} warning(s)", locale.code, report.warnings.len());
        }

        for error in &report.errors {
            println!("    error: {}", error);
        }
        for warning in &report.warnings {
            println!("    warning: {}", warning);
        }
        println!();

        if report.has_errors() || (strict && report.has_warnings()) {
            failed += 1;
        } else if report.has_warnings() {
            with_warnings += 1;
        } else {
            clean += 1;
        }
    }

    println!("=========================================");
    println!(
        "{} catalog(s) checked: {} clean, {} with warnings, {} failed",
        clean + with_warnings + failed,
        clean,
        with_warnings,
        failed
    );
    println!();

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
