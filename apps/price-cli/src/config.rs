//! # Pricing Configuration
//!
//! Loads [`PricingSettings`] for the CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_DEFAULT_CURRENCY=EUR                                    │
//! │     STOREFRONT_DEFAULT_COUNTRY="Germany"                               │
//! │     STOREFRONT_DEFAULT_COUNTRY_CODE=DE                                 │
//! │     STOREFRONT_MATCHING=iso_code                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <file>, else                                              │
//! │     ~/.config/storefront/pricing.toml (Linux)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, United States, legacy matching                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use storefront_core::{MatchStrategy, PricingSettings};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

pub const ENV_DEFAULT_CURRENCY: &str = "STOREFRONT_DEFAULT_CURRENCY";
pub const ENV_DEFAULT_COUNTRY: &str = "STOREFRONT_DEFAULT_COUNTRY";
pub const ENV_DEFAULT_COUNTRY_CODE: &str = "STOREFRONT_DEFAULT_COUNTRY_CODE";
pub const ENV_MATCHING: &str = "STOREFRONT_MATCHING";

/// Loads settings from file, environment, and defaults.
///
/// ## Load Order (later overrides earlier)
/// 1. Default values
/// 2. Config file (pricing.toml)
/// 3. Environment variables
///
/// An explicit `--config` path must exist; the platform default may not.
pub fn load(config_path: Option<&Path>) -> CliResult<PricingSettings> {
    let mut settings = match config_path {
        Some(path) => read_file(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                PricingSettings::default()
            }
            None => PricingSettings::default(),
        },
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings.validate()?;
    Ok(settings)
}

fn read_file(path: &Path) -> CliResult<PricingSettings> {
    info!(?path, "Loading pricing config from file");
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents).map_err(|source| CliError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a TOML document into settings.
pub fn parse(contents: &str) -> Result<PricingSettings, toml::de::Error> {
    toml::from_str(contents)
}

/// Applies environment overrides read through `lookup`.
pub fn apply_env_overrides<F>(settings: &mut PricingSettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(currency) = lookup(ENV_DEFAULT_CURRENCY) {
        debug!(currency = %currency, "Overriding default currency from environment");
        settings.default_currency = currency;
    }

    if let Some(name) = lookup(ENV_DEFAULT_COUNTRY) {
        settings.default_country.name = name;
    }

    if let Some(code) = lookup(ENV_DEFAULT_COUNTRY_CODE) {
        settings.default_country.code = code;
    }

    if let Some(matching) = lookup(ENV_MATCHING) {
        match matching.parse::<MatchStrategy>() {
            Ok(strategy) => {
                debug!(%strategy, "Overriding country matching from environment");
                settings.matching = strategy;
            }
            Err(e) => warn!(error = %e, "Ignoring {}", ENV_MATCHING),
        }
    }
}

/// Returns the default config file path.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "storefront", "storefront")
        .map(|dirs| dirs.config_dir().join("pricing.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_toml() {
        let settings = parse(
            r#"
            default_currency = "EUR"
            matching = "iso_code"

            [default_country]
            name = "Germany"
            code = "DE"

            [[countries]]
            name = "Switzerland"
            code = "CH"
            currency = "CHF"

            [symbols]
            CHF = "Fr."
            "#,
        )
        .unwrap();

        assert_eq!(settings.default_currency, "EUR");
        assert_eq!(settings.default_country.code, "DE");
        assert_eq!(settings.matching, MatchStrategy::IsoCode);
        assert_eq!(settings.countries.len(), 1);
        assert_eq!(settings.symbols.get("CHF").map(String::as_str), Some("Fr."));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_defaults() {
        assert_eq!(parse("").unwrap(), PricingSettings::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut settings = parse("default_currency = \"EUR\"").unwrap();
        apply_env_overrides(
            &mut settings,
            env(&[
                (ENV_DEFAULT_CURRENCY, "INR"),
                (ENV_DEFAULT_COUNTRY, "India"),
                (ENV_DEFAULT_COUNTRY_CODE, "IN"),
                (ENV_MATCHING, "iso"),
            ]),
        );

        assert_eq!(settings.default_currency, "INR");
        assert_eq!(settings.default_country.name, "India");
        assert_eq!(settings.default_country.code, "IN");
        assert_eq!(settings.matching, MatchStrategy::IsoCode);
    }

    #[test]
    fn test_bad_matching_env_is_ignored() {
        let mut settings = PricingSettings::default();
        apply_env_overrides(&mut settings, env(&[(ENV_MATCHING, "fuzzy")]));
        assert_eq!(settings.matching, MatchStrategy::Legacy);
    }

    #[test]
    fn test_invalid_env_currency_fails_validation() {
        let mut settings = PricingSettings::default();
        apply_env_overrides(&mut settings, env(&[(ENV_DEFAULT_CURRENCY, "DOLLARS")]));
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let missing = Path::new("/nonexistent/storefront/pricing.toml");
        assert!(matches!(load(Some(missing)), Err(CliError::ConfigRead { .. })));
    }
}
