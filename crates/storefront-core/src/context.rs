//! # Pricing Context Resolver
//!
//! Determines the customer's effective currency and country for a request.
//!
//! ## Resolution Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     resolve(manual_currency, hints)                     │
//! │                                                                         │
//! │  detected_country  (always computed, even with a manual choice)         │
//! │    1. hints.country / hints.country_code   (explicit upstream signal)   │
//! │    2. region subtag of hints.locale        ("en-IN"      → IN)          │
//! │    3. hints.timezone table                 ("Asia/Kolkata" → IN)        │
//! │    4. default country                      (United States / US)         │
//! │                                                                         │
//! │  currency                                                               │
//! │    manual_currency set?  ──yes──► manual_currency (authoritative)       │
//! │          │ no                                                           │
//! │          ▼                                                              │
//! │    country → currency table hit? ──yes──► mapped currency               │
//! │          │ no                                                           │
//! │          ▼                                                              │
//! │    default currency (USD)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absence of signal always degrades to the default; this never fails.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::registry::normalize_code;
use crate::settings::{CountryCurrency, PricingSettings};

// =============================================================================
// Detected Country
// =============================================================================

/// The country the customer appears to be in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DetectedCountry {
    /// Display name, e.g. "India".
    pub name: String,
    /// Short code, e.g. "IN".
    pub code: String,
}

impl DetectedCountry {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        DetectedCountry {
            name: name.into(),
            code: code.into(),
        }
    }
}

// =============================================================================
// Pricing Context
// =============================================================================

/// The resolved currency/country a price must be computed for.
///
/// ## Invariant
/// When `manual_currency` is set, `currency == manual_currency`. The
/// detected country is still kept: it decides which country row applies
/// when several countries share the chosen currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingContext {
    /// Explicit customer choice, normalized to uppercase.
    pub manual_currency: Option<String>,

    pub detected_country: DetectedCountry,

    /// Effective currency for untagged prices.
    pub currency: String,
}

impl PricingContext {
    /// Builds a context directly, normalizing the currency codes.
    ///
    /// Prefer [`ContextResolver::resolve`] in request handling; this is for
    /// callers (and tests) that already know every field.
    pub fn new(
        manual_currency: Option<&str>,
        detected_country: DetectedCountry,
        currency: &str,
    ) -> Self {
        let manual_currency = normalize_manual(manual_currency);
        let currency = manual_currency
            .clone()
            .unwrap_or_else(|| normalize_code(currency));
        PricingContext {
            manual_currency,
            detected_country,
            currency,
        }
    }

    pub fn has_manual_currency(&self) -> bool {
        self.manual_currency.is_some()
    }
}

fn normalize_manual(manual_currency: Option<&str>) -> Option<String> {
    manual_currency
        .map(normalize_code)
        .filter(|code| !code.is_empty())
}

// =============================================================================
// Locale Hints
// =============================================================================

/// Raw locale signals supplied by the session layer.
///
/// All fields are optional; the browser may expose none of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleHints {
    /// Country name already detected upstream (e.g. from a geo header).
    #[serde(default)]
    pub country: Option<String>,

    /// Country code already detected upstream.
    #[serde(default)]
    pub country_code: Option<String>,

    /// BCP-47-ish locale tag, e.g. "en-IN" or "en_GB.UTF-8".
    #[serde(default)]
    pub locale: Option<String>,

    /// IANA timezone, e.g. "Asia/Kolkata".
    #[serde(default)]
    pub timezone: Option<String>,
}

/// Extracts the two-letter region subtag from a locale tag.
///
/// ## Example
/// ```rust
/// use storefront_core::context::region_from_locale;
///
/// assert_eq!(region_from_locale("en-IN").as_deref(), Some("IN"));
/// assert_eq!(region_from_locale("zh-Hant-TW").as_deref(), Some("TW"));
/// assert_eq!(region_from_locale("en_GB.UTF-8").as_deref(), Some("GB"));
/// assert_eq!(region_from_locale("fr"), None);
/// ```
pub fn region_from_locale(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next().unwrap_or_default();
    tag.split(['-', '_'])
        .skip(1)
        .find(|sub| sub.len() == 2 && sub.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|sub| sub.to_ascii_uppercase())
}

/// IANA timezone → country code for the markets the store serves.
const TIMEZONE_COUNTRIES: &[(&str, &str)] = &[
    ("Asia/Kolkata", "IN"),
    ("Asia/Calcutta", "IN"),
    ("America/New_York", "US"),
    ("America/Chicago", "US"),
    ("America/Denver", "US"),
    ("America/Phoenix", "US"),
    ("America/Los_Angeles", "US"),
    ("America/Anchorage", "US"),
    ("Pacific/Honolulu", "US"),
    ("America/Toronto", "CA"),
    ("America/Vancouver", "CA"),
    ("America/Edmonton", "CA"),
    ("America/Winnipeg", "CA"),
    ("America/Halifax", "CA"),
    ("Europe/London", "GB"),
    ("Europe/Dublin", "IE"),
    ("Europe/Berlin", "DE"),
    ("Europe/Paris", "FR"),
    ("Europe/Madrid", "ES"),
    ("Europe/Rome", "IT"),
    ("Europe/Amsterdam", "NL"),
    ("Europe/Brussels", "BE"),
    ("Europe/Vienna", "AT"),
    ("Europe/Lisbon", "PT"),
    ("Europe/Helsinki", "FI"),
    ("Australia/Sydney", "AU"),
    ("Australia/Melbourne", "AU"),
    ("Australia/Perth", "AU"),
    ("Pacific/Auckland", "NZ"),
    ("Asia/Tokyo", "JP"),
    ("Asia/Shanghai", "CN"),
    ("Asia/Singapore", "SG"),
    ("Asia/Dubai", "AE"),
];

/// Built-in country → currency table.
const BUILTIN_COUNTRIES: &[(&str, &str, &str)] = &[
    ("United States", "US", "USD"),
    ("India", "IN", "INR"),
    ("United Kingdom", "GB", "GBP"),
    ("Canada", "CA", "CAD"),
    ("Australia", "AU", "AUD"),
    ("New Zealand", "NZ", "NZD"),
    ("Germany", "DE", "EUR"),
    ("France", "FR", "EUR"),
    ("Spain", "ES", "EUR"),
    ("Italy", "IT", "EUR"),
    ("Netherlands", "NL", "EUR"),
    ("Belgium", "BE", "EUR"),
    ("Austria", "AT", "EUR"),
    ("Portugal", "PT", "EUR"),
    ("Finland", "FI", "EUR"),
    ("Ireland", "IE", "EUR"),
    ("Japan", "JP", "JPY"),
    ("China", "CN", "CNY"),
    ("Singapore", "SG", "SGD"),
    ("United Arab Emirates", "AE", "AED"),
];

static BUILTIN_TABLE: OnceLock<Vec<CountryCurrency>> = OnceLock::new();

fn builtin_table() -> &'static [CountryCurrency] {
    BUILTIN_TABLE.get_or_init(|| {
        BUILTIN_COUNTRIES
            .iter()
            .map(|(name, code, currency)| CountryCurrency {
                name: name.to_string(),
                code: code.to_string(),
                currency: currency.to_string(),
            })
            .collect()
    })
}

// =============================================================================
// Context Resolver
// =============================================================================

/// Resolves pricing contexts with a country table and defaults.
///
/// Build once per process (from [`PricingSettings`]) and share.
#[derive(Debug, Clone)]
pub struct ContextResolver {
    by_code: HashMap<String, CountryCurrency>,
    by_name: HashMap<String, String>,
    default_country: DetectedCountry,
    default_currency: String,
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::from_settings(&PricingSettings::default())
    }
}

impl ContextResolver {
    /// Merges the built-in table with `settings.countries` (settings win).
    pub fn from_settings(settings: &PricingSettings) -> Self {
        let mut by_code = HashMap::new();
        let mut by_name = HashMap::new();

        for row in builtin_table().iter().chain(settings.countries.iter()) {
            let code = normalize_code(&row.code);
            by_name.insert(row.name.trim().to_lowercase(), code.clone());
            by_code.insert(
                code.clone(),
                CountryCurrency {
                    name: row.name.trim().to_string(),
                    code,
                    currency: normalize_code(&row.currency),
                },
            );
        }

        ContextResolver {
            by_code,
            by_name,
            default_country: DetectedCountry::new(
                settings.default_country.name.clone(),
                normalize_code(&settings.default_country.code),
            ),
            default_currency: normalize_code(&settings.default_currency),
        }
    }

    /// Looks up a table row by country code or name.
    fn lookup(&self, country: &DetectedCountry) -> Option<&CountryCurrency> {
        self.by_code.get(&normalize_code(&country.code)).or_else(|| {
            self.by_name
                .get(&country.name.trim().to_lowercase())
                .and_then(|code| self.by_code.get(code))
        })
    }

    /// Country for a code, using the table's display name when known.
    fn country_from_code(&self, code: &str) -> DetectedCountry {
        let code = normalize_code(code);
        match self.by_code.get(&code) {
            Some(row) => DetectedCountry::new(row.name.clone(), code),
            None => DetectedCountry::new(code.clone(), code),
        }
    }

    /// Applies the locale heuristic to raw hints.
    pub fn detect_country(&self, hints: &LocaleHints) -> DetectedCountry {
        let name = hints.country.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let code = hints
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        match (name, code) {
            (Some(name), Some(code)) => return DetectedCountry::new(name, normalize_code(code)),
            (None, Some(code)) => return self.country_from_code(code),
            (Some(name), None) => {
                let probe = DetectedCountry::new(name, "");
                let code = self
                    .lookup(&probe)
                    .map(|row| row.code.clone())
                    .unwrap_or_default();
                return DetectedCountry::new(name, code);
            }
            (None, None) => {}
        }

        if let Some(region) = hints.locale.as_deref().and_then(region_from_locale) {
            return self.country_from_code(&region);
        }

        if let Some(tz) = hints.timezone.as_deref() {
            if let Some((_, code)) = TIMEZONE_COUNTRIES.iter().find(|(zone, _)| *zone == tz.trim()) {
                return self.country_from_code(code);
            }
        }

        self.default_country.clone()
    }

    /// Resolves the pricing context for a request.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::context::{ContextResolver, LocaleHints};
    ///
    /// let resolver = ContextResolver::default();
    /// let hints = LocaleHints { locale: Some("en-IN".into()), ..Default::default() };
    ///
    /// let auto = resolver.resolve(None, &hints);
    /// assert_eq!(auto.currency, "INR");
    ///
    /// let manual = resolver.resolve(Some("usd"), &hints);
    /// assert_eq!(manual.currency, "USD");
    /// assert_eq!(manual.detected_country.name, "India");
    /// ```
    pub fn resolve(&self, manual_currency: Option<&str>, hints: &LocaleHints) -> PricingContext {
        let detected = self.detect_country(hints);
        let manual_currency = normalize_manual(manual_currency);

        // A manual choice keeps whatever country was detected; otherwise an
        // unmapped country degrades to the default country as a whole.
        let (detected_country, currency) = match &manual_currency {
            Some(manual) => (detected, manual.clone()),
            None => match self.lookup(&detected).map(|row| row.currency.clone()) {
                Some(currency) => (detected, currency),
                None => (self.default_country.clone(), self.default_currency.clone()),
            },
        };

        debug!(
            country = %detected_country.name,
            code = %detected_country.code,
            currency = %currency,
            manual = manual_currency.is_some(),
            "pricing context resolved"
        );

        PricingContext {
            manual_currency,
            detected_country,
            currency,
        }
    }
}

/// Resolves a context with the built-in table and defaults.
pub fn resolve_context(manual_currency: Option<&str>, hints: &LocaleHints) -> PricingContext {
    ContextResolver::default().resolve(manual_currency, hints)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CountrySetting;

    fn hints_country(name: &str) -> LocaleHints {
        LocaleHints {
            country: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_signal_resolves_to_default() {
        let ctx = resolve_context(None, &LocaleHints::default());
        assert_eq!(ctx.detected_country, DetectedCountry::new("United States", "US"));
        assert_eq!(ctx.currency, "USD");
        assert!(!ctx.has_manual_currency());
    }

    #[test]
    fn test_manual_currency_is_authoritative() {
        let ctx = resolve_context(Some(" inr "), &hints_country("United States"));
        assert_eq!(ctx.currency, "INR");
        assert_eq!(ctx.manual_currency.as_deref(), Some("INR"));
        assert_eq!(ctx.detected_country.name, "United States");
        assert_eq!(ctx.detected_country.code, "US");
    }

    #[test]
    fn test_blank_manual_currency_is_ignored() {
        let ctx = resolve_context(Some("  "), &hints_country("India"));
        assert!(ctx.manual_currency.is_none());
        assert_eq!(ctx.currency, "INR");
    }

    #[test]
    fn test_unmapped_country_falls_back_to_default_country() {
        let ctx = resolve_context(None, &hints_country("Narnia"));
        assert_eq!(ctx.detected_country, DetectedCountry::new("United States", "US"));
        assert_eq!(ctx.currency, "USD");

        // A manual currency keeps the detected country for override matching.
        let manual = resolve_context(Some("EUR"), &hints_country("Narnia"));
        assert_eq!(manual.detected_country.name, "Narnia");
        assert_eq!(manual.currency, "EUR");
    }

    #[test]
    fn test_locale_then_timezone() {
        let resolver = ContextResolver::default();

        let by_locale = resolver.resolve(
            None,
            &LocaleHints {
                locale: Some("en-GB".into()),
                timezone: Some("Asia/Kolkata".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_locale.detected_country.name, "United Kingdom");
        assert_eq!(by_locale.currency, "GBP");

        let by_tz = resolver.resolve(
            None,
            &LocaleHints {
                locale: Some("en".into()),
                timezone: Some("Asia/Kolkata".into()),
                ..Default::default()
            },
        );
        assert_eq!(by_tz.detected_country, DetectedCountry::new("India", "IN"));
        assert_eq!(by_tz.currency, "INR");
    }

    #[test]
    fn test_country_code_only() {
        let ctx = resolve_context(
            None,
            &LocaleHints {
                country_code: Some("de".into()),
                ..Default::default()
            },
        );
        assert_eq!(ctx.detected_country, DetectedCountry::new("Germany", "DE"));
        assert_eq!(ctx.currency, "EUR");
    }

    #[test]
    fn test_settings_extend_and_override_table() {
        let mut settings = PricingSettings::default();
        settings.countries.push(CountryCurrency {
            name: "Switzerland".into(),
            code: "CH".into(),
            currency: "chf".into(),
        });
        settings.countries.push(CountryCurrency {
            name: "Ireland".into(),
            code: "IE".into(),
            currency: "GBP".into(),
        });
        settings.default_country = CountrySetting {
            name: "India".into(),
            code: "IN".into(),
        };
        settings.default_currency = "INR".into();
        let resolver = ContextResolver::from_settings(&settings);

        assert_eq!(resolver.resolve(None, &hints_country("switzerland")).currency, "CHF");
        assert_eq!(resolver.resolve(None, &hints_country("Ireland")).currency, "GBP");

        let fallback = resolver.resolve(None, &LocaleHints::default());
        assert_eq!(fallback.detected_country.name, "India");
        assert_eq!(fallback.currency, "INR");
    }

    #[test]
    fn test_pricing_context_new_normalizes() {
        let ctx = PricingContext::new(Some("eur"), DetectedCountry::new("France", "FR"), "usd");
        assert_eq!(ctx.currency, "EUR");

        let ctx = PricingContext::new(None, DetectedCountry::new("France", "FR"), "eur");
        assert_eq!(ctx.currency, "EUR");
        assert!(ctx.manual_currency.is_none());
    }
}
