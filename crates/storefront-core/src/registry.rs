//! # Currency Registry Lookup
//!
//! Resolves a currency code to a display symbol using the admin-managed
//! registry, with a hardcoded fallback table.
//!
//! ## Lookup Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  symbol_for("inr", snapshot)                                            │
//! │       │                                                                 │
//! │       ▼  normalize → "INR"                                              │
//! │  Registry snapshot entry with currency INR?  ──yes──► "₹" (admin value) │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  Well-known table (USD $, GBP £, CAD C$, EUR €, INR ₹)  ──hit──► symbol │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  The code itself ("XYZ")  ← degraded, never an error                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared Currencies
//! `currency` is not unique in the registry (every Eurozone row says EUR).
//! When the caller knows the customer's country, the row for that country
//! wins; otherwise the first row in registry `order` wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::context::DetectedCountry;

// =============================================================================
// Registry Entry
// =============================================================================

/// One admin-configured country/currency pair.
///
/// Unique per `country` and per `country_code`; `currency` may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRegistryEntry {
    /// Display name, e.g. "India".
    pub country: String,

    /// ISO-ish code, 2-3 letters, e.g. "IN".
    pub country_code: String,

    /// Three-letter currency code, e.g. "INR".
    pub currency: String,

    /// Display symbol, e.g. "₹".
    pub currency_symbol: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    /// Sort position in currency pickers.
    #[serde(default)]
    pub order: i32,
}

fn default_true() -> bool {
    true
}

impl CurrencyRegistryEntry {
    /// Returns true if this row describes the given country (by name,
    /// case-insensitive, or by code).
    pub fn is_for_country(&self, country: &DetectedCountry) -> bool {
        (!country.name.is_empty() && self.country.eq_ignore_ascii_case(&country.name))
            || (!country.code.is_empty() && self.country_code.eq_ignore_ascii_case(&country.code))
    }
}

// =============================================================================
// Registry Snapshot
// =============================================================================

/// An immutable view of the registry for the duration of a resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrySnapshot {
    entries: Vec<CurrencyRegistryEntry>,
}

impl RegistrySnapshot {
    /// Wraps a list of registry rows as fetched from the admin store.
    pub fn new(entries: Vec<CurrencyRegistryEntry>) -> Self {
        RegistrySnapshot { entries }
    }

    /// An empty registry: every lookup falls through to the fixed table.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CurrencyRegistryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Active rows sorted by `order` (stable for equal positions).
    ///
    /// This is the list a currency picker shows.
    pub fn selectable_entries(&self) -> Vec<&CurrencyRegistryEntry> {
        let mut active: Vec<&CurrencyRegistryEntry> =
            self.entries.iter().filter(|e| e.is_active).collect();
        active.sort_by_key(|e| e.order);
        active
    }

    /// Finds a row for a currency code, disambiguated by country when the
    /// currency is shared.
    ///
    /// ## Example
    /// ```text
    /// rows: Germany/EUR (order 2), France/EUR (order 1)
    ///
    /// entry_for_currency("eur", Some(Germany)) → Germany
    /// entry_for_currency("eur", None)          → France  (lowest order)
    /// entry_for_currency("eur", Some(Japan))   → France  (no country row)
    /// ```
    pub fn entry_for_currency(
        &self,
        currency: &str,
        country: Option<&DetectedCountry>,
    ) -> Option<&CurrencyRegistryEntry> {
        let code = normalize_code(currency);
        let code = code.as_str();
        let candidates = || {
            self.entries
                .iter()
                .filter(move |e| normalize_code(&e.currency) == code)
        };

        if let Some(country) = country {
            if let Some(entry) = candidates().find(|e| e.is_for_country(country)) {
                return Some(entry);
            }
        }

        candidates().min_by_key(|e| e.order)
    }

    /// The admin-configured symbol for a currency, if any row has one.
    pub fn symbol_for_currency(
        &self,
        currency: &str,
        country: Option<&DetectedCountry>,
    ) -> Option<&str> {
        self.entry_for_currency(currency, country)
            .map(|e| e.currency_symbol.as_str())
            .filter(|s| !s.is_empty())
    }
}

// =============================================================================
// Fallback Symbols
// =============================================================================

/// Symbols used when the registry has no row for a currency.
pub const WELL_KNOWN_SYMBOLS: &[(&str, &str)] = &[
    ("USD", "$"),
    ("GBP", "\u{00a3}"),
    ("CAD", "C$"),
    ("EUR", "\u{20ac}"),
    ("INR", "\u{20b9}"),
];

/// The fixed fallback table, optionally extended by settings.
///
/// Extra entries override the well-known ones for the same code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackSymbols {
    extra: BTreeMap<String, String>,
}

impl FallbackSymbols {
    /// Builds a table with extra code → symbol pairs.
    pub fn with_extra(extra: &BTreeMap<String, String>) -> Self {
        FallbackSymbols {
            extra: extra
                .iter()
                .map(|(code, symbol)| (normalize_code(code), symbol.clone()))
                .collect(),
        }
    }

    /// Looks up an already-normalized code.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        if let Some(symbol) = self.extra.get(code) {
            return Some(symbol.as_str());
        }
        WELL_KNOWN_SYMBOLS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, s)| *s)
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Uppercases and trims a currency code.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Resolves a currency code to a display symbol. Never fails.
///
/// ## Example
/// ```rust
/// use storefront_core::registry::{symbol_for, RegistrySnapshot};
///
/// let empty = RegistrySnapshot::empty();
/// assert_eq!(symbol_for("usd", &empty), "$");
/// assert_eq!(symbol_for("XYZ", &empty), "XYZ");
/// ```
pub fn symbol_for(currency_code: &str, registry: &RegistrySnapshot) -> String {
    resolve_symbol(currency_code, registry, None, &FallbackSymbols::default())
}

/// Full lookup used by the resolvers: registry (country-disambiguated),
/// then fallback table, then the code itself.
pub fn resolve_symbol(
    currency_code: &str,
    registry: &RegistrySnapshot,
    country: Option<&DetectedCountry>,
    fallback: &FallbackSymbols,
) -> String {
    let code = normalize_code(currency_code);

    if let Some(symbol) = registry.symbol_for_currency(&code, country) {
        return symbol.to_string();
    }

    match fallback.lookup(&code) {
        Some(symbol) => symbol.to_string(),
        None => {
            trace!(currency = %code, "no symbol known, using currency code");
            code
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
