//! # Symbol Cache
//!
//! An optional, caller-owned memoization layer over the registry lookup.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Process / session (caller)                                             │
//! │    owns ──► SymbolCache ──────────────┐                                 │
//! │                                       │ &SymbolCache                    │
//! │  admin fetch ──► RegistrySnapshot ──► observe()  (last-write-wins)      │
//! │                                       │                                 │
//! │  PriceResolver::with_cache(&cache) ◄──┘                                 │
//! │                                                                         │
//! │  The engine holds no global state. Dropping the cache only costs a      │
//! │  fallback to the fixed symbol table, never an error.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! A single `Mutex` guards the map so concurrent resolvers never race on the
//! storage. Updates are idempotent for a given registry state, so a reader
//! seeing an old value is harmless.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use crate::registry::{normalize_code, FallbackSymbols, RegistrySnapshot};

/// Currency code → symbol, accumulated across registry snapshots.
///
/// Entries are overwritten, never removed: a currency deleted from the
/// registry keeps its last known symbol.
#[derive(Debug, Default)]
pub struct SymbolCache {
    symbols: Mutex<HashMap<String, String>>,
}

impl SymbolCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-populated from a snapshot.
    pub fn from_snapshot(snapshot: &RegistrySnapshot) -> Self {
        let cache = Self::new();
        cache.observe(snapshot);
        cache
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map; the data is advisory.
        self.symbols
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records every symbol in the snapshot. Later rows win for shared
    /// currencies; rows with an empty symbol are skipped.
    pub fn observe(&self, snapshot: &RegistrySnapshot) {
        let mut symbols = self.lock();
        let mut updated = 0usize;
        for entry in snapshot.entries() {
            if entry.currency_symbol.is_empty() {
                continue;
            }
            symbols.insert(normalize_code(&entry.currency), entry.currency_symbol.clone());
            updated += 1;
        }
        debug!(updated, cached = symbols.len(), "symbol cache observed registry snapshot");
    }

    /// Returns the cached symbol for a code, if any.
    pub fn get(&self, currency_code: &str) -> Option<String> {
        self.lock().get(&normalize_code(currency_code)).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Read-through lookup: optionally observe a fresh snapshot, then cache,
    /// then the fallback table, then the code itself.
    pub fn symbol_for(
        &self,
        currency_code: &str,
        snapshot: Option<&RegistrySnapshot>,
        fallback: &FallbackSymbols,
    ) -> String {
        if let Some(snapshot) = snapshot {
            self.observe(snapshot);
        }

        let code = normalize_code(currency_code);
        if let Some(symbol) = self.lock().get(&code) {
            return symbol.clone();
        }

        fallback
            .lookup(&code)
            .map(str::to_string)
            .unwrap_or(code)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CurrencyRegistryEntry;

    fn snapshot(rows: &[(&str, &str, &str)]) -> RegistrySnapshot {
        RegistrySnapshot::new(
            rows.iter()
                .enumerate()
                .map(|(i, (country, currency, symbol))| CurrencyRegistryEntry {
                    country: country.to_string(),
                    country_code: country[..2].to_uppercase(),
                    currency: currency.to_string(),
                    currency_symbol: symbol.to_string(),
                    is_active: true,
                    order: i as i32,
                })
                .collect(),
        )
    }

    #[test]
    fn test_observe_and_lookup() {
        let cache = SymbolCache::from_snapshot(&snapshot(&[("India", "inr", "Rs.")]));
        assert_eq!(cache.get("INR").as_deref(), Some("Rs."));
        assert_eq!(cache.symbol_for("inr", None, &FallbackSymbols::default()), "Rs.");
    }

    #[test]
    fn test_last_write_wins_and_no_removal() {
        let cache = SymbolCache::new();
        cache.observe(&snapshot(&[("India", "INR", "Rs."), ("Japan", "JPY", "Y")]));
        cache.observe(&snapshot(&[("India", "INR", "\u{20b9}")]));

        assert_eq!(cache.get("INR").as_deref(), Some("\u{20b9}"));
        // JPY disappeared from the registry but is still cached.
        assert_eq!(cache.get("JPY").as_deref(), Some("Y"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_miss_degrades_to_fallback() {
        let cache = SymbolCache::new();
        let fallback = FallbackSymbols::default();
        assert!(cache.is_empty());
        assert_eq!(cache.symbol_for("eur", None, &fallback), "\u{20ac}");
        assert_eq!(cache.symbol_for("xyz", None, &fallback), "XYZ");
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let cache = SymbolCache::new();
        let snap = snapshot(&[("Canada", "CAD", "CA$")]);
        let fallback = FallbackSymbols::default();
        let first = cache.symbol_for("CAD", Some(&snap), &fallback);
        let second = cache.symbol_for("CAD", Some(&snap), &fallback);
        assert_eq!(first, "CA$");
        assert_eq!(first, second);
    }
}
