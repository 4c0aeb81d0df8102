//! # Price Resolvers
//!
//! Product, size, bundle and coupon resolution against a pricing context.
//!
//! ## Module Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         PriceResolver                                   │
//! │   registry snapshot + optional SymbolCache + CountryMatcher             │
//! │                                                                         │
//! │   product.rs  resolve_product_price  → ProductPrice   (always a price)  │
//! │   size.rs     resolve_size_price     → SizedPrice     (always a price)  │
//! │   bundle.rs   resolve_bundle_price   → Option<BundlePrice>              │
//! │   coupon.rs   resolve_coupon_discount→ CouponDiscount (always a value)  │
//! │                                                                         │
//! │   every result carries currency + symbol for the rendering layer       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions use the default resolver (legacy matching, no
//! cache, built-in fallback symbols). Build a [`PriceResolver`] when
//! settings or a cache are in play.

mod bundle;
mod coupon;
mod product;
mod size;

pub use bundle::{resolve_bundle_price, BundlePrice};
pub use coupon::{resolve_coupon_discount, CouponDiscount};
pub use product::{resolve_product_price, ProductPrice};
pub use size::{resolve_size_price, SizeSource, SizedPrice};

use crate::cache::SymbolCache;
use crate::context::PricingContext;
use crate::matching::{CountryMatcher, MatchStrategy};
use crate::registry::{resolve_symbol, FallbackSymbols, RegistrySnapshot};
use crate::settings::PricingSettings;

/// Resolution engine bound to one registry snapshot.
///
/// Cheap to build; holds only borrows plus the fallback symbol table.
pub struct PriceResolver<'a> {
    registry: &'a RegistrySnapshot,
    cache: Option<&'a SymbolCache>,
    matcher: &'a dyn CountryMatcher,
    fallback: FallbackSymbols,
}

impl<'a> PriceResolver<'a> {
    /// Legacy matching, no cache, built-in fallback symbols.
    pub fn new(registry: &'a RegistrySnapshot) -> Self {
        PriceResolver {
            registry,
            cache: None,
            matcher: MatchStrategy::default().matcher(),
            fallback: FallbackSymbols::default(),
        }
    }

    /// Resolver configured from settings (matching strategy, extra symbols).
    pub fn from_settings(registry: &'a RegistrySnapshot, settings: &PricingSettings) -> Self {
        PriceResolver {
            registry,
            cache: None,
            matcher: settings.matching.matcher(),
            fallback: settings.fallback_symbols(),
        }
    }

    /// Routes symbol lookups through a caller-owned cache.
    ///
    /// The cache observes this resolver's snapshot immediately.
    pub fn with_cache(mut self, cache: &'a SymbolCache) -> Self {
        cache.observe(self.registry);
        self.cache = Some(cache);
        self
    }

    /// Swaps the country matching policy.
    pub fn with_matcher(mut self, matcher: &'a dyn CountryMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn registry(&self) -> &RegistrySnapshot {
        self.registry
    }

    pub(crate) fn matcher(&self) -> &dyn CountryMatcher {
        self.matcher
    }

    /// Display symbol for a currency in this context.
    pub fn symbol(&self, currency: &str, context: &PricingContext) -> String {
        match self.cache {
            Some(cache) => cache.symbol_for(currency, None, &self.fallback),
            None => resolve_symbol(
                currency,
                self.registry,
                Some(&context.detected_country),
                &self.fallback,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DetectedCountry;
    use crate::matching::{IsoCodeMatcher, MatchTier};
    use crate::money::Money;
    use crate::registry::CurrencyRegistryEntry;
    use crate::types::{CountryPriceOverride, Product};

    fn entry(country: &str, code: &str, currency: &str, symbol: &str) -> CurrencyRegistryEntry {
        CurrencyRegistryEntry {
            country: country.into(),
            country_code: code.into(),
            currency: currency.into(),
            currency_symbol: symbol.into(),
            is_active: true,
            order: 0,
        }
    }

    fn product_with(country: &str) -> Product {
        let mut product = Product::new("mug", Money::from(12));
        product.pricing_by_country = vec![CountryPriceOverride {
            country: country.into(),
            currency: "AUD".into(),
            price: Money::from(18),
            discount_price: None,
            sizes: vec![],
        }];
        product
    }

    #[test]
    fn test_registry_symbol_beats_fallback() {
        let registry = RegistrySnapshot::new(vec![entry("Australia", "AU", "AUD", "A$")]);
        let ctx = PricingContext::new(None, DetectedCountry::new("Australia", "AU"), "AUD");
        let resolved = PriceResolver::new(&registry).resolve_product_price(&product_with("Australia"), &ctx);
        assert_eq!(resolved.symbol, "A$");
    }

    #[test]
    fn test_cache_keeps_symbols_from_earlier_snapshots() {
        let cache = SymbolCache::new();
        let first = RegistrySnapshot::new(vec![entry("Australia", "AU", "AUD", "A$")]);
        let _ = PriceResolver::new(&first).with_cache(&cache);

        let later = RegistrySnapshot::empty();
        let resolver = PriceResolver::new(&later).with_cache(&cache);
        let ctx = PricingContext::new(None, DetectedCountry::new("Australia", "AU"), "AUD");
        assert_eq!(resolver.symbol("aud", &ctx), "A$");
    }

    #[test]
    fn test_iso_matcher_ignores_names() {
        let registry = RegistrySnapshot::empty();
        let iso = IsoCodeMatcher;
        let ctx = PricingContext::new(None, DetectedCountry::new("Australia", "AU"), "AUD");

        // The override is keyed by a name, which the ISO matcher never matches.
        let resolved = PriceResolver::new(&registry)
            .with_matcher(&iso)
            .resolve_product_price(&product_with("Australia"), &ctx);
        assert_eq!(resolved.source, MatchTier::Fallback);

        let resolved = PriceResolver::new(&registry)
            .with_matcher(&iso)
            .resolve_product_price(&product_with("au"), &ctx);
        assert_eq!(resolved.source, MatchTier::ExactCountry);
        assert_eq!(resolved.price, Money::from(18));
    }

    #[test]
    fn test_settings_add_fallback_symbols() {
        let mut settings = PricingSettings::default();
        settings.symbols.insert("aud".into(), "AU$".into());
        let registry = RegistrySnapshot::empty();
        let resolver = PriceResolver::from_settings(&registry, &settings);
        let ctx = PricingContext::new(None, DetectedCountry::new("Australia", "AU"), "AUD");
        assert_eq!(resolver.symbol("AUD", &ctx), "AU$");
    }
}
