//! Bundle/carousel price resolution.
//!
//! ## Difference From Product Pricing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pricingByCountry empty      → flat bundlePrice, context currency       │
//! │  pricingByCountry matches    → that country's bundlePrice + currency    │
//! │  pricingByCountry NO match   → None  (offer suppressed)                 │
//! │                                                                         │
//! │  A bundle priced only for India must not show up as "999 USD" for a     │
//! │  US customer. Non-coverage hides the offer instead of mis-pricing it.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::PriceResolver;
use crate::context::PricingContext;
use crate::matching::{find_override, MatchTier};
use crate::money::Money;
use crate::registry::{normalize_code, RegistrySnapshot};
use crate::types::{BundleTerms, Promotion};

/// A fixed multi-item price for a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BundlePrice {
    #[ts(type = "string")]
    pub bundle_price: Money,

    pub bundle_quantity: u32,

    pub currency: String,

    pub symbol: String,

    pub source: MatchTier,
}

impl PriceResolver<'_> {
    /// Resolves bundle terms. `None` means "not applicable here".
    pub fn resolve_bundle_terms(&self, terms: &BundleTerms, context: &PricingContext) -> Option<BundlePrice> {
        if terms.pricing_by_country.is_empty() {
            return Some(BundlePrice {
                bundle_price: terms.bundle_price,
                bundle_quantity: terms.bundle_quantity,
                currency: context.currency.clone(),
                symbol: self.symbol(&context.currency, context),
                source: MatchTier::Fallback,
            });
        }

        let hit = find_override(&terms.pricing_by_country, context, self.matcher())?;
        let currency = normalize_code(&hit.entry.currency);
        Some(BundlePrice {
            bundle_price: hit.entry.bundle_price,
            bundle_quantity: terms.bundle_quantity,
            symbol: self.symbol(&currency, context),
            currency,
            source: hit.tier,
        })
    }

    /// Resolves a bundle or carousel promotion.
    ///
    /// Returns `None` for coupons, inactive promotions, and contexts the
    /// promotion's country pricing does not cover.
    pub fn resolve_bundle_price(&self, promotion: &Promotion, context: &PricingContext) -> Option<BundlePrice> {
        if !promotion.is_active {
            debug!(code = %promotion.code, "bundle inactive");
            return None;
        }
        let terms = promotion.as_bundle()?;

        let resolved = self.resolve_bundle_terms(terms, context);
        if resolved.is_none() {
            debug!(
                code = %promotion.code,
                country = %context.detected_country.name,
                currency = %context.currency,
                "bundle not priced for this context, suppressing offer"
            );
        }
        resolved
    }
}

/// Resolves a bundle price with the default resolver.
pub fn resolve_bundle_price(
    promotion: &Promotion,
    context: &PricingContext,
    registry: &RegistrySnapshot,
) -> Option<BundlePrice> {
    PriceResolver::new(registry).resolve_bundle_price(promotion, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DetectedCountry;
    use crate::types::{CountryBundlePriceOverride, CouponTerms, DiscountType};
    use rust_decimal_macros::dec;
    use std::collections::BTreeSet;

    fn bundle(pricing: Vec<CountryBundlePriceOverride>) -> Promotion {
        Promotion::bundle(
            "TRIO",
            BundleTerms {
                bundle_price: Money::from(999),
                bundle_quantity: 3,
                eligible_product_ids: BTreeSet::new(),
                pricing_by_country: pricing,
            },
        )
    }

    fn india_only() -> Vec<CountryBundlePriceOverride> {
        vec![CountryBundlePriceOverride {
            country: "India".into(),
            currency: "INR".into(),
            bundle_price: Money::from(2499),
        }]
    }

    fn ctx(name: &str, code: &str, currency: &str) -> PricingContext {
        PricingContext::new(None, DetectedCountry::new(name, code), currency)
    }

    #[test]
    fn test_uncovered_country_suppresses_bundle() {
        let promo = bundle(india_only());
        assert!(resolve_bundle_price(&promo, &ctx("China", "CN", "CNY"), &RegistrySnapshot::empty()).is_none());
    }

    #[test]
    fn test_covered_country_uses_override() {
        let promo = bundle(india_only());
        let resolved = resolve_bundle_price(&promo, &ctx("India", "IN", "INR"), &RegistrySnapshot::empty()).unwrap();
        assert_eq!(resolved.bundle_price, Money::from(2499));
        assert_eq!(resolved.bundle_quantity, 3);
        assert_eq!(resolved.currency, "INR");
        assert_eq!(resolved.source, MatchTier::ExactCountry);
    }

    #[test]
    fn test_empty_pricing_uses_flat_price() {
        let promo = bundle(vec![]);
        let resolved = resolve_bundle_price(&promo, &ctx("Japan", "JP", "JPY"), &RegistrySnapshot::empty()).unwrap();
        assert_eq!(resolved.bundle_price.amount(), dec!(999));
        assert_eq!(resolved.currency, "JPY");
        assert_eq!(resolved.symbol, "JPY");
    }

    #[test]
    fn test_coupon_and_inactive_are_not_bundles() {
        let coupon = Promotion::coupon(
            "SAVE",
            CouponTerms {
                discount: dec!(5),
                discount_type: DiscountType::Fixed,
                discount_by_country: vec![],
            },
        );
        let india = ctx("India", "IN", "INR");
        assert!(resolve_bundle_price(&coupon, &india, &RegistrySnapshot::empty()).is_none());

        let mut inactive = bundle(vec![]);
        inactive.is_active = false;
        assert!(resolve_bundle_price(&inactive, &india, &RegistrySnapshot::empty()).is_none());
    }
}
