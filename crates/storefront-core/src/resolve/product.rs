//! Product price resolution.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::PriceResolver;
use crate::context::PricingContext;
use crate::matching::{find_override, MatchTier};
use crate::money::Money;
use crate::registry::{normalize_code, RegistrySnapshot};
use crate::types::{Product, SizePrice};

/// The price a customer sees for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    #[ts(type = "string")]
    pub price: Money,

    #[ts(type = "string | null")]
    pub discount_price: Option<Money>,

    pub currency: String,

    pub symbol: String,

    /// Per-size prices from the matched country override (empty if none).
    pub size_overrides: Vec<SizePrice>,

    pub source: MatchTier,
}

impl PriceResolver<'_> {
    /// Resolves a product's price. Always returns a usable price.
    ///
    /// Chain: manual currency → exact country → partial country → the
    /// product's own price tagged with the context currency.
    pub fn resolve_product_price(&self, product: &Product, context: &PricingContext) -> ProductPrice {
        match find_override(&product.pricing_by_country, context, self.matcher()) {
            Some(hit) => {
                let currency = normalize_code(&hit.entry.currency);
                debug!(
                    product = %product.id,
                    country = %hit.entry.country,
                    currency = %currency,
                    tier = ?hit.tier,
                    "product price from country override"
                );
                ProductPrice {
                    price: hit.entry.price,
                    discount_price: hit.entry.discount_price,
                    symbol: self.symbol(&currency, context),
                    currency,
                    size_overrides: hit.entry.sizes.clone(),
                    source: hit.tier,
                }
            }
            None => {
                debug!(
                    product = %product.id,
                    currency = %context.currency,
                    "no country override matched, using base price"
                );
                ProductPrice {
                    price: product.price,
                    discount_price: product.discount_price,
                    currency: context.currency.clone(),
                    symbol: self.symbol(&context.currency, context),
                    size_overrides: Vec::new(),
                    source: MatchTier::Fallback,
                }
            }
        }
    }
}

/// Resolves a product price with the default resolver.
pub fn resolve_product_price(
    product: &Product,
    context: &PricingContext,
    registry: &RegistrySnapshot,
) -> ProductPrice {
    PriceResolver::new(registry).resolve_product_price(product, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DetectedCountry;
    use crate::types::CountryPriceOverride;
    use rust_decimal_macros::dec;

    fn product() -> Product {
        let mut product = Product::new("tee", Money::from(40));
        product.discount_price = Some(Money::from(35));
        product.pricing_by_country = vec![
            CountryPriceOverride {
                country: "United States".into(),
                currency: "usd".into(),
                price: Money::from(50),
                discount_price: None,
                sizes: vec![],
            },
            CountryPriceOverride {
                country: "India".into(),
                currency: "INR".into(),
                price: Money::from(3500),
                discount_price: Some(Money::from(3200)),
                sizes: vec![SizePrice {
                    size: "M".into(),
                    price: Money::from(3400),
                    discount_price: None,
                }],
            },
        ];
        product
    }

    #[test]
    fn test_manual_currency_beats_country() {
        let ctx = PricingContext::new(Some("INR"), DetectedCountry::new("United States", "US"), "USD");
        let resolved = resolve_product_price(&product(), &ctx, &RegistrySnapshot::empty());

        assert_eq!(resolved.price, Money::from(3500));
        assert_eq!(resolved.discount_price, Some(Money::from(3200)));
        assert_eq!(resolved.currency, "INR");
        assert_eq!(resolved.symbol, "\u{20b9}");
        assert_eq!(resolved.size_overrides.len(), 1);
        assert_eq!(resolved.source, MatchTier::ManualCurrency);
    }

    #[test]
    fn test_override_currency_is_normalized() {
        let ctx = PricingContext::new(None, DetectedCountry::new("united states", "US"), "USD");
        let resolved = resolve_product_price(&product(), &ctx, &RegistrySnapshot::empty());
        assert_eq!(resolved.currency, "USD");
        assert_eq!(resolved.price, Money::from(50));
        assert_eq!(resolved.source, MatchTier::ExactCountry);
    }

    #[test]
    fn test_fallback_tags_context_currency() {
        let ctx = PricingContext::new(None, DetectedCountry::new("Germany", "DE"), "EUR");
        let resolved = resolve_product_price(&product(), &ctx, &RegistrySnapshot::empty());

        assert_eq!(resolved.price.amount(), dec!(40));
        assert_eq!(resolved.discount_price, Some(Money::from(35)));
        assert_eq!(resolved.currency, "EUR");
        assert_eq!(resolved.symbol, "\u{20ac}");
        assert!(resolved.size_overrides.is_empty());
        assert_eq!(resolved.source, MatchTier::Fallback);
    }
}
