//! Size price resolution.
//!
//! ## Tier Order
//! ```text
//!   country override sizes[size]   (already in the override's currency)
//!        │ miss
//!        ▼
//!   product.sizes[size]            (product-level, not country-scoped)
//!        │ miss
//!        ▼
//!   product-level resolved price   (whatever resolve_product_price chose)
//! ```
//!
//! Currency and symbol always come from the product resolution, whichever
//! tier supplies the number.

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use super::PriceResolver;
use crate::context::PricingContext;
use crate::money::Money;
use crate::registry::RegistrySnapshot;
use crate::types::Product;

/// Which tier supplied a size price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SizeSource {
    CountrySize,
    ProductSize,
    ProductPrice,
}

/// The price a customer sees for one size of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizedPrice {
    #[ts(type = "string")]
    pub price: Money,

    #[ts(type = "string | null")]
    pub discount_price: Option<Money>,

    pub currency: String,

    pub symbol: String,

    pub source: SizeSource,
}

impl PriceResolver<'_> {
    /// Resolves the price of one size. Unknown sizes get the product price;
    /// callers needing strict size validation must check membership first.
    pub fn resolve_size_price(&self, product: &Product, size: &str, context: &PricingContext) -> SizedPrice {
        let resolved = self.resolve_product_price(product, context);

        let (price, discount_price, source) =
            if let Some(entry) = resolved.size_overrides.iter().find(|s| s.size == size) {
                (entry.price, entry.discount_price, SizeSource::CountrySize)
            } else if let Some(entry) = product.size(size) {
                (entry.price, entry.discount_price, SizeSource::ProductSize)
            } else {
                (resolved.price, resolved.discount_price, SizeSource::ProductPrice)
            };

        trace!(product = %product.id, size, ?source, "size price resolved");

        SizedPrice {
            price,
            discount_price,
            currency: resolved.currency,
            symbol: resolved.symbol,
            source,
        }
    }
}

/// Resolves a size price with the default resolver.
pub fn resolve_size_price(
    product: &Product,
    size: &str,
    context: &PricingContext,
    registry: &RegistrySnapshot,
) -> SizedPrice {
    PriceResolver::new(registry).resolve_size_price(product, size, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DetectedCountry;
    use crate::types::{CountryPriceOverride, SizePrice};

    fn size(label: &str, price: i64) -> SizePrice {
        SizePrice {
            size: label.into(),
            price: Money::from(price),
            discount_price: None,
        }
    }

    fn product() -> Product {
        let mut product = Product::new("hoodie", Money::from(1000));
        product.sizes = vec![size("M", 950), size("L", 1050)];
        product.pricing_by_country = vec![CountryPriceOverride {
            country: "India".into(),
            currency: "INR".into(),
            price: Money::from(900),
            discount_price: None,
            sizes: vec![size("M", 850)],
        }];
        product
    }

    fn india() -> PricingContext {
        PricingContext::new(None, DetectedCountry::new("India", "IN"), "INR")
    }

    #[test]
    fn test_country_size_wins() {
        let resolved = resolve_size_price(&product(), "M", &india(), &RegistrySnapshot::empty());
        assert_eq!(resolved.price, Money::from(850));
        assert_eq!(resolved.source, SizeSource::CountrySize);
        assert_eq!(resolved.currency, "INR");
    }

    #[test]
    fn test_product_size_when_country_lacks_it() {
        let resolved = resolve_size_price(&product(), "L", &india(), &RegistrySnapshot::empty());
        assert_eq!(resolved.price, Money::from(1050));
        assert_eq!(resolved.source, SizeSource::ProductSize);
        // Currency still comes from the country override.
        assert_eq!(resolved.currency, "INR");
    }

    #[test]
    fn test_unknown_size_uses_resolved_product_price() {
        let resolved = resolve_size_price(&product(), "XXL", &india(), &RegistrySnapshot::empty());
        assert_eq!(resolved.price, Money::from(900));
        assert_eq!(resolved.source, SizeSource::ProductPrice);
    }

    #[test]
    fn test_size_match_is_exact() {
        let resolved = resolve_size_price(&product(), "m", &india(), &RegistrySnapshot::empty());
        assert_eq!(resolved.source, SizeSource::ProductPrice);
    }
}
