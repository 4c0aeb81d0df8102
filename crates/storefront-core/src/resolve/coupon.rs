//! Coupon discount resolution.
//!
//! Same chain as product pricing, scoped to `discountByCountry`. With no
//! match the promotion's default discount applies: a coupon that matched
//! by code is never silently dropped because of the customer's country.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::PriceResolver;
use crate::context::PricingContext;
use crate::matching::{find_override, MatchTier};
use crate::registry::{normalize_code, RegistrySnapshot};
use crate::types::{CouponTerms, DiscountType};

/// The discount a coupon grants in a context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CouponDiscount {
    /// Percentage (0-100) or amount, per `discount_type`.
    #[ts(type = "string")]
    pub discount: Decimal,

    pub discount_type: DiscountType,

    pub currency: String,

    pub symbol: String,

    pub source: MatchTier,
}

impl PriceResolver<'_> {
    /// Resolves a coupon's discount. Always returns a usable value.
    pub fn resolve_coupon_discount(&self, terms: &CouponTerms, context: &PricingContext) -> CouponDiscount {
        match find_override(&terms.discount_by_country, context, self.matcher()) {
            Some(hit) => {
                let currency = normalize_code(&hit.entry.currency);
                debug!(
                    country = %hit.entry.country,
                    currency = %currency,
                    tier = ?hit.tier,
                    "coupon discount from country override"
                );
                CouponDiscount {
                    discount: hit.entry.discount,
                    discount_type: hit.entry.discount_type,
                    symbol: self.symbol(&currency, context),
                    currency,
                    source: hit.tier,
                }
            }
            None => CouponDiscount {
                discount: terms.discount,
                discount_type: terms.discount_type,
                currency: context.currency.clone(),
                symbol: self.symbol(&context.currency, context),
                source: MatchTier::Fallback,
            },
        }
    }
}

/// Resolves a coupon discount with the default resolver.
pub fn resolve_coupon_discount(
    terms: &CouponTerms,
    context: &PricingContext,
    registry: &RegistrySnapshot,
) -> CouponDiscount {
    PriceResolver::new(registry).resolve_coupon_discount(terms, context)
}
