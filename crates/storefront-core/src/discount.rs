//! # Discount Composition
//!
//! How catalog discounts, coupons and bundle prices combine into the
//! number a customer pays.
//!
//! ## Composition Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per-item price                                                         │
//! │    1. discount_price if present and > 0, else price                     │
//! │    2. apply_discount(step 1, coupon.discount, coupon.discount_type)     │
//! │    3. clamp at 0                                                        │
//! │                                                                         │
//! │  Bundle / carousel                                                      │
//! │    REPLACES per-item pricing for each complete group of                 │
//! │    bundle_quantity items. Never stacked with catalog discounts.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Out-of-range inputs (negative discounts, percentages over 100, discount
//! prices above the price) are not rejected here. They can only produce a
//! surprising price, never a negative one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::resolve::{BundlePrice, CouponDiscount};
use crate::types::DiscountType;

/// Applies a percentage or fixed discount, clamping the result at zero.
///
/// A negative discount is treated as zero so it can never raise a price,
/// and 100% or more takes the price to zero. Never panics, even at the
/// edges of the decimal range.
///
/// ## Example
/// ```rust
/// use storefront_core::discount::apply_discount;
/// use storefront_core::types::DiscountType;
/// use storefront_core::Money;
/// use rust_decimal_macros::dec;
///
/// let price = Money::new(dec!(200));
/// assert_eq!(apply_discount(price, dec!(15), DiscountType::Percentage), Money::new(dec!(170)));
/// assert_eq!(apply_discount(price, dec!(250), DiscountType::Fixed), Money::zero());
/// ```
pub fn apply_discount(price: Money, discount: Decimal, discount_type: DiscountType) -> Money {
    let discount = discount.max(Decimal::ZERO);
    let result = match discount_type {
        DiscountType::Percentage if discount >= Decimal::ONE_HUNDRED => Money::zero(),
        DiscountType::Percentage => price.saturating_sub(price.percentage(discount)),
        DiscountType::Fixed => price.saturating_sub(Money::new(discount)),
    };
    result.clamp_non_negative()
}

/// The catalog price a customer sees before coupons.
pub fn displayed_unit_price(price: Money, discount_price: Option<Money>) -> Money {
    match discount_price {
        Some(discounted) if discounted.is_positive() => discounted,
        _ => price,
    }
}

/// Layers a resolved coupon on top of a catalog price.
pub fn price_with_coupon(
    price: Money,
    discount_price: Option<Money>,
    coupon: &CouponDiscount,
) -> Money {
    apply_discount(
        displayed_unit_price(price, discount_price),
        coupon.discount,
        coupon.discount_type,
    )
}

// =============================================================================
// Bundle Selection
// =============================================================================

/// The price of a basket of eligible items under a bundle offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BundleSelectionQuote {
    /// Complete groups priced at the bundle price.
    pub groups: u32,
    /// Items covered by those groups.
    pub bundled_items: u32,
    /// Leftover items priced individually.
    pub remainder_items: u32,
    #[ts(type = "string")]
    pub bundle_total: Money,
    #[ts(type = "string")]
    pub remainder_total: Money,
    #[ts(type = "string")]
    pub total: Money,
    /// What the same items cost without the offer.
    #[ts(type = "string")]
    pub regular_total: Money,
    /// `regular_total - total`, floored at zero.
    #[ts(type = "string")]
    pub savings: Money,
    pub currency: String,
    pub symbol: String,
}

/// Prices selected items under a resolved bundle.
///
/// `unit_prices` are the per-item displayed prices (see
/// [`displayed_unit_price`]) in selection order. The first
/// `groups * bundle_quantity` items are bundled; the rest pay their own
/// price. A bundle price above the regular price is still honoured, but
/// the reported savings never go below zero.
pub fn quote_bundle_selection(bundle: &BundlePrice, unit_prices: &[Money]) -> BundleSelectionQuote {
    let quantity = bundle.bundle_quantity.max(1) as usize;
    let groups = unit_prices.len() / quantity;
    let bundled_items = groups * quantity;

    let regular_total: Money = unit_prices.iter().copied().sum();
    let remainder_total: Money = unit_prices[bundled_items..].iter().copied().sum();
    let bundle_total = bundle.bundle_price.multiply_quantity(groups as u32);
    let total = bundle_total.saturating_add(remainder_total);

    BundleSelectionQuote {
        groups: groups as u32,
        bundled_items: bundled_items as u32,
        remainder_items: (unit_prices.len() - bundled_items) as u32,
        bundle_total,
        remainder_total,
        total,
        regular_total,
        savings: regular_total.saturating_sub(total).clamp_non_negative(),
        currency: bundle.currency.clone(),
        symbol: bundle.symbol.clone(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
