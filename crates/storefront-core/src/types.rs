//! # Domain Types
//!
//! The pricing-relevant subset of the storefront catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────────┐  │
//! │  │       Product        │        │            Promotion             │  │
//! │  │  ──────────────────  │        │  ──────────────────────────────  │  │
//! │  │  price               │        │  code (case-insensitive)         │  │
//! │  │  discountPrice?      │        │  isActive                        │  │
//! │  │  sizes[]  ───────────┼──┐     │  kind ─┬─ coupon                 │  │
//! │  │  pricingByCountry[]  │  │     │        │   discount, type         │  │
//! │  └──────────┬───────────┘  │     │        │   discountByCountry[]    │  │
//! │             │              │     │        └─ bundle | carousel       │  │
//! │             ▼              │     │            bundlePrice, quantity  │  │
//! │  ┌──────────────────────┐  │     │            eligibleProductIds     │  │
//! │  │ CountryPriceOverride │  │     │            pricingByCountry[]     │  │
//! │  │  country, currency   │  │     └──────────────────────────────────┘  │
//! │  │  price, discount?    │  │                                           │
//! │  │  sizes[] ────────────┼──┴──► SizePrice { size, price, discount? }   │
//! │  └──────────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The catalog/admin subsystem owns these documents. This crate only reads
//! them; override lists are embedded in their parent and have no lifecycle
//! of their own.
//!
//! ## Wire Format
//! Field names are camelCase to match the catalog's JSON documents.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::matching::CountryScoped;
use crate::money::Money;

// =============================================================================
// Size Price
// =============================================================================

/// A price for one size label ("S", "M", "42", "1kg").
///
/// Appears both on the product itself and inside country overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SizePrice {
    /// Size label, matched by exact string comparison.
    pub size: String,

    #[ts(type = "string")]
    pub price: Money,

    #[serde(default)]
    #[ts(type = "string | null")]
    pub discount_price: Option<Money>,
}

// =============================================================================
// Country Price Override
// =============================================================================

/// Per-country price for a product.
///
/// The list on a product is sparse: it may be empty or cover only some of
/// the countries in the currency registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryPriceOverride {
    /// Country name as the admin typed it (e.g. "India").
    pub country: String,

    /// Currency the price is denominated in (e.g. "INR").
    pub currency: String,

    pub price: Money,

    #[serde(default)]
    pub discount_price: Option<Money>,

    /// Per-size prices for this country, already in `currency`.
    #[serde(default)]
    pub sizes: Vec<SizePrice>,
}

impl CountryScoped for CountryPriceOverride {
    fn country(&self) -> &str {
        &self.country
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product, reduced to the fields pricing needs.
///
/// ## Invariant (not enforced here)
/// `discount_price <= price` is a catalog data-quality rule. Resolution does
/// not reject violations; see [`crate::validation::validate_product_pricing`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier (document id).
    #[serde(default)]
    pub id: String,

    /// Display name, used by tooling only.
    #[serde(default)]
    pub name: String,

    /// Intrinsic price, in an unspecified reference currency.
    pub price: Money,

    #[serde(default)]
    pub discount_price: Option<Money>,

    /// Product-level sizes (not country-scoped).
    #[serde(default)]
    pub sizes: Vec<SizePrice>,

    #[serde(default)]
    pub pricing_by_country: Vec<CountryPriceOverride>,
}

impl Product {
    /// Creates a product with only an intrinsic price.
    pub fn new(id: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: String::new(),
            price,
            discount_price: None,
            sizes: Vec::new(),
            pricing_by_country: Vec::new(),
        }
    }

    /// Looks up a product-level size entry by exact label.
    pub fn size(&self, size: &str) -> Option<&SizePrice> {
        self.sizes.iter().find(|s| s.size == size)
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How a coupon discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount` is a percentage of the price (expected 0-100).
    #[default]
    Percentage,
    /// `discount` is an amount in the resolved currency.
    Fixed,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for DiscountType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(DiscountType::Percentage),
            "fixed" | "amount" | "flat" => Ok(DiscountType::Fixed),
            other => Err(CoreError::UnknownDiscountType(other.to_string())),
        }
    }
}

// =============================================================================
// Promotion Overrides
// =============================================================================

/// Per-country coupon discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDiscountOverride {
    pub country: String,
    pub currency: String,
    pub discount: Decimal,
    pub discount_type: DiscountType,
}

impl CountryScoped for CountryDiscountOverride {
    fn country(&self) -> &str {
        &self.country
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// Per-country fixed bundle price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryBundlePriceOverride {
    pub country: String,
    pub currency: String,
    pub bundle_price: Money,
}

impl CountryScoped for CountryBundlePriceOverride {
    fn country(&self) -> &str {
        &self.country
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// Coupon terms: a discount layered on top of an already-resolved price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponTerms {
    pub discount: Decimal,

    #[serde(default)]
    pub discount_type: DiscountType,

    #[serde(default)]
    pub discount_by_country: Vec<CountryDiscountOverride>,
}

/// Bundle/carousel terms: a fixed total for `bundle_quantity` eligible items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleTerms {
    pub bundle_price: Money,

    /// Number of items the bundle price covers (>= 1).
    pub bundle_quantity: u32,

    #[serde(default)]
    pub eligible_product_ids: BTreeSet<String>,

    #[serde(default)]
    pub pricing_by_country: Vec<CountryBundlePriceOverride>,
}

impl BundleTerms {
    /// Returns true if the product may be part of this bundle.
    pub fn is_eligible(&self, product_id: &str) -> bool {
        self.eligible_product_ids.contains(product_id)
    }
}

/// The kind-specific half of a promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PromotionKind {
    Coupon(CouponTerms),
    Bundle(BundleTerms),
    Carousel(BundleTerms),
}

impl PromotionKind {
    pub fn promotion_type(&self) -> PromotionType {
        match self {
            PromotionKind::Coupon(_) => PromotionType::Coupon,
            PromotionKind::Bundle(_) => PromotionType::Bundle,
            PromotionKind::Carousel(_) => PromotionType::Carousel,
        }
    }
}

/// The `type` tag of a promotion, without its terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PromotionType {
    Coupon,
    Bundle,
    /// Priced like a bundle; shown as a product carousel.
    Carousel,
}

impl std::fmt::Display for PromotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromotionType::Coupon => write!(f, "coupon"),
            PromotionType::Bundle => write!(f, "bundle"),
            PromotionType::Carousel => write!(f, "carousel"),
        }
    }
}

impl FromStr for PromotionType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "coupon" => Ok(PromotionType::Coupon),
            "bundle" => Ok(PromotionType::Bundle),
            "carousel" => Ok(PromotionType::Carousel),
            other => Err(CoreError::UnknownPromotionKind(other.to_string())),
        }
    }
}

/// A promotion as stored by the catalog.
///
/// ## JSON Shape
/// ```json
/// { "code": "SAVE10", "isActive": true, "type": "coupon",
///   "discount": 10, "discountType": "percentage", "discountByCountry": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Unique, case-insensitive promotion code.
    pub code: String,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(flatten)]
    pub kind: PromotionKind,
}

fn default_true() -> bool {
    true
}

impl Promotion {
    /// Creates an active coupon promotion.
    pub fn coupon(code: impl Into<String>, terms: CouponTerms) -> Self {
        Promotion {
            code: code.into(),
            is_active: true,
            kind: PromotionKind::Coupon(terms),
        }
    }

    /// Creates an active bundle promotion.
    pub fn bundle(code: impl Into<String>, terms: BundleTerms) -> Self {
        Promotion {
            code: code.into(),
            is_active: true,
            kind: PromotionKind::Bundle(terms),
        }
    }

    /// Compares codes the way customers type them: trimmed, any case.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.trim().eq_ignore_ascii_case(code.trim())
    }

    pub fn promotion_type(&self) -> PromotionType {
        self.kind.promotion_type()
    }

    /// Coupon terms, if this is a coupon.
    pub fn as_coupon(&self) -> Option<&CouponTerms> {
        match &self.kind {
            PromotionKind::Coupon(terms) => Some(terms),
            _ => None,
        }
    }

    /// Bundle terms, for both bundle and carousel promotions.
    pub fn as_bundle(&self) -> Option<&BundleTerms> {
        match &self.kind {
            PromotionKind::Bundle(terms) | PromotionKind::Carousel(terms) => Some(terms),
            PromotionKind::Coupon(_) => None,
        }
    }

    /// Returns true if the promotion is active and, for bundles, lists the
    /// product as eligible. Coupons apply to any product.
    pub fn is_applicable_to(&self, product_id: &str) -> bool {
        if !self.is_active {
            return false;
        }
        match &self.kind {
            PromotionKind::Coupon(_) => true,
            PromotionKind::Bundle(terms) | PromotionKind::Carousel(terms) => {
                terms.is_eligible(product_id)
            }
        }
    }
}

/// Finds an active promotion by code (case-insensitive).
pub fn find_promotion<'a>(promotions: &'a [Promotion], code: &str) -> Option<&'a Promotion> {
    promotions
        .iter()
        .find(|p| p.is_active && p.matches_code(code))
}

// =============================================================================
// Unit Tests
// =============================================================================
