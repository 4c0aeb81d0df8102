//! # storefront-core: Currency-Aware Price Resolution
//!
//! Decides which price, currency and symbol a storefront shows a customer,
//! given the customer's country, an optional manual currency choice, and
//! per-country overrides on products and promotions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Pricing Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Rendering layer (web UI, storefront-price CLI)        │   │
//! │  │     product cards ──► size picker ──► bundles ──► coupon box    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ (registry snapshot, context)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  context  │  │ registry  │  │  resolve  │  │ discount  │  │   │
//! │  │   │ Detected  │  │  symbols  │  │ product   │  │  coupon   │  │   │
//! │  │   │ Country   │  │  cache    │  │ size      │  │  bundle   │  │   │
//! │  │   │ currency  │  │ fallback  │  │ bundle    │  │ selection │  │   │
//! │  │   └───────────┘  └───────────┘  │ coupon    │  └───────────┘  │   │
//! │  │                                 └───────────┘                  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NEVER FAILS TO PRICE      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         Catalog store (products, promotions, registry)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`context`] - Country detection and the effective currency
//! - [`registry`] - Currency registry snapshot and symbol lookup
//! - [`cache`] - Caller-owned symbol cache
//! - [`matching`] - Country matching policy and the override chain
//! - [`resolve`] - Product, size, bundle and coupon resolvers
//! - [`discount`] - Coupon application and bundle selection totals
//! - [`format`] - Display formatting of resolved amounts
//! - [`types`] - Products, promotions and their per-country overrides
//! - [`money`] - Exact decimal money type
//! - [`settings`] - Pure configuration (defaults, extra symbols, matching)
//! - [`validation`] - Admin-side data checks
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Total Resolution**: product, size and coupon resolvers always
//!    return a usable value; only bundles may be "not applicable"
//! 2. **No I/O**: callers pass a registry snapshot in
//! 3. **Exact Money**: decimals, never floats
//! 4. **Currency Travels With The Number**: every result carries its
//!    currency code and symbol
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{resolve_context, resolve_product_price, LocaleHints, Money, Product};
//! use storefront_core::registry::RegistrySnapshot;
//!
//! let hints = LocaleHints {
//!     locale: Some("en-IN".to_string()),
//!     ..LocaleHints::default()
//! };
//! let ctx = resolve_context(None, &hints);
//! assert_eq!(ctx.currency, "INR");
//!
//! // No country override: base price, tagged with the context currency.
//! let product = Product::new("tee", Money::from(999));
//! let price = resolve_product_price(&product, &ctx, &RegistrySnapshot::empty());
//! assert_eq!(price.currency, "INR");
//! assert_eq!(price.symbol, "₹");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cache;
pub mod context;
pub mod discount;
pub mod error;
pub mod format;
pub mod matching;
pub mod money;
pub mod registry;
pub mod resolve;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cache::SymbolCache;
pub use context::{resolve_context, ContextResolver, DetectedCountry, LocaleHints, PricingContext};
pub use discount::{apply_discount, displayed_unit_price, price_with_coupon, quote_bundle_selection};
pub use error::{CoreError, ValidationError};
pub use matching::{CountryMatcher, MatchStrategy, MatchTier};
pub use money::Money;
pub use registry::{CurrencyRegistryEntry, RegistrySnapshot};
pub use resolve::{
    resolve_bundle_price, resolve_coupon_discount, resolve_product_price, resolve_size_price,
    BundlePrice, CouponDiscount, PriceResolver, ProductPrice, SizedPrice,
};
pub use settings::PricingSettings;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when nothing else applies.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Country assumed when detection has no signal.
pub const DEFAULT_COUNTRY_NAME: &str = "United States";

pub const DEFAULT_COUNTRY_CODE: &str = "US";
