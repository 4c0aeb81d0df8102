//! # Validation Module
//!
//! Data-quality checks for the admin layer.
//!
//! ## Where This Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Admin UI / import job                                                  │
//! │  ├── Basic form checks                                                  │
//! │  └── THIS MODULE: codes, uniqueness, price sanity                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Catalog store (persisted data)                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Resolvers (crate::resolve)                                             │
//! │  └── NEVER validate: bad data degrades to fallbacks, never errors       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_currency_code, validate_country_code};
//!
//! validate_currency_code("INR").unwrap();
//! validate_country_code("IN").unwrap();
//! assert!(validate_currency_code("RUPEE").is_err());
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::registry::CurrencyRegistryEntry;
use crate::types::{BundleTerms, CouponTerms, DiscountType, Product, Promotion, PromotionKind};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Code Validators
// =============================================================================

/// Validates a currency code: exactly three ASCII letters (any case).
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: format!("'{code}' must be three letters"),
        });
    }

    Ok(())
}

/// Validates a country code: two or three ASCII letters.
pub fn validate_country_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "countryCode".to_string(),
        });
    }

    if !(2..=3).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "countryCode".to_string(),
            reason: format!("'{code}' must be two or three letters"),
        });
    }

    Ok(())
}

/// Validates a promotion code: non-empty after trimming, no whitespace.
pub fn validate_promotion_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Registry
// =============================================================================

/// Validates registry rows: code shapes, and uniqueness of `country` and
/// `country_code` (compared case-insensitively). Currencies may repeat.
pub fn validate_registry(entries: &[CurrencyRegistryEntry]) -> ValidationResult<()> {
    let mut countries = HashSet::new();
    let mut codes = HashSet::new();

    for entry in entries {
        if entry.country.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "country".to_string(),
            });
        }
        validate_country_code(&entry.country_code)?;
        validate_currency_code(&entry.currency)?;

        if !countries.insert(entry.country.trim().to_lowercase()) {
            return Err(ValidationError::Duplicate {
                field: "country".to_string(),
                value: entry.country.clone(),
            });
        }
        if !codes.insert(entry.country_code.trim().to_ascii_uppercase()) {
            return Err(ValidationError::Duplicate {
                field: "countryCode".to_string(),
                value: entry.country_code.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Prices
// =============================================================================

/// Validates a price and its optional discount price.
///
/// ## Rules
/// - Price must not be negative
/// - Discount price must not be negative
/// - Discount price must not exceed the price
pub fn validate_price(field: &str, price: Money, discount_price: Option<Money>) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    if let Some(discount) = discount_price {
        if discount.is_negative() {
            return Err(ValidationError::Negative {
                field: format!("{field}.discountPrice"),
            });
        }
        if discount > price {
            return Err(ValidationError::DiscountAbovePrice {
                field: format!("{field}.discountPrice"),
                price: price.to_string(),
                discount: discount.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates every price on a product, including sizes and country overrides.
pub fn validate_product_pricing(product: &Product) -> ValidationResult<()> {
    validate_price("price", product.price, product.discount_price)?;

    for size in &product.sizes {
        validate_price(&format!("sizes[{}]", size.size), size.price, size.discount_price)?;
    }

    for entry in &product.pricing_by_country {
        validate_currency_code(&entry.currency)?;
        let field = format!("pricingByCountry[{}]", entry.country);
        validate_price(&field, entry.price, entry.discount_price)?;
        for size in &entry.sizes {
            validate_price(
                &format!("{field}.sizes[{}]", size.size),
                size.price,
                size.discount_price,
            )?;
        }
    }

    Ok(())
}

// =============================================================================
// Promotions
// =============================================================================

fn validate_discount(field: &str, discount: Decimal, discount_type: DiscountType) -> ValidationResult<()> {
    if discount.is_sign_negative() && !discount.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if discount_type == DiscountType::Percentage && discount > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates coupon terms: non-negative discounts, percentages ≤ 100.
pub fn validate_coupon_terms(terms: &CouponTerms) -> ValidationResult<()> {
    validate_discount("discount", terms.discount, terms.discount_type)?;
    for entry in &terms.discount_by_country {
        validate_currency_code(&entry.currency)?;
        validate_discount(
            &format!("discountByCountry[{}]", entry.country),
            entry.discount,
            entry.discount_type,
        )?;
    }
    Ok(())
}

/// Validates bundle terms: quantity ≥ 1, non-negative prices.
pub fn validate_bundle_terms(terms: &BundleTerms) -> ValidationResult<()> {
    if terms.bundle_quantity < 1 {
        return Err(ValidationError::OutOfRange {
            field: "bundleQuantity".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        });
    }
    validate_price("bundlePrice", terms.bundle_price, None)?;
    for entry in &terms.pricing_by_country {
        validate_currency_code(&entry.currency)?;
        validate_price(
            &format!("pricingByCountry[{}]", entry.country),
            entry.bundle_price,
            None,
        )?;
    }
    Ok(())
}

/// Validates a whole promotion.
pub fn validate_promotion(promotion: &Promotion) -> ValidationResult<()> {
    validate_promotion_code(&promotion.code)?;
    match &promotion.kind {
        PromotionKind::Coupon(terms) => validate_coupon_terms(terms),
        PromotionKind::Bundle(terms) | PromotionKind::Carousel(terms) => validate_bundle_terms(terms),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
