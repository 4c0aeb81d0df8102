//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Where Errors Exist (and Where They Don't)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Surface                                   │
//! │                                                                         │
//! │  Resolvers (resolve::*)        → NEVER fail. Missing data degrades to   │
//! │                                  a fallback price / symbol / context.   │
//! │                                                                         │
//! │  Parsing (FromStr impls)       → CoreError::Unknown*                    │
//! │  Admin validation (validation) → ValidationError                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError (apps/price-cli)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, code, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors raised by parsing and validation helpers.
///
/// Price resolution itself has no error type: every resolver is total.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A discount type string was neither `percentage` nor `fixed`.
    #[error("Unknown discount type: '{0}' (expected percentage or fixed)")]
    UnknownDiscountType(String),

    /// A promotion kind string was not coupon, bundle or carousel.
    #[error("Unknown promotion kind: '{0}' (expected coupon, bundle or carousel)")]
    UnknownPromotionKind(String),

    /// A country matching strategy string was not recognised.
    #[error("Unknown country matching strategy: '{0}' (expected legacy or iso_code)")]
    UnknownMatchStrategy(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Data-quality failures found by the admin-side validators.
///
/// The resolvers never call these; the catalog/admin layer does before it
/// persists a product, promotion or registry entry.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., currency code that is not three letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Monetary value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Discount price is above the regular price.
    #[error("{field} ({discount}) exceeds price ({price})")]
    DiscountAbovePrice {
        field: String,
        price: String,
        discount: String,
    },

    /// Duplicate value (e.g., two registry rows for the same country).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownDiscountType("bogus".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown discount type: 'bogus' (expected percentage or fixed)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Duplicate {
            field: "country".to_string(),
            value: "India".to_string(),
        };
        assert_eq!(err.to_string(), "country 'India' already exists");

        let err = ValidationError::DiscountAbovePrice {
            field: "discountPrice".to_string(),
            price: "100".to_string(),
            discount: "120".to_string(),
        };
        assert_eq!(err.to_string(), "discountPrice (120) exceeds price (100)");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
