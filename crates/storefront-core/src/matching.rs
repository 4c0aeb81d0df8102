//! # Country Matching
//!
//! The one place that decides whether a country-scoped override applies to
//! a pricing context. Product, bundle and coupon resolvers all walk the
//! same chain through [`find_override`].
//!
//! ## Resolution Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  overrides: [ {country, currency, ...}, ... ]                           │
//! │                                                                         │
//! │  1. ManualCurrency  context.manual_currency == override.currency        │
//! │                     (case-insensitive; among several rows with the      │
//! │                      same currency the detected country's row wins)     │
//! │           │ none                                                        │
//! │           ▼                                                             │
//! │  2. ExactCountry    matcher.matches_exact(override.country, detected)   │
//! │           │ none                                                        │
//! │           ▼                                                             │
//! │  3. PartialCountry  matcher.matches_partial(override.country, detected) │
//! │           │ none                                                        │
//! │           ▼                                                             │
//! │  None → caller decides: product/coupon fall back, bundle suppresses     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Known Weakness
//! The legacy partial match is substring-based in both directions, so
//! "India" matches "Indiana". It is kept for compatibility with existing
//! catalogs; [`IsoCodeMatcher`] is the strict alternative.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::context::{DetectedCountry, PricingContext};
use crate::error::{CoreError, CoreResult};

// =============================================================================
// Traits
// =============================================================================

/// An override entry scoped to one country and priced in one currency.
pub trait CountryScoped {
    fn country(&self) -> &str;
    fn currency(&self) -> &str;
}

/// Country comparison policy.
pub trait CountryMatcher: Send + Sync {
    /// Step 2 of the chain.
    fn matches_exact(&self, country: &str, detected: &DetectedCountry) -> bool;

    /// Step 3 of the chain.
    fn matches_partial(&self, country: &str, detected: &DetectedCountry) -> bool;
}

// =============================================================================
// Matchers
// =============================================================================

/// Name/code exact match plus two-way substring match on the name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCountryMatcher;

impl CountryMatcher for LegacyCountryMatcher {
    fn matches_exact(&self, country: &str, detected: &DetectedCountry) -> bool {
        let country = country.trim();
        if country.is_empty() {
            return false;
        }
        country.eq_ignore_ascii_case(detected.name.trim())
            || (!detected.code.is_empty() && country == detected.code.trim())
    }

    fn matches_partial(&self, country: &str, detected: &DetectedCountry) -> bool {
        let country = country.trim().to_lowercase();
        let name = detected.name.trim().to_lowercase();
        // An empty side would "contain" everything.
        if country.is_empty() || name.is_empty() {
            return false;
        }
        country.contains(&name) || name.contains(&country)
    }
}

/// Matches only when the override's country field equals the detected code.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCodeMatcher;

impl CountryMatcher for IsoCodeMatcher {
    fn matches_exact(&self, country: &str, detected: &DetectedCountry) -> bool {
        let country = country.trim();
        !country.is_empty() && country.eq_ignore_ascii_case(detected.code.trim())
    }

    fn matches_partial(&self, _country: &str, _detected: &DetectedCountry) -> bool {
        false
    }
}

static LEGACY: LegacyCountryMatcher = LegacyCountryMatcher;
static ISO_CODE: IsoCodeMatcher = IsoCodeMatcher;

/// Configurable choice of matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Legacy,
    IsoCode,
}

impl MatchStrategy {
    pub fn matcher(&self) -> &'static dyn CountryMatcher {
        match self {
            MatchStrategy::Legacy => &LEGACY,
            MatchStrategy::IsoCode => &ISO_CODE,
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Legacy => write!(f, "legacy"),
            MatchStrategy::IsoCode => write!(f, "iso_code"),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "legacy" | "name" => Ok(MatchStrategy::Legacy),
            "iso_code" | "iso" | "code" => Ok(MatchStrategy::IsoCode),
            other => Err(CoreError::UnknownMatchStrategy(other.to_string())),
        }
    }
}

// =============================================================================
// Chain
// =============================================================================

/// Which step of the chain produced a price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    ManualCurrency,
    ExactCountry,
    PartialCountry,
    /// No override matched; the entity's own price was used.
    Fallback,
}

/// A matched override and the step that matched it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverrideMatch<'a, T> {
    pub entry: &'a T,
    pub tier: MatchTier,
}

/// Walks the resolution chain over an override list.
///
/// ## Example
/// ```rust
/// use storefront_core::context::{DetectedCountry, PricingContext};
/// use storefront_core::matching::{find_override, LegacyCountryMatcher, MatchTier};
/// use storefront_core::types::CountryBundlePriceOverride;
/// use storefront_core::Money;
///
/// let rows = vec![CountryBundlePriceOverride {
///     country: "United States".into(),
///     currency: "USD".into(),
///     bundle_price: Money::from(99),
/// }];
/// let ctx = PricingContext::new(None, DetectedCountry::new("United States of America", "US"), "USD");
///
/// let hit = find_override(&rows, &ctx, &LegacyCountryMatcher).unwrap();
/// assert_eq!(hit.tier, MatchTier::PartialCountry);
/// ```
pub fn find_override<'a, T: CountryScoped>(
    overrides: &'a [T],
    context: &PricingContext,
    matcher: &dyn CountryMatcher,
) -> Option<OverrideMatch<'a, T>> {
    let detected = &context.detected_country;

    if let Some(manual) = context.manual_currency.as_deref() {
        let same_currency = || {
            overrides
                .iter()
                .filter(move |o| o.currency().trim().eq_ignore_ascii_case(manual))
        };

        let entry = same_currency()
            .find(|o| matcher.matches_exact(o.country(), detected))
            .or_else(|| same_currency().find(|o| matcher.matches_partial(o.country(), detected)))
            .or_else(|| same_currency().next());

        if let Some(entry) = entry {
            return Some(OverrideMatch {
                entry,
                tier: MatchTier::ManualCurrency,
            });
        }
    }

    if let Some(entry) = overrides
        .iter()
        .find(|o| matcher.matches_exact(o.country(), detected))
    {
        return Some(OverrideMatch {
            entry,
            tier: MatchTier::ExactCountry,
        });
    }

    overrides
        .iter()
        .find(|o| matcher.matches_partial(o.country(), detected))
        .map(|entry| OverrideMatch {
            entry,
            tier: MatchTier::PartialCountry,
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(&'static str, &'static str);

    impl CountryScoped for Row {
        fn country(&self) -> &str {
            self.0
        }
        fn currency(&self) -> &str {
            self.1
        }
    }

    fn ctx(manual: Option<&str>, name: &str, code: &str) -> PricingContext {
        PricingContext::new(manual, DetectedCountry::new(name, code), "USD")
    }

    #[test]
    fn test_manual_currency_outranks_country() {
        let rows = [Row("United States", "USD"), Row("India", "INR")];
        let hit = find_override(&rows, &ctx(Some("inr"), "United States", "US"), &LegacyCountryMatcher).unwrap();
        assert_eq!(hit.entry.0, "India");
        assert_eq!(hit.tier, MatchTier::ManualCurrency);
    }

    #[test]
    fn test_manual_currency_prefers_detected_country_row() {
        let rows = [Row("France", "EUR"), Row("Germany", "EUR")];
        let hit = find_override(&rows, &ctx(Some("EUR"), "Germany", "DE"), &LegacyCountryMatcher).unwrap();
        assert_eq!(hit.entry.0, "Germany");

        let hit = find_override(&rows, &ctx(Some("EUR"), "Japan", "JP"), &LegacyCountryMatcher).unwrap();
        assert_eq!(hit.entry.0, "France");
    }

    #[test]
    fn test_manual_currency_miss_falls_to_country() {
        let rows = [Row("India", "INR")];
        let hit = find_override(&rows, &ctx(Some("GBP"), "india", "IN"), &LegacyCountryMatcher).unwrap();
        assert_eq!(hit.tier, MatchTier::ExactCountry);
    }

    #[test]
    fn test_exact_by_code() {
        let rows = [Row("IN", "INR")];
        let hit = find_override(&rows, &ctx(None, "Bharat", "IN"), &LegacyCountryMatcher).unwrap();
        assert_eq!(hit.tier, MatchTier::ExactCountry);
    }

    #[test]
    fn test_partial_both_directions() {
        let rows = [Row("United States", "USD")];
        assert!(find_override(&rows, &ctx(None, "US", ""), &LegacyCountryMatcher).is_none());

        let longer = find_override(&rows, &ctx(None, "United States of America", "USA"), &LegacyCountryMatcher);
        assert_eq!(longer.unwrap().tier, MatchTier::PartialCountry);

        let shorter = find_override(&rows, &ctx(None, "States", ""), &LegacyCountryMatcher);
        assert_eq!(shorter.unwrap().tier, MatchTier::PartialCountry);
    }

    #[test]
    fn test_partial_accepts_known_false_positive() {
        let rows = [Row("India", "INR")];
        let hit = find_override(&rows, &ctx(None, "Indiana", "IN-US"), &LegacyCountryMatcher);
        assert_eq!(hit.unwrap().tier, MatchTier::PartialCountry);
        assert!(find_override(&rows, &ctx(None, "Indiana", "IN-US"), &IsoCodeMatcher).is_none());
    }

    #[test]
    fn test_empty_names_never_match() {
        let rows = [Row("", "USD"), Row("India", "INR")];
        assert!(find_override(&rows, &ctx(None, "", ""), &LegacyCountryMatcher).is_none());
    }

    #[test]
    fn test_iso_code_matcher() {
        let rows = [Row("in", "INR")];
        let hit = find_override(&rows, &ctx(None, "India", "IN"), &IsoCodeMatcher).unwrap();
        assert_eq!(hit.tier, MatchTier::ExactCountry);
    }

    #[test]
    fn test_strategy_parsing() {
        assert_eq!("ISO".parse::<MatchStrategy>().unwrap(), MatchStrategy::IsoCode);
        assert_eq!("legacy".parse::<MatchStrategy>().unwrap(), MatchStrategy::Legacy);
        assert!("fuzzy".parse::<MatchStrategy>().is_err());
    }
}
