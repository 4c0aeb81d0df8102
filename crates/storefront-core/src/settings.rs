//! # Pricing Settings
//!
//! Plain configuration types for the engine. Loading them from a file or
//! the environment is the application's job; this module only defines the
//! shape, the defaults and validation.
//!
//! ## Example (TOML, as read by `storefront-price`)
//! ```toml
//! default_currency = "USD"
//! matching = "legacy"          # legacy | iso_code
//!
//! [default_country]
//! name = "United States"
//! code = "US"
//!
//! [[countries]]
//! name = "Switzerland"
//! code = "CH"
//! currency = "CHF"
//!
//! [symbols]
//! AUD = "A$"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::matching::MatchStrategy;
use crate::registry::FallbackSymbols;
use crate::validation::{validate_country_code, validate_currency_code};
use crate::{DEFAULT_COUNTRY_CODE, DEFAULT_COUNTRY_NAME, DEFAULT_CURRENCY};

/// Hard default country used when no locale signal is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySetting {
    pub name: String,
    pub code: String,
}

impl Default for CountrySetting {
    fn default() -> Self {
        CountrySetting {
            name: DEFAULT_COUNTRY_NAME.to_string(),
            code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

/// One row of the country → currency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCurrency {
    pub name: String,
    pub code: String,
    pub currency: String,
}

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default)]
    pub default_country: CountrySetting,

    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Extra or replacement rows for the built-in country table.
    #[serde(default)]
    pub countries: Vec<CountryCurrency>,

    /// Extra or replacement fallback symbols.
    #[serde(default)]
    pub symbols: BTreeMap<String, String>,

    /// Country matching strategy for override lookup.
    #[serde(default)]
    pub matching: MatchStrategy,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            default_country: CountrySetting::default(),
            default_currency: default_currency(),
            countries: Vec::new(),
            symbols: BTreeMap::new(),
            matching: MatchStrategy::default(),
        }
    }
}

impl PricingSettings {
    /// Checks code shapes. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_currency_code(&self.default_currency)?;
        validate_country_code(&self.default_country.code)?;
        if self.default_country.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "default_country.name".to_string(),
            });
        }

        for row in &self.countries {
            validate_country_code(&row.code)?;
            validate_currency_code(&row.currency)?;
        }

        for code in self.symbols.keys() {
            validate_currency_code(code)?;
        }

        Ok(())
    }

    /// Fallback symbol table including the configured extras.
    pub fn fallback_symbols(&self) -> FallbackSymbols {
        FallbackSymbols::with_extra(&self.symbols)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
