//! Catalog snapshot loading.
//!
//! A snapshot is the JSON export of what the storefront would see:
//! ```json
//! {
//!   "registry":   [{ "country": "India", "countryCode": "IN", "currency": "INR", "currencySymbol": "₹" }],
//!   "products":   [{ "id": "tee", "price": 40, "pricingByCountry": [] }],
//!   "promotions": [{ "code": "SAVE10", "type": "coupon", "discount": 10 }]
//! }
//! ```
//! Every section is optional.

use std::path::Path;

use serde::Deserialize;
use storefront_core::{find_promotion, Product, Promotion, RegistrySnapshot};
use tracing::info;

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub registry: RegistrySnapshot,

    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub promotions: Vec<Promotion>,
}

impl CatalogSnapshot {
    /// Reads a snapshot file; no path means an empty catalog.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path).map_err(|source| CliError::SnapshotRead {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::parse(&contents).map_err(|source| CliError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            ?path,
            registry = snapshot.registry.entries().len(),
            products = snapshot.products.len(),
            promotions = snapshot.promotions.len(),
            "Loaded catalog snapshot"
        );
        Ok(snapshot)
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    pub fn product(&self, id: &str) -> CliResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CliError::ProductNotFound(id.to_string()))
    }

    /// Active promotion by code (case-insensitive).
    pub fn promotion(&self, code: &str) -> CliResult<&Promotion> {
        find_promotion(&self.promotions, code).ok_or_else(|| CliError::PromotionNotFound(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "registry": [
            { "country": "India", "countryCode": "IN", "currency": "INR", "currencySymbol": "₹", "order": 1 }
        ],
        "products": [
            { "id": "tee", "name": "Tee", "price": 40,
              "pricingByCountry": [{ "country": "India", "currency": "INR", "price": "3499.00" }] }
        ],
        "promotions": [
            { "code": "SAVE10", "type": "coupon", "discount": 10 },
            { "code": "OLD", "type": "coupon", "discount": 50, "isActive": false },
            { "code": "TRIO", "type": "bundle", "bundlePrice": 999, "bundleQuantity": 3,
              "eligibleProductIds": ["tee"] }
        ]
    }"#;

    #[test]
    fn test_parse_full_snapshot() {
        let snapshot = CatalogSnapshot::parse(SNAPSHOT).unwrap();
        assert_eq!(snapshot.registry.entries().len(), 1);
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.promotions.len(), 3);
        assert!(snapshot.product("tee").is_ok());
        assert!(matches!(snapshot.product("mug"), Err(CliError::ProductNotFound(_))));
    }

    #[test]
    fn test_promotion_lookup_skips_inactive() {
        let snapshot = CatalogSnapshot::parse(SNAPSHOT).unwrap();
        assert_eq!(snapshot.promotion("save10").unwrap().code, "SAVE10");
        assert!(matches!(snapshot.promotion("OLD"), Err(CliError::PromotionNotFound(_))));
    }

    #[test]
    fn test_sections_are_optional() {
        let snapshot = CatalogSnapshot::parse("{}").unwrap();
        assert!(snapshot.registry.is_empty());
        assert!(snapshot.products.is_empty());
        assert!(CatalogSnapshot::load(None).unwrap().promotions.is_empty());
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(CatalogSnapshot::parse("{ \"products\": 3 }").is_err());
    }
}
