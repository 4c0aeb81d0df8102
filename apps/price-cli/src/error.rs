//! # CLI Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CLI Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Snapshot     │  │       Lookup            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigRead     │  │  SnapshotRead   │  │  ProductNotFound        │ │
//! │  │  ConfigParse    │  │  SnapshotParse  │  │  PromotionNotFound      │ │
//! │  │  InvalidConfig  │  │                 │  │  WrongPromotionKind     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use storefront_core::{PromotionType, ValidationError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    // =========================================================================
    // Snapshot Errors
    // =========================================================================
    #[error("Failed to read snapshot {path}: {source}")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    #[error("Product not found in snapshot: {0}")]
    ProductNotFound(String),

    #[error("No active promotion with code '{0}'")]
    PromotionNotFound(String),

    #[error("Promotion '{code}' is a {actual}, expected a {expected}")]
    WrongPromotionKind {
        code: String,
        expected: PromotionType,
        actual: PromotionType,
    },
}
