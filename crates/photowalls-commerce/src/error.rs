//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// Every variant is a validation outcome: the caller keeps its previous
/// state and the action is reported as rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Percentage outside (0, 100].
    #[error("Invalid percentage: {0} (expected 1..=100)")]
    InvalidPercent(u32),

    /// Size or material has not been chosen yet.
    #[error("Selection incomplete: missing {0}")]
    SelectionIncomplete(String),

    /// Size is not one of the product's options.
    #[error("Size {size} is not offered for {product}")]
    SizeNotOffered { product: String, size: String },

    /// Material is not one of the product's options.
    #[error("Material {material} is not offered for {product}")]
    MaterialNotOffered { product: String, material: String },

    /// No product dialog is open.
    #[error("No product selected")]
    NoProductSelected,

    /// Unknown promo code.
    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Uploaded file does not declare an image media type.
    #[error("Rejected file {file_name}: {media_type} is not an image")]
    RejectedFile {
        file_name: String,
        media_type: String,
    },

    /// Uploaded file is over the configured size limit.
    #[error("Upload of {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: u64, limit: u64 },

    /// A read completed for an upload that has since been superseded.
    #[error("Stale upload token {token} (current: {current})")]
    StaleUpload { token: u64, current: u64 },

    /// Upload flow has no image yet.
    #[error("No image selected")]
    NoImageSelected,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Shop configuration is invalid or unreadable.
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for CommerceError {
    fn from(e: toml::de::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for CommerceError {
    fn from(e: toml::ser::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for CommerceError {
    fn from(e: std::io::Error) -> Self {
        CommerceError::Config(e.to_string())
    }
}
