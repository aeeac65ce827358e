//! Settings for products synthesized from customer uploads.

use crate::catalog::{ImageSource, Product, UploadedImage};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Fixed attributes shared by every custom-print product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomProductTemplate {
    /// Category assigned to custom prints.
    pub category: String,
    /// Style tag assigned to custom prints.
    pub style: String,
    /// Price of a custom print; custom prints are never discounted.
    pub base_price: Money,
    /// Sizes a custom print can be ordered in.
    pub sizes: Vec<String>,
    /// Materials a custom print can be ordered in.
    pub materials: Vec<String>,
}

impl CustomProductTemplate {
    /// Validate a size choice against the template.
    pub fn check_size(&self, size: &str) -> Result<(), CommerceError> {
        if size.is_empty() {
            return Err(CommerceError::SelectionIncomplete("size".to_string()));
        }
        if !self.sizes.iter().any(|s| s == size) {
            return Err(CommerceError::SizeNotOffered {
                product: "custom print".to_string(),
                size: size.to_string(),
            });
        }
        Ok(())
    }

    /// Validate a material choice against the template.
    pub fn check_material(&self, material: &str) -> Result<(), CommerceError> {
        if material.is_empty() {
            return Err(CommerceError::SelectionIncomplete("material".to_string()));
        }
        if !self.materials.iter().any(|m| m == material) {
            return Err(CommerceError::MaterialNotOffered {
                product: "custom print".to_string(),
                material: material.to_string(),
            });
        }
        Ok(())
    }

    /// Synthesize a product with a fresh identity from an uploaded image.
    pub fn product_for(&self, image: UploadedImage) -> Product {
        let name = image.stem().to_string();
        Product::new(
            ProductId::custom(),
            name,
            self.category.clone(),
            self.style.clone(),
            self.base_price,
            ImageSource::Upload(image),
        )
        .with_sizes(self.sizes.iter().cloned())
        .with_materials(self.materials.iter().cloned())
    }
}

impl Default for CustomProductTemplate {
    fn default() -> Self {
        crate::sample::custom_product_template()
    }
}
