//! Wallpaper product type.

use crate::catalog::ImageSource;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Money, Percent};
use serde::{Deserialize, Serialize};

/// A wallpaper design that can be printed in several sizes and materials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category used by the catalog filter (e.g., "Nature").
    pub category: String,
    /// Style tag (e.g., "Landscape").
    pub style: String,
    /// Base price before the product's own discount.
    pub price: Money,
    /// Product discount, if any.
    pub discount: Option<Percent>,
    /// Product image.
    pub image: ImageSource,
    /// Offered sizes, in display order.
    pub sizes: Vec<String>,
    /// Offered materials, in display order.
    pub materials: Vec<String>,
}

impl Product {
    /// Create a product with no discount and no options.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        style: impl Into<String>,
        price: Money,
        image: ImageSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            style: style.into(),
            price,
            discount: None,
            image,
            sizes: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Set the product discount.
    pub fn with_discount(mut self, discount: Percent) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Set the offered sizes.
    pub fn with_sizes<S: Into<String>>(mut self, sizes: impl IntoIterator<Item = S>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the offered materials.
    pub fn with_materials<S: Into<String>>(mut self, materials: impl IntoIterator<Item = S>) -> Self {
        self.materials = materials.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the product carries its own discount.
    pub fn is_on_sale(&self) -> bool {
        self.discount.is_some()
    }

    /// Amount taken off the base price by the product discount.
    pub fn discount_amount(&self) -> Result<Money, CommerceError> {
        match self.discount {
            Some(percent) => self.price.try_percentage(percent).ok_or(CommerceError::Overflow),
            None => Ok(Money::zero(self.price.currency)),
        }
    }

    /// Price after the product's own discount, before any promo code.
    pub fn effective_price(&self) -> Result<Money, CommerceError> {
        let discount = self.discount_amount()?;
        self.price
            .try_subtract(&discount)
            .ok_or(CommerceError::Overflow)
    }

    /// Check if a size is one of this product's options.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check if a material is one of this product's options.
    pub fn offers_material(&self, material: &str) -> bool {
        self.materials.iter().any(|m| m == material)
    }

    /// Validate a size choice for this product.
    pub fn check_size(&self, size: &str) -> Result<(), CommerceError> {
        if size.is_empty() {
            return Err(CommerceError::SelectionIncomplete("size".to_string()));
        }
        if !self.offers_size(size) {
            return Err(CommerceError::SizeNotOffered {
                product: self.name.clone(),
                size: size.to_string(),
            });
        }
        Ok(())
    }

    /// Validate a material choice for this product.
    pub fn check_material(&self, material: &str) -> Result<(), CommerceError> {
        if material.is_empty() {
            return Err(CommerceError::SelectionIncomplete("material".to_string()));
        }
        if !self.offers_material(material) {
            return Err(CommerceError::MaterialNotOffered {
                product: self.name.clone(),
                material: material.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn mountain_dawn() -> Product {
        Product::new(
            "1",
            "Mountain Dawn",
            "Nature",
            "Landscape",
            Money::new(4500, Currency::RUB),
            ImageSource::remote("https://example.test/dawn.jpg"),
        )
        .with_discount(Percent::new(10).unwrap())
        .with_sizes(["2x3m", "3x4m", "4x5m"])
        .with_materials(["Fleece", "Vinyl", "Paper"])
    }

    #[test]
    fn test_effective_price_with_discount() {
        let product = mountain_dawn();
        assert!(product.is_on_sale());
        assert_eq!(product.discount_amount().unwrap().amount, 450);
        assert_eq!(product.effective_price().unwrap().amount, 4050);
    }

    #[test]
    fn test_effective_price_without_discount() {
        let mut product = mountain_dawn();
        product.discount = None;
        assert!(!product.is_on_sale());
        assert_eq!(product.effective_price().unwrap(), product.price);
    }

    #[test]
    fn test_effective_price_matches_formula() {
        for d in 1..=100u8 {
            let product = mountain_dawn().with_discount(Percent::new(d).unwrap());
            let expected = 4500 * (100 - i64::from(d)) / 100;
            assert_eq!(product.effective_price().unwrap().amount, expected, "discount {d}");
        }
    }

    #[test]
    fn test_option_checks() {
        let product = mountain_dawn();
        assert!(product.check_size("3x4m").is_ok());
        assert!(product.check_material("Vinyl").is_ok());
        assert_eq!(
            product.check_size(""),
            Err(CommerceError::SelectionIncomplete("size".to_string()))
        );
        assert!(matches!(
            product.check_size("9x9m"),
            Err(CommerceError::SizeNotOffered { .. })
        ));
        assert!(matches!(
            product.check_material("Silk"),
            Err(CommerceError::MaterialNotOffered { .. })
        ));
    }
}
