//! The open product dialog.

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// A catalog product being configured before it goes into the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductSelection {
    product: Product,
    size: Option<String>,
    material: Option<String>,
}

impl ProductSelection {
    /// Open a product with nothing chosen yet.
    pub fn open(product: Product) -> Self {
        Self {
            product,
            size: None,
            material: None,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Check if both options are chosen.
    pub fn is_complete(&self) -> bool {
        self.size.is_some() && self.material.is_some()
    }

    /// Choose a size offered by the product.
    pub fn select_size(&self, size: &str) -> Result<ProductSelection, CommerceError> {
        self.product.check_size(size)?;
        Ok(Self {
            size: Some(size.to_string()),
            ..self.clone()
        })
    }

    /// Choose a material offered by the product.
    pub fn select_material(&self, material: &str) -> Result<ProductSelection, CommerceError> {
        self.product.check_material(material)?;
        Ok(Self {
            material: Some(material.to_string()),
            ..self.clone()
        })
    }

    /// Add the configured product to `cart`.
    ///
    /// Fails with [`CommerceError::SelectionIncomplete`] naming whatever is
    /// still missing.
    pub fn add_to_cart(&self, cart: &Cart) -> Result<Cart, CommerceError> {
        match (&self.size, &self.material) {
            (Some(size), Some(material)) => cart.with_item(&self.product, size, material),
            (None, None) => Err(CommerceError::SelectionIncomplete("size, material".to_string())),
            (None, Some(_)) => Err(CommerceError::SelectionIncomplete("size".to_string())),
            (Some(_), None) => Err(CommerceError::SelectionIncomplete("material".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::sample;

    fn mountain_dawn() -> Product {
        sample::catalog().get(&"1".into()).unwrap().clone()
    }

    #[test]
    fn test_open_starts_empty() {
        let selection = ProductSelection::open(mountain_dawn());
        assert_eq!(selection.size(), None);
        assert_eq!(selection.material(), None);
        assert!(!selection.is_complete());
    }

    #[test]
    fn test_add_requires_both_options() {
        let cart = Cart::new(Currency::RUB);
        let selection = ProductSelection::open(mountain_dawn());
        assert_eq!(
            selection.add_to_cart(&cart),
            Err(CommerceError::SelectionIncomplete("size, material".to_string()))
        );

        let selection = selection.select_size("3x4m").unwrap();
        assert_eq!(
            selection.add_to_cart(&cart),
            Err(CommerceError::SelectionIncomplete("material".to_string()))
        );

        let selection = selection.select_material("Fleece").unwrap();
        assert!(selection.is_complete());
        let cart = selection.add_to_cart(&cart).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().unwrap().amount, 4050);
    }

    #[test]
    fn test_unoffered_option_keeps_previous_choice() {
        let selection = ProductSelection::open(mountain_dawn())
            .select_size("2x3m")
            .unwrap();
        assert!(selection.select_size("10x10m").is_err());
        assert_eq!(selection.size(), Some("2x3m"));
    }
}
