//! Cart and line item types.

use crate::cart::{pricing, AppliedPromo, CartPricing, LineItemPricing};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A shopping cart.
///
/// Carts are values: [`Cart::with_item`] returns a new cart and leaves the
/// original untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Cart {
    /// Cart currency.
    currency: Currency,
    /// Items in the order they were first added.
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Return a cart with one more unit of `product` in the given configuration.
    ///
    /// If a line with the same (product, size, material) exists its quantity
    /// is incremented, otherwise a new line with quantity 1 is appended.
    pub fn with_item(
        &self,
        product: &Product,
        size: &str,
        material: &str,
    ) -> Result<Cart, CommerceError> {
        product.check_size(size)?;
        product.check_material(material)?;

        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        let key = LineKey::new(product.id.clone(), size, material);
        let mut next = self.clone();

        if let Some(existing) = next.items.iter_mut().find(|i| i.key() == key) {
            let quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CommerceError::Overflow)?;
            if quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = quantity;
        } else {
            next.items.push(LineItem::new(product.clone(), size, material));
        }

        Ok(next)
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for a configuration.
    pub fn find(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.key() == key)
    }

    /// Sum of line totals before any promo code.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        pricing::subtotal(&self.items, self.currency)
    }

    /// Calculate cart pricing with an optional promo code.
    pub fn calculate_pricing(
        &self,
        promo: Option<&AppliedPromo>,
    ) -> Result<CartPricing, CommerceError> {
        let line_items = self
            .items
            .iter()
            .map(LineItemPricing::for_item)
            .collect::<Result<Vec<_>, _>>()?;

        let subtotal = self.subtotal()?;
        let promo_discount = pricing::promo_discount_amount(&subtotal, promo)?;
        let total = pricing::final_total(&subtotal, &promo_discount)?;

        Ok(CartPricing {
            subtotal,
            promo: promo.cloned(),
            promo_discount,
            total,
            line_items,
        })
    }
}

/// Identity of a cart line: product plus chosen options.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub material: String,
}

impl LineKey {
    /// Create a line key.
    pub fn new(product_id: ProductId, size: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            material: material.into(),
        }
    }
}

/// A configured product and how many of it are in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    /// Product snapshot at the time it was added.
    pub product: Product,
    /// Chosen size.
    pub size: String,
    /// Chosen material.
    pub material: String,
    /// Quantity (always positive).
    pub quantity: i64,
}

impl LineItem {
    /// Create a new line with quantity 1.
    pub fn new(product: Product, size: impl Into<String>, material: impl Into<String>) -> Self {
        Self {
            product,
            size: size.into(),
            material: material.into(),
            quantity: 1,
        }
    }

    /// Set the quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// The (product, size, material) identity of this line.
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id.clone(), self.size.clone(), self.material.clone())
    }

    /// Unit price after the product's own discount.
    pub fn unit_price(&self) -> Result<Money, CommerceError> {
        self.product.effective_price()
    }

    /// Unit price multiplied by quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price()?
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageSource;
    use crate::money::Percent;

    fn product(id: &str, price: i64) -> Product {
        Product::new(
            id,
            format!("Product {id}"),
            "Nature",
            "Landscape",
            Money::new(price, Currency::RUB),
            ImageSource::remote("https://example.test/p.jpg"),
        )
        .with_sizes(["2x3m", "3x4m"])
        .with_materials(["Fleece", "Vinyl"])
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new(Currency::RUB);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal().unwrap().amount, 0);
    }

    #[test]
    fn test_add_item() {
        let cart = Cart::new(Currency::RUB);
        let cart = cart.with_item(&product("1", 4500), "2x3m", "Fleece").unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_same_configuration_increments_quantity() {
        let p = product("1", 4500);
        let cart = Cart::new(Currency::RUB)
            .with_item(&p, "3x4m", "Fleece")
            .unwrap()
            .with_item(&p, "3x4m", "Fleece")
            .unwrap();

        assert_eq!(cart.line_count(), 1);
        let line = cart.find(&LineKey::new(p.id.clone(), "3x4m", "Fleece")).unwrap();
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_different_material_is_a_new_line() {
        let p = product("1", 4500);
        let cart = Cart::new(Currency::RUB)
            .with_item(&p, "3x4m", "Fleece")
            .unwrap()
            .with_item(&p, "3x4m", "Vinyl")
            .unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_with_item_does_not_mutate_original() {
        let p = product("1", 4500);
        let original = Cart::new(Currency::RUB).with_item(&p, "2x3m", "Fleece").unwrap();
        let snapshot = original.clone();

        let updated = original.with_item(&p, "2x3m", "Fleece").unwrap();
        assert_eq!(original, snapshot);
        assert_eq!(updated.items()[0].quantity, 2);
    }

    #[test]
    fn test_missing_options_rejected() {
        let p = product("1", 4500);
        let cart = Cart::new(Currency::RUB);
        assert_eq!(
            cart.with_item(&p, "", "Fleece"),
            Err(CommerceError::SelectionIncomplete("size".to_string()))
        );
        assert_eq!(
            cart.with_item(&p, "2x3m", ""),
            Err(CommerceError::SelectionIncomplete("material".to_string()))
        );
        assert!(matches!(
            cart.with_item(&p, "4x5m", "Fleece"),
            Err(CommerceError::SizeNotOffered { .. })
        ));
    }

    #[test]
    fn test_currency_mismatch() {
        let mut p = product("1", 4500);
        p.price = Money::new(4500, Currency::EUR);
        let result = Cart::new(Currency::RUB).with_item(&p, "2x3m", "Fleece");
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_quantity_limit() {
        let p = product("1", 10);
        let mut cart = Cart::new(Currency::RUB).with_item(&p, "2x3m", "Fleece").unwrap();
        cart.items[0].quantity = MAX_QUANTITY_PER_ITEM;
        let result = cart.with_item(&p, "2x3m", "Fleece");
        assert_eq!(
            result,
            Err(CommerceError::QuantityExceedsLimit(
                MAX_QUANTITY_PER_ITEM + 1,
                MAX_QUANTITY_PER_ITEM
            ))
        );
    }

    #[test]
    fn test_pricing() {
        let discounted = product("1", 4500).with_discount(Percent::new(10).unwrap());
        let plain = product("2", 5200);
        let cart = Cart::new(Currency::RUB)
            .with_item(&discounted, "2x3m", "Fleece")
            .unwrap()
            .with_item(&discounted, "2x3m", "Fleece")
            .unwrap()
            .with_item(&plain, "3x4m", "Vinyl")
            .unwrap();

        let pricing = cart.calculate_pricing(None).unwrap();
        assert_eq!(pricing.subtotal.amount, 2 * 4050 + 5200);
        assert_eq!(pricing.promo_discount.amount, 0);
        assert_eq!(pricing.total, pricing.subtotal);
        assert_eq!(pricing.line_items.len(), 2);
        assert_eq!(pricing.line_items[0].savings.amount, 900);
    }
}
