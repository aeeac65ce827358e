//! Cart pricing calculations.
//!
//! All arithmetic is exact integer arithmetic on [`Money`]; percentages
//! truncate toward zero.

use crate::cart::{AppliedPromo, LineItem, LineKey};
use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sum of line totals. The result does not depend on line order.
pub fn subtotal(items: &[LineItem], currency: Currency) -> Result<Money, CommerceError> {
    let totals = items
        .iter()
        .map(LineItem::line_total)
        .collect::<Result<Vec<_>, _>>()?;
    Money::try_sum(totals.iter(), currency).ok_or(CommerceError::Overflow)
}

/// Amount taken off `subtotal` by the applied promo, or zero without one.
pub fn promo_discount_amount(
    subtotal: &Money,
    promo: Option<&AppliedPromo>,
) -> Result<Money, CommerceError> {
    match promo {
        Some(promo) => promo.discount_on(subtotal),
        None => Ok(Money::zero(subtotal.currency)),
    }
}

/// Subtotal minus promo discount.
///
/// Never negative for non-negative subtotals since promo percentages are
/// capped at 100.
pub fn final_total(subtotal: &Money, promo_discount: &Money) -> Result<Money, CommerceError> {
    subtotal
        .try_subtract(promo_discount)
        .ok_or_else(|| CommerceError::CurrencyMismatch {
            expected: subtotal.currency.code().to_string(),
            got: promo_discount.currency.code().to_string(),
        })
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartPricing {
    /// Sum of line totals (product discounts already applied).
    pub subtotal: Money,
    /// Promo code used, if any.
    pub promo: Option<AppliedPromo>,
    /// Amount taken off by the promo code.
    pub promo_discount: Money,
    /// Amount to pay.
    pub total: Money,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Check if a promo code reduced the total.
    pub fn has_promo_discount(&self) -> bool {
        self.promo_discount.is_positive()
    }

    /// Savings from product discounts and the promo code combined.
    pub fn total_savings(&self) -> Option<Money> {
        let product_savings =
            Money::try_sum(self.line_items.iter().map(|l| &l.savings), self.subtotal.currency)?;
        product_savings.try_add(&self.promo_discount)
    }
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItemPricing {
    /// Line identity.
    pub key: LineKey,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Base unit price.
    pub base_unit_price: Money,
    /// Unit price after the product discount.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// unit_price * quantity.
    pub line_total: Money,
    /// Product-discount savings across the whole line.
    pub savings: Money,
}

impl LineItemPricing {
    /// Price a single line.
    pub fn for_item(item: &LineItem) -> Result<Self, CommerceError> {
        let unit_price = item.unit_price()?;
        let line_total = item.line_total()?;
        let savings = item
            .product
            .discount_amount()?
            .try_multiply(item.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            key: item.key(),
            product_name: item.product.name.clone(),
            base_unit_price: item.product.price,
            unit_price,
            quantity: item.quantity,
            line_total,
            savings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PromoRegistry;
    use crate::sample;

    fn line(id: &str, size: &str, material: &str, quantity: i64) -> LineItem {
        let catalog = sample::catalog();
        let product = catalog.get(&id.into()).unwrap().clone();
        LineItem::new(product, size, material).with_quantity(quantity)
    }

    #[test]
    fn test_empty_subtotal_is_zero() {
        let total = subtotal(&[], Currency::RUB).unwrap();
        assert!(total.is_zero());

        let registry = PromoRegistry::default();
        let promo = registry.apply("LOYAL20").unwrap();
        let discount = promo_discount_amount(&total, Some(&promo)).unwrap();
        assert!(discount.is_zero());
        assert!(final_total(&total, &discount).unwrap().is_zero());
    }

    #[test]
    fn test_subtotal_is_order_independent() {
        let mut items = vec![
            line("1", "3x4m", "Fleece", 2),
            line("3", "2x3m", "Vinyl", 1),
            line("6", "4x5m", "Paper", 3),
            line("2", "2x3m", "Fleece", 1),
        ];
        let forward = subtotal(&items, Currency::RUB).unwrap();
        items.reverse();
        assert_eq!(subtotal(&items, Currency::RUB).unwrap(), forward);
        items.swap(0, 2);
        assert_eq!(subtotal(&items, Currency::RUB).unwrap(), forward);
        // 2*4050 + 4080 + 3*4400 + 5200
        assert_eq!(forward.amount, 30_580);
    }

    #[test]
    fn test_welcome10_on_4500() {
        let registry = PromoRegistry::default();
        let promo = registry.apply("WELCOME10").unwrap();
        let sub = Money::new(4500, Currency::RUB);
        let discount = promo_discount_amount(&sub, Some(&promo)).unwrap();
        assert_eq!(discount.amount, 450);
        assert_eq!(final_total(&sub, &discount).unwrap().amount, 4050);
    }

    #[test]
    fn test_loyal20_on_4800() {
        let registry = PromoRegistry::default();
        let promo = registry.apply("LOYAL20").unwrap();
        let sub = Money::new(4800, Currency::RUB);
        let discount = promo_discount_amount(&sub, Some(&promo)).unwrap();
        assert_eq!(discount.amount, 960);
        assert_eq!(final_total(&sub, &discount).unwrap().amount, 3840);
    }

    #[test]
    fn test_no_promo_means_no_discount() {
        let sub = Money::new(4800, Currency::RUB);
        let discount = promo_discount_amount(&sub, None).unwrap();
        assert!(discount.is_zero());
        assert_eq!(final_total(&sub, &discount).unwrap(), sub);
    }

    #[test]
    fn test_total_savings() {
        let registry = PromoRegistry::default();
        let promo = registry.apply("WELCOME10").unwrap();
        let items = [line("1", "3x4m", "Fleece", 1)];
        let line_items = items
            .iter()
            .map(LineItemPricing::for_item)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let sub = subtotal(&items, Currency::RUB).unwrap();
        let promo_discount = promo_discount_amount(&sub, Some(&promo)).unwrap();
        let pricing = CartPricing {
            subtotal: sub,
            promo: Some(promo),
            promo_discount,
            total: final_total(&sub, &promo_discount).unwrap(),
            line_items,
        };
        assert!(pricing.has_promo_discount());
        // 450 product discount + 405 promo
        assert_eq!(pricing.total_savings().unwrap().amount, 855);
        assert_eq!(pricing.total.amount, 3645);
    }
}
