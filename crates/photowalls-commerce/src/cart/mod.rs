//! Shopping cart module.
//!
//! Contains types for cart, line items, pricing, and promo codes.

#[allow(clippy::module_inception)]
mod cart;
pub mod pricing;
mod promo;

pub use cart::{Cart, LineItem, LineKey, MAX_QUANTITY_PER_ITEM};
pub use pricing::{CartPricing, LineItemPricing};
pub use promo::{AppliedPromo, PromoCode, PromoRegistry};
