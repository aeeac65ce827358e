//! Session state and derived views.

use crate::cart::{AppliedPromo, Cart, CartPricing};
use crate::catalog::{CategoryFilter, Product};
use crate::customize::UploadFlow;
use crate::error::CommerceError;
use crate::session::ProductSelection;
use crate::shop::Shop;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Top-level page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Catalog,
    Account,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Catalog => "catalog",
            View::Account => "account",
        }
    }
}

/// Everything one shopper's session holds.
///
/// Values are never mutated in place; [`reduce`](crate::session::reduce)
/// returns a new state for every accepted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(super) shop: Arc<Shop>,
    pub(super) view: View,
    pub(super) category: CategoryFilter,
    pub(super) selection: Option<ProductSelection>,
    pub(super) cart: Cart,
    pub(super) promo: Option<AppliedPromo>,
    pub(super) upload_open: bool,
    pub(super) upload: UploadFlow,
}

impl SessionState {
    /// Fresh session: catalog view, all categories, empty cart.
    pub fn new(shop: Arc<Shop>) -> Self {
        let cart = Cart::new(shop.currency);
        Self {
            shop,
            view: View::default(),
            category: CategoryFilter::default(),
            selection: None,
            cart,
            promo: None,
            upload_open: false,
            upload: UploadFlow::new(),
        }
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// The open product dialog, if any.
    pub fn selection(&self) -> Option<&ProductSelection> {
        self.selection.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn promo(&self) -> Option<&AppliedPromo> {
        self.promo.as_ref()
    }

    /// Check if the upload dialog is showing.
    pub fn is_upload_open(&self) -> bool {
        self.upload_open
    }

    pub fn upload(&self) -> &UploadFlow {
        &self.upload
    }

    /// Products on the active catalog tab.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.shop.catalog.filter(&self.category).collect()
    }

    /// Catalog tab labels.
    pub fn categories(&self) -> Vec<String> {
        self.shop.catalog.categories()
    }

    /// Cart totals with the applied promo code.
    pub fn pricing(&self) -> Result<CartPricing, CommerceError> {
        self.cart.calculate_pricing(self.promo.as_ref())
    }

    /// Number shown on the cart icon (distinct lines).
    pub fn cart_badge(&self) -> usize {
        self.cart.line_count()
    }
}
