//! Storefront domain types and logic for PhotoWalls.
//!
//! This crate holds the session state of a photo-wallpaper shop:
//!
//! - **Catalog**: Products, categories, images
//! - **Cart**: Configured line items, pricing, promo codes
//! - **Customize**: Custom prints synthesized from customer uploads
//! - **Orders**: Order history and the account profile
//! - **Session**: Actions, the pure reducer and the logging store
//!
//! # Example
//!
//! ```rust
//! use photowalls_commerce::prelude::*;
//! use std::sync::Arc;
//!
//! let shop = Arc::new(Shop::sample()?);
//! let mut store = Storefront::new(shop);
//!
//! store.dispatch(Action::OpenProduct(ProductId::new("1")))?;
//! store.dispatch(Action::SelectSize("3x4m".to_string()))?;
//! store.dispatch(Action::SelectMaterial("Fleece".to_string()))?;
//! store.dispatch(Action::AddToCart)?;
//! store.dispatch(Action::ApplyPromo("WELCOME10".to_string()))?;
//!
//! let pricing = store.state().pricing()?;
//! assert_eq!(pricing.subtotal.amount, 4050);
//! assert_eq!(pricing.total.amount, 3645);
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod customize;
pub mod orders;
pub mod sample;
pub mod session;
pub mod shop;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, Percent};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, Percent};

    // Catalog
    pub use crate::catalog::{Catalog, CategoryFilter, ImageSource, Product, UploadedImage};

    // Cart
    pub use crate::cart::{
        AppliedPromo, Cart, CartPricing, LineItem, LineItemPricing, LineKey, PromoCode,
        PromoRegistry,
    };

    // Customize
    pub use crate::customize::{
        CustomProductTemplate, UploadFlow, UploadPolicy, UploadState, UploadToken,
    };

    // Orders and account
    pub use crate::account::{Account, PromoOffer};
    pub use crate::orders::{Order, OrderHistory, OrderStatus};

    // Store
    pub use crate::config::StoreConfig;
    pub use crate::session::{reduce, Action, ProductSelection, SessionState, Storefront, View};
    pub use crate::shop::Shop;
}
