//! Store configuration file.
//!
//! A store is described by a TOML (or JSON) file:
//!
//! ```toml
//! currency = "RUB"
//!
//! [[products]]
//! id = "1"
//! name = "Mountain Dawn"
//! category = "Nature"
//! style = "Landscape"
//! price = 4500
//! discount = 10
//! image = "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800"
//! sizes = ["2x3m", "3x4m", "4x5m"]
//! materials = ["Fleece", "Vinyl", "Paper"]
//!
//! [[promo_codes]]
//! code = "WELCOME10"
//! percent = 10
//! ```
//!
//! Parsing only checks shapes. Cross-field rules (unique ids, percentages in
//! range, orders referencing known products) are checked by
//! [`Shop::from_config`](crate::shop::Shop::from_config).

use crate::account::Account;
use crate::cart::MAX_QUANTITY_PER_ITEM;
use crate::catalog::Product;
use crate::customize::{CustomProductTemplate, UploadPolicy};
use crate::error::CommerceError;
use crate::money::Currency;
use crate::orders::{Order, OrderStatus};
use crate::shop::Shop;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Store configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Currency every price in the file is expressed in.
    #[serde(default)]
    pub currency: Currency,

    /// Catalog products in display order.
    #[serde(default)]
    pub products: Vec<ProductConfig>,

    /// Redeemable promo codes.
    #[serde(default)]
    pub promo_codes: Vec<PromoConfig>,

    /// Settings for custom prints.
    #[serde(default)]
    pub custom_product: CustomProductConfig,

    /// Upload limits.
    #[serde(default)]
    pub uploads: UploadPolicy,

    /// Profile shown on the account page.
    #[serde(default)]
    pub account: Account,

    /// Past orders.
    #[serde(default)]
    pub orders: Vec<OrderConfig>,
}

impl StoreConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                CommerceError::Config(format!("Failed to parse JSON config {}: {}", path.display(), e))
            })
        } else {
            Self::from_toml_str(&content).map_err(|e| {
                CommerceError::Config(format!("Failed to parse TOML config {}: {}", path.display(), e))
            })
        }
    }

    /// Save config to a file, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CommerceError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            self.to_toml_string()?
        };

        std::fs::write(path, content).map_err(|e| {
            CommerceError::Config(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }

    /// Render as a TOML document.
    pub fn to_toml_string(&self) -> Result<String, CommerceError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The built-in store.
    pub fn sample() -> Result<Self, CommerceError> {
        Ok(Self::from_shop(&Shop::sample()?))
    }

    /// Describe an existing shop as a config file.
    pub fn from_shop(shop: &Shop) -> Self {
        Self {
            currency: shop.currency,
            products: shop.catalog.products().iter().map(ProductConfig::from).collect(),
            promo_codes: shop
                .promos
                .codes()
                .iter()
                .map(|p| PromoConfig {
                    code: p.code.clone(),
                    percent: p.percent.value(),
                    description: p.description.clone(),
                })
                .collect(),
            custom_product: CustomProductConfig::from(&shop.custom),
            uploads: shop.uploads,
            account: shop.account.clone(),
            orders: shop.orders.orders().iter().map(OrderConfig::from).collect(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// A catalog product entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub category: String,
    pub style: String,
    /// Base price in the store currency's smallest unit.
    pub price: i64,
    /// Product discount percentage (1-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    /// Image URL.
    pub image: String,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
}

impl From<&Product> for ProductConfig {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            style: product.style.clone(),
            price: product.price.amount,
            discount: product.discount.map(u8::from),
            image: product.image.src(),
            sizes: product.sizes.clone(),
            materials: product.materials.clone(),
        }
    }
}

/// A promo code entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromoConfig {
    pub code: String,
    /// Percentage off the subtotal (1-100).
    pub percent: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Custom print settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomProductConfig {
    pub category: String,
    pub style: String,
    /// Price in the store currency's smallest unit.
    pub price: i64,
    pub sizes: Vec<String>,
    pub materials: Vec<String>,
}

impl Default for CustomProductConfig {
    fn default() -> Self {
        Self::from(&CustomProductTemplate::default())
    }
}

impl From<&CustomProductTemplate> for CustomProductConfig {
    fn from(template: &CustomProductTemplate) -> Self {
        Self {
            category: template.category.clone(),
            style: template.style.clone(),
            price: template.base_price.amount,
            sizes: template.sizes.clone(),
            materials: template.materials.clone(),
        }
    }
}

/// A past order entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderConfig {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItemConfig>,
}

impl From<&Order> for OrderConfig {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            date: order.date,
            status: order.status,
            items: order
                .items
                .iter()
                .map(|item| OrderItemConfig {
                    product_id: item.product.id.to_string(),
                    size: item.size.clone(),
                    material: item.material.clone(),
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// One line of a past order, referencing a catalog product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItemConfig {
    pub product_id: String,
    pub size: String,
    pub material: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl OrderItemConfig {
    /// Check the quantity is within cart limits.
    pub fn check_quantity(&self) -> Result<(), CommerceError> {
        if self.quantity < 1 {
            return Err(CommerceError::Config(format!(
                "order item {}: quantity must be positive, got {}",
                self.product_id, self.quantity
            )));
        }
        if self.quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                self.quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }
        Ok(())
    }
}

fn default_quantity() -> i64 {
    1
}
