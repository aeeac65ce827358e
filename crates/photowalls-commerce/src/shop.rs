//! The validated, immutable store a session runs against.

use crate::account::Account;
use crate::cart::{LineItem, PromoCode, PromoRegistry};
use crate::catalog::{Catalog, ImageSource, Product};
use crate::config::{CustomProductConfig, OrderConfig, ProductConfig, StoreConfig};
use crate::customize::{CustomProductTemplate, UploadPolicy};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money, Percent};
use crate::orders::{Order, OrderHistory};
use crate::sample;
use std::collections::HashSet;

/// Everything that stays fixed for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    pub currency: Currency,
    pub catalog: Catalog,
    pub promos: PromoRegistry,
    pub custom: CustomProductTemplate,
    pub uploads: UploadPolicy,
    pub account: Account,
    pub orders: OrderHistory,
}

impl Shop {
    /// The built-in store.
    pub fn sample() -> Result<Self, CommerceError> {
        Ok(Self {
            currency: Currency::RUB,
            catalog: sample::catalog(),
            promos: PromoRegistry::new(sample::promo_codes())?,
            custom: sample::custom_product_template(),
            uploads: UploadPolicy::default(),
            account: sample::account(),
            orders: sample::order_history()?,
        })
    }

    /// Validate a config file and build the shop it describes.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CommerceError> {
        let currency = config.currency;

        let mut seen = HashSet::new();
        let mut products = Vec::with_capacity(config.products.len());
        for entry in &config.products {
            if !seen.insert(entry.id.as_str()) {
                return Err(invalid(format!("duplicate product id {}", entry.id)));
            }
            products.push(build_product(entry, currency)?);
        }
        let catalog = Catalog::new(products);

        let codes = config
            .promo_codes
            .iter()
            .map(|p| {
                let percent = Percent::new(p.percent)
                    .map_err(|e| invalid(format!("promo code {}: {}", p.code, e)))?;
                let code = PromoCode::new(p.code.clone(), percent);
                Ok(match &p.description {
                    Some(description) => code.with_description(description.clone()),
                    None => code,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;
        let promos = PromoRegistry::new(codes)?;

        let custom = build_template(&config.custom_product, currency)?;

        let mut order_ids = HashSet::new();
        let mut orders = Vec::with_capacity(config.orders.len());
        for entry in &config.orders {
            if !order_ids.insert(entry.id.as_str()) {
                return Err(invalid(format!("duplicate order id {}", entry.id)));
            }
            orders.push(build_order(entry, &catalog, currency)?);
        }

        Ok(Self {
            currency,
            catalog,
            promos,
            custom,
            uploads: config.uploads,
            account: config.account.clone(),
            orders: OrderHistory::new(orders),
        })
    }
}

fn invalid(message: String) -> CommerceError {
    CommerceError::Config(message)
}

fn check_options(owner: &str, kind: &str, options: &[String]) -> Result<(), CommerceError> {
    if options.is_empty() {
        return Err(invalid(format!("{owner}: no {kind} offered")));
    }
    let mut seen = HashSet::new();
    for option in options {
        if option.is_empty() {
            return Err(invalid(format!("{owner}: empty {kind} label")));
        }
        if !seen.insert(option.as_str()) {
            return Err(invalid(format!("{owner}: duplicate {kind} {option}")));
        }
    }
    Ok(())
}

fn check_price(owner: &str, price: i64) -> Result<(), CommerceError> {
    if price < 0 {
        return Err(invalid(format!("{owner}: negative price {price}")));
    }
    Ok(())
}

fn build_product(entry: &ProductConfig, currency: Currency) -> Result<Product, CommerceError> {
    let owner = format!("product {}", entry.id);
    if entry.id.is_empty() {
        return Err(invalid("product with empty id".to_string()));
    }
    if ProductId::new(entry.id.as_str()).is_custom() {
        return Err(invalid(format!("{owner}: ids starting with \"custom-\" are reserved")));
    }
    check_price(&owner, entry.price)?;
    check_options(&owner, "sizes", &entry.sizes)?;
    check_options(&owner, "materials", &entry.materials)?;

    let product = Product::new(
        entry.id.as_str(),
        entry.name.clone(),
        entry.category.clone(),
        entry.style.clone(),
        Money::new(entry.price, currency),
        ImageSource::remote(entry.image.clone()),
    )
    .with_sizes(entry.sizes.iter().cloned())
    .with_materials(entry.materials.iter().cloned());

    match entry.discount {
        Some(discount) => {
            let percent =
                Percent::new(discount).map_err(|e| invalid(format!("{owner}: {e}")))?;
            Ok(product.with_discount(percent))
        }
        None => Ok(product),
    }
}

fn build_template(
    entry: &CustomProductConfig,
    currency: Currency,
) -> Result<CustomProductTemplate, CommerceError> {
    let owner = "custom_product";
    check_price(owner, entry.price)?;
    check_options(owner, "sizes", &entry.sizes)?;
    check_options(owner, "materials", &entry.materials)?;
    Ok(CustomProductTemplate {
        category: entry.category.clone(),
        style: entry.style.clone(),
        base_price: Money::new(entry.price, currency),
        sizes: entry.sizes.clone(),
        materials: entry.materials.clone(),
    })
}

fn build_order(
    entry: &OrderConfig,
    catalog: &Catalog,
    currency: Currency,
) -> Result<Order, CommerceError> {
    let items = entry
        .items
        .iter()
        .map(|item| {
            let product = catalog
                .get(&ProductId::new(item.product_id.as_str()))
                .map_err(|e| invalid(format!("order {}: {}", entry.id, e)))?;
            product
                .check_size(&item.size)
                .and_then(|_| product.check_material(&item.material))
                .and_then(|_| item.check_quantity())
                .map_err(|e| invalid(format!("order {}: {}", entry.id, e)))?;
            Ok(LineItem::new(product.clone(), item.size.clone(), item.material.clone())
                .with_quantity(item.quantity))
        })
        .collect::<Result<Vec<_>, CommerceError>>()?;

    Order::new(entry.id.as_str(), entry.date, entry.status, items, currency)
}
