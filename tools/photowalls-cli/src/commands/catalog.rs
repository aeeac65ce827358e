//! Catalog listing commands.

use anyhow::Result;
use photowalls_commerce::catalog::CategoryFilter;
use photowalls_commerce::session::Action;
use serde::Serialize;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::{format_bytes, price_tag};

#[derive(Serialize)]
struct ProductRow {
    id: String,
    name: String,
    category: String,
    style: String,
    price: i64,
    discount: Option<u8>,
    effective_price: i64,
    currency: &'static str,
}

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;
    let filter = args
        .category
        .as_deref()
        .map(CategoryFilter::from_label)
        .unwrap_or_default();

    if let CategoryFilter::Named(name) = &filter {
        if !store.state().categories().iter().any(|c| c == name) {
            ctx.output.warn(&format!("No category named {name}"));
        }
    }
    store.dispatch(Action::SelectCategory(filter))?;

    let state = store.state();
    let products = state.visible_products();

    if ctx.output.is_json() {
        let rows = products
            .iter()
            .map(|p| -> Result<ProductRow> {
                Ok(ProductRow {
                    id: p.id.to_string(),
                    name: p.name.clone(),
                    category: p.category.clone(),
                    style: p.style.clone(),
                    price: p.price.amount,
                    discount: p.discount.map(u8::from),
                    effective_price: p.effective_price()?.amount,
                    currency: p.price.currency.code(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output
        .header(&format!("Catalog: {} ({})", state.category().label(), products.len()));
    let widths = [4, 24, 10, 14, 20, 6];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "STYLE", "PRICE", "SALE"], &widths);
    for product in &products {
        let effective = product.effective_price()?;
        let sale = product
            .discount
            .map(|d| format!("-{d}"))
            .unwrap_or_default();
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &product.name,
                &product.category,
                &product.style,
                &price_tag(&product.price, &effective),
                &sale,
            ],
            &widths,
        );
    }

    let shop = state.shop();
    ctx.output.info(&format!(
        "Custom prints from your own photo: {} (images up to {})",
        shop.custom.base_price.display(),
        format_bytes(shop.uploads.hint_bytes)
    ));

    Ok(())
}

/// Run the categories command.
pub fn categories(ctx: &Context) -> Result<()> {
    let store = ctx.storefront()?;
    let categories = store.state().categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    for category in &categories {
        let count = store
            .state()
            .shop()
            .catalog
            .filter(&CategoryFilter::from_label(category))
            .count();
        ctx.output.list_item(&format!("{category} ({count})"));
    }

    Ok(())
}
