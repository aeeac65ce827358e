//! Product detail command.

use anyhow::Result;
use photowalls_commerce::session::Action;
use photowalls_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::price_tag;

/// Run the product command.
pub fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;
    store.dispatch(Action::OpenProduct(ProductId::new(args.id)))?;

    let Some(selection) = store.state().selection() else {
        return Ok(());
    };
    let product = selection.product();

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    let effective = product.effective_price()?;
    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("style", &product.style);
    ctx.output.kv("price", &price_tag(&product.price, &effective));
    if let Some(discount) = product.discount {
        ctx.output.kv(
            "discount",
            &format!("{} (save {})", discount, product.discount_amount()?.display()),
        );
    }
    ctx.output.kv("sizes", &product.sizes.join(", "));
    ctx.output.kv("materials", &product.materials.join(", "));
    ctx.output.kv("image", &product.image.src());

    Ok(())
}
