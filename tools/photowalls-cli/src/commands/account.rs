//! Account page command.

use anyhow::Result;
use serde::Serialize;

use crate::context::Context;

#[derive(Serialize)]
struct OfferRow<'a> {
    code: &'a str,
    description: &'a str,
    redeemable: bool,
}

#[derive(Serialize)]
struct AccountView<'a> {
    name: &'a str,
    email: &'a str,
    orders: usize,
    offers: Vec<OfferRow<'a>>,
}

/// Run the account command.
pub fn run(ctx: &Context) -> Result<()> {
    let shop = ctx.shop()?;
    let account = &shop.account;

    let offers: Vec<OfferRow<'_>> = account
        .offers
        .iter()
        .map(|offer| OfferRow {
            code: &offer.code,
            description: &offer.description,
            redeemable: offer.is_redeemable(&shop.promos),
        })
        .collect();

    if ctx.output.is_json() {
        ctx.output.json(&AccountView {
            name: &account.name,
            email: &account.email,
            orders: shop.orders.len(),
            offers,
        });
        return Ok(());
    }

    ctx.output.header(&format!("{} ({})", account.name, account.initials()));
    ctx.output.kv("email", &account.email);
    ctx.output.kv("orders", &shop.orders.len().to_string());

    if !offers.is_empty() {
        ctx.output.header("Your offers");
        for offer in &offers {
            let note = if offer.redeemable { "" } else { " (not redeemable online)" };
            ctx.output
                .list_item(&format!("{}: {}{}", offer.code, offer.description, note));
        }
    }

    Ok(())
}
