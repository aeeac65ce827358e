//! Order history command.

use anyhow::Result;
use photowalls_commerce::orders::OrderStatus;

use crate::context::Context;
use crate::output::status_badge;

/// Run the orders command.
pub fn run(ctx: &Context) -> Result<()> {
    let shop = ctx.shop()?;
    let history = &shop.orders;

    if ctx.output.is_json() {
        ctx.output.json(history);
        return Ok(());
    }

    ctx.output.header(&format!("Orders ({})", history.len()));
    if history.is_empty() {
        ctx.output.info("No orders yet");
        return Ok(());
    }

    for order in history.orders() {
        println!();
        let widths = [14, 12, 12, 10];
        ctx.output.table_row(
            &[
                order.id.as_str(),
                &order.date.to_string(),
                &status_badge(order.status),
                &order.total.display(),
            ],
            &widths,
        );
        ctx.output.kv("progress", &progress(order.status));
        for item in &order.items {
            ctx.output.list_item(&format!(
                "{} {} / {} x{}",
                item.product.name, item.size, item.material, item.quantity
            ));
        }
    }

    Ok(())
}

/// Steps passed so far, e.g. "processing > printing > [shipping] > [delivered]".
fn progress(status: OrderStatus) -> String {
    OrderStatus::ALL
        .iter()
        .map(|step| {
            if step.ordinal() <= status.ordinal() {
                step.as_str().to_string()
            } else {
                format!("[{}]", step.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}
