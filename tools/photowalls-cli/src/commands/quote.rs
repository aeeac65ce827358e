//! Price a cart by replaying shopper actions through a session.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use photowalls_commerce::cart::CartPricing;
use photowalls_commerce::session::{Action, Storefront};
use photowalls_commerce::{CommerceError, ProductId};
use serde::Serialize;

use super::QuoteArgs;
use crate::context::Context;
use crate::output::format_bytes;

#[derive(Serialize)]
struct Quote<'a> {
    session_id: &'a str,
    pricing: &'a CartPricing,
    warnings: &'a [String],
}

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.storefront()?;
    let mut warnings = Vec::new();

    for raw in &args.items {
        let (id, size, material) = split_spec(raw, "ID")?;
        add_item(&mut store, id, size, material).with_context(|| format!("Cannot add {raw}"))?;
    }

    for raw in &args.uploads {
        let (path, size, material) = split_spec(raw, "PATH")?;
        let path = ctx.resolve_path(path);
        if let Some(warning) = add_upload(&mut store, &path, size, material)
            .with_context(|| format!("Cannot add custom print {raw}"))?
        {
            ctx.output.warn(&warning);
            warnings.push(warning);
        }
    }

    if let Some(code) = args.promo {
        match store.dispatch(Action::ApplyPromo(code)) {
            Ok(_) => {}
            Err(CommerceError::InvalidPromoCode(code)) => {
                let warning = format!("Promo code {code} is not valid");
                ctx.output.warn(&warning);
                warnings.push(warning);
            }
            Err(e) => return Err(e.into()),
        }
    }

    let state = store.state();
    let pricing = state.pricing()?;

    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            session_id: store.session_id(),
            pricing: &pricing,
            warnings: &warnings,
        });
        return Ok(());
    }

    if state.cart().is_empty() {
        ctx.output.info("Cart is empty");
    } else {
        ctx.output.header(&format!("Cart ({} lines)", state.cart_badge()));
        let widths = [24, 6, 8, 4, 10, 10];
        ctx.output
            .table_row(&["ITEM", "SIZE", "MATERIAL", "QTY", "PRICE", "TOTAL"], &widths);
        for (item, line) in state.cart().items().iter().zip(&pricing.line_items) {
            ctx.output.table_row(
                &[
                    &line.product_name,
                    &item.size,
                    &item.material,
                    &line.quantity.to_string(),
                    &line.unit_price.display(),
                    &line.line_total.display(),
                ],
                &widths,
            );
        }
    }

    ctx.output.kv("subtotal", &pricing.subtotal.display());
    if let Some(promo) = &pricing.promo {
        ctx.output.kv(
            "promo",
            &format!(
                "-{} ({} {})",
                pricing.promo_discount.display(),
                promo.code,
                promo.percent
            ),
        );
    }
    ctx.output.kv("total", &pricing.total.display());
    if let Some(savings) = pricing.total_savings().filter(|s| s.is_positive()) {
        ctx.output.success(&format!("You save {}", savings.display()));
    }

    Ok(())
}

fn add_item(store: &mut Storefront, id: &str, size: &str, material: &str) -> Result<()> {
    store.dispatch(Action::OpenProduct(ProductId::new(id)))?;
    store.dispatch(Action::SelectSize(size.to_string()))?;
    store.dispatch(Action::SelectMaterial(material.to_string()))?;
    store.dispatch(Action::AddToCart)?;
    Ok(())
}

/// Returns a warning instead of failing when the file itself is refused.
fn add_upload(
    store: &mut Storefront,
    path: &Path,
    size: &str,
    material: &str,
) -> Result<Option<String>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type_for(path);

    store.dispatch(Action::OpenUpload)?;
    let token = match store.begin_upload(&file_name, media_type, bytes.len() as u64) {
        Ok(token) => token,
        Err(CommerceError::RejectedFile { file_name, .. }) => {
            store.dispatch(Action::CloseUpload)?;
            return Ok(Some(format!("Skipped {file_name}: not an image")));
        }
        Err(CommerceError::UploadTooLarge { size, limit }) => {
            store.dispatch(Action::CloseUpload)?;
            return Ok(Some(format!(
                "Skipped {file_name}: {} is over the {} limit",
                format_bytes(size),
                format_bytes(limit)
            )));
        }
        Err(e) => return Err(e.into()),
    };

    store.dispatch(Action::CompleteUpload { token, bytes })?;
    store.dispatch(Action::SelectUploadSize(size.to_string()))?;
    store.dispatch(Action::SelectUploadMaterial(material.to_string()))?;
    store.dispatch(Action::CommitUpload)?;
    Ok(None)
}

/// Split `target:size:material`. The target may itself contain colons.
fn split_spec<'a>(raw: &'a str, target: &str) -> Result<(&'a str, &'a str, &'a str)> {
    let mut parts = raw.rsplitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(material), Some(size), Some(head))
            if !head.is_empty() && !size.is_empty() && !material.is_empty() =>
        {
            Ok((head, size, material))
        }
        _ => bail!("Expected {target}:SIZE:MATERIAL, got {raw:?}"),
    }
}

/// Media type declared for a file, judged by its extension.
fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_spec() {
        assert_eq!(split_spec("1:3x4m:Fleece", "ID").unwrap(), ("1", "3x4m", "Fleece"));
        assert_eq!(
            split_spec("C:\\photos\\me.jpg:2x3m:Vinyl", "PATH").unwrap(),
            ("C:\\photos\\me.jpg", "2x3m", "Vinyl")
        );
        assert!(split_spec("1:3x4m", "ID").is_err());
        assert!(split_spec("1::Fleece", "ID").is_err());
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("scan.pdf")), "application/pdf");
        assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
    }
}
