//! Built-in store data used when no config file is present.

use crate::account::{Account, PromoOffer};
use crate::cart::{LineItem, PromoCode};
use crate::catalog::{Catalog, ImageSource, Product};
use crate::customize::CustomProductTemplate;
use crate::error::CommerceError;
use crate::money::{Currency, Money, Percent};
use crate::orders::{Order, OrderHistory, OrderStatus};
use chrono::NaiveDate;

pub const SIZES: [&str; 3] = ["2x3m", "3x4m", "4x5m"];
pub const MATERIALS: [&str; 3] = ["Fleece", "Vinyl", "Paper"];

const TEN: Percent = Percent::constant(10);
const FIFTEEN: Percent = Percent::constant(15);
const TWENTY: Percent = Percent::constant(20);

fn wallpaper(
    id: &str,
    name: &str,
    category: &str,
    style: &str,
    price: i64,
    photo: &str,
) -> Product {
    Product::new(
        id,
        name,
        category,
        style,
        Money::new(price, Currency::RUB),
        ImageSource::remote(format!("https://images.unsplash.com/{photo}?w=800")),
    )
    .with_sizes(SIZES)
    .with_materials(MATERIALS)
}

/// The six catalog wallpapers.
pub fn catalog() -> Catalog {
    Catalog::new(vec![
        wallpaper("1", "Mountain Dawn", "Nature", "Landscape", 4500, "photo-1506905925346-21bda4d32df4")
            .with_discount(TEN),
        wallpaper("2", "Tropical Forest", "Nature", "Botanical", 5200, "photo-1542273917363-3b1817f69a2d"),
        wallpaper("3", "City Lights", "Cities", "Urban", 4800, "photo-1514565131-fce0801e5785")
            .with_discount(FIFTEEN),
        wallpaper("4", "Watercolor Abstraction", "Abstract", "Artistic", 6000, "photo-1541961017774-22349e4a1262"),
        wallpaper("5", "Ocean Wave", "Nature", "Marine", 4700, "photo-1505142468610-359e7d316be0"),
        wallpaper("6", "Minimalist Geometry", "Abstract", "Minimalism", 5500, "photo-1557672172-298e090bd0f1")
            .with_discount(TWENTY),
    ])
}

/// Redeemable promo codes.
pub fn promo_codes() -> Vec<PromoCode> {
    vec![
        PromoCode::new("WELCOME10", TEN).with_description("10% off your first order"),
        PromoCode::new("LOYAL20", TWENTY).with_description("20% off for returning customers"),
    ]
}

pub fn custom_product_template() -> CustomProductTemplate {
    CustomProductTemplate {
        category: "Custom".to_string(),
        style: "Custom design".to_string(),
        base_price: Money::new(5800, Currency::RUB),
        sizes: SIZES.iter().map(|s| s.to_string()).collect(),
        materials: MATERIALS.iter().map(|m| m.to_string()).collect(),
    }
}

pub fn account() -> Account {
    Account::new("Ivan Petrov", "ivan.petrov@email.com")
        .with_offer(PromoOffer::new("LOYAL20", "20% off for returning customers"))
        .with_offer(PromoOffer::new("BIRTHDAY15", "15% birthday discount"))
}

/// Two past orders: one being printed, one delivered.
pub fn order_history() -> Result<OrderHistory, CommerceError> {
    let catalog = catalog();
    let date = |y, m, d| {
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| CommerceError::Config(format!("invalid date {y}-{m}-{d}")))
    };

    let printing = Order::new(
        "ORD-2024-001",
        date(2024, 12, 15)?,
        OrderStatus::Printing,
        vec![LineItem::new(catalog.get(&"1".into())?.clone(), "3x4m", "Fleece")],
        Currency::RUB,
    )?;
    let delivered = Order::new(
        "ORD-2024-002",
        date(2024, 12, 10)?,
        OrderStatus::Delivered,
        vec![LineItem::new(catalog.get(&"3".into())?.clone(), "2x3m", "Vinyl")],
        Currency::RUB,
    )?;

    Ok(OrderHistory::new(vec![printing, delivered]))
}
