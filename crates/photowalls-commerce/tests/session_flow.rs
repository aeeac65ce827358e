//! End-to-end storefront sessions driven through the store.

use photowalls_commerce::prelude::*;
use photowalls_observability::{LogLevel, LogSink, SessionLogger};
use std::sync::Arc;

fn storefront() -> (Storefront, LogSink) {
    let sink = LogSink::memory();
    let logger = SessionLogger::new("flow")
        .with_min_level(LogLevel::Debug)
        .with_sink(sink.clone());
    let shop = Arc::new(Shop::sample().unwrap());
    (Storefront::with_logger(shop, logger), sink)
}

fn add(store: &mut Storefront, id: &str, size: &str, material: &str) {
    store.dispatch(Action::OpenProduct(ProductId::new(id))).unwrap();
    store.dispatch(Action::SelectSize(size.to_string())).unwrap();
    store.dispatch(Action::SelectMaterial(material.to_string())).unwrap();
    store.dispatch(Action::AddToCart).unwrap();
}

#[test]
fn test_effective_price_formula_holds_for_catalog() {
    let shop = Shop::sample().unwrap();
    for product in shop.catalog.products() {
        let expected = match product.discount {
            Some(d) => product.price.amount * (100 - i64::from(d.value())) / 100,
            None => product.price.amount,
        };
        assert_eq!(product.effective_price().unwrap().amount, expected, "{}", product.name);
    }
}

#[test]
fn test_duplicate_configuration_merges() {
    let (mut store, _) = storefront();
    add(&mut store, "1", "3x4m", "Fleece");
    add(&mut store, "1", "3x4m", "Fleece");

    let cart = store.state().cart();
    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
    assert_eq!(store.state().pricing().unwrap().subtotal.amount, 8100);
}

#[test]
fn test_different_material_adds_line() {
    let (mut store, _) = storefront();
    add(&mut store, "1", "3x4m", "Fleece");
    add(&mut store, "1", "3x4m", "Vinyl");
    assert_eq!(store.state().cart().line_count(), 2);
    assert_eq!(store.state().cart_badge(), 2);
}

#[test]
fn test_welcome10_on_4500() {
    let mut config = StoreConfig::sample().unwrap();
    config.products[0].discount = None;
    let shop = Arc::new(Shop::from_config(&config).unwrap());
    let mut store = Storefront::with_logger(shop, SessionLogger::new("welcome"));

    add(&mut store, "1", "2x3m", "Paper");
    store.dispatch(Action::ApplyPromo("WELCOME10".to_string())).unwrap();

    let pricing = store.state().pricing().unwrap();
    assert_eq!(pricing.subtotal.amount, 4500);
    assert_eq!(pricing.promo_discount.amount, 450);
    assert_eq!(pricing.total.amount, 4050);
}

#[test]
fn test_loyal20_on_4800() {
    let mut config = StoreConfig::sample().unwrap();
    config.products[2].discount = None;
    let shop = Arc::new(Shop::from_config(&config).unwrap());
    let mut store = Storefront::with_logger(shop, SessionLogger::new("loyal"));

    add(&mut store, "3", "2x3m", "Vinyl");
    store.dispatch(Action::ApplyPromo("LOYAL20".to_string())).unwrap();

    let pricing = store.state().pricing().unwrap();
    assert_eq!(pricing.subtotal.amount, 4800);
    assert_eq!(pricing.promo_discount.amount, 960);
    assert_eq!(pricing.total.amount, 3840);
}

#[test]
fn test_unknown_code_leaves_total_unchanged() {
    let (mut store, sink) = storefront();
    add(&mut store, "2", "4x5m", "Vinyl");
    let before = store.state().pricing().unwrap();

    let err = store
        .dispatch(Action::ApplyPromo("SUMMER50".to_string()))
        .unwrap_err();
    assert_eq!(err, CommerceError::InvalidPromoCode("SUMMER50".to_string()));
    assert_eq!(store.state().pricing().unwrap(), before);
    assert!(sink
        .entries()
        .iter()
        .any(|e| e.level == LogLevel::Warn && e.message == "action rejected"));
}

#[test]
fn test_custom_upload_flow() {
    let (mut store, _) = storefront();
    store.dispatch(Action::OpenUpload).unwrap();
    let token = store.begin_upload("family.jpg", "image/jpeg", 5).unwrap();
    store
        .dispatch(Action::CompleteUpload {
            token,
            bytes: b"jpeg!".to_vec(),
        })
        .unwrap();
    store.dispatch(Action::SelectUploadSize("3x4m".to_string())).unwrap();
    store.dispatch(Action::SelectUploadMaterial("Fleece".to_string())).unwrap();
    store.dispatch(Action::CommitUpload).unwrap();

    let state = store.state();
    assert_eq!(state.cart().line_count(), 1);
    let line = &state.cart().items()[0];
    assert_eq!(line.unit_price().unwrap().amount, 5800);
    assert_eq!(line.product.name, "family");
    assert!(line.product.image.is_upload());
    assert!(line.product.image.src().starts_with("data:image/jpeg;base64,"));
    assert!(state.upload().is_idle());
    assert!(state.upload().image().is_none());
    assert!(!state.is_upload_open());
}

#[test]
fn test_two_uploads_of_same_file_are_separate_lines() {
    let (mut store, _) = storefront();
    for _ in 0..2 {
        let token = store.begin_upload("wall.png", "image/png", 1).unwrap();
        store
            .dispatch(Action::CompleteUpload {
                token,
                bytes: vec![7],
            })
            .unwrap();
        store.dispatch(Action::SelectUploadSize("2x3m".to_string())).unwrap();
        store.dispatch(Action::SelectUploadMaterial("Paper".to_string())).unwrap();
        store.dispatch(Action::CommitUpload).unwrap();
    }
    assert_eq!(store.state().cart().line_count(), 2);
}

#[test]
fn test_commit_without_material_is_incomplete() {
    let (mut store, _) = storefront();
    let token = store.begin_upload("wall.png", "image/png", 1).unwrap();
    store
        .dispatch(Action::CompleteUpload {
            token,
            bytes: vec![],
        })
        .unwrap();
    store.dispatch(Action::SelectUploadSize("2x3m".to_string())).unwrap();

    assert_eq!(
        store.dispatch(Action::CommitUpload).unwrap_err(),
        CommerceError::SelectionIncomplete("material".to_string())
    );
    assert!(store.state().cart().is_empty());
}

#[test]
fn test_non_image_rejected() {
    let (mut store, _) = storefront();
    let err = store.begin_upload("plan.pdf", "application/pdf", 100).unwrap_err();
    assert!(matches!(err, CommerceError::RejectedFile { .. }));
    assert!(store.state().upload().is_idle());
}

#[test]
fn test_latest_upload_wins() {
    let (mut store, _) = storefront();
    let slow = store.begin_upload("slow.png", "image/png", 1).unwrap();
    let fast = store.begin_upload("fast.png", "image/png", 1).unwrap();

    store
        .dispatch(Action::CompleteUpload {
            token: fast,
            bytes: vec![1],
        })
        .unwrap();
    let stale = store.dispatch(Action::CompleteUpload {
        token: slow,
        bytes: vec![2],
    });
    assert!(matches!(stale, Err(CommerceError::StaleUpload { .. })));
    assert_eq!(store.state().upload().image().unwrap().file_name, "fast.png");
}

#[test]
fn test_empty_cart_totals_zero_with_promo() {
    let (mut store, _) = storefront();
    store.dispatch(Action::ApplyPromo("LOYAL20".to_string())).unwrap();
    let pricing = store.state().pricing().unwrap();
    assert!(pricing.subtotal.is_zero());
    assert!(pricing.total.is_zero());
}

#[test]
fn test_subtotal_independent_of_add_order() {
    let (mut forward, _) = storefront();
    add(&mut forward, "1", "2x3m", "Fleece");
    add(&mut forward, "4", "3x4m", "Vinyl");
    add(&mut forward, "6", "4x5m", "Paper");

    let (mut backward, _) = storefront();
    add(&mut backward, "6", "4x5m", "Paper");
    add(&mut backward, "4", "3x4m", "Vinyl");
    add(&mut backward, "1", "2x3m", "Fleece");

    assert_eq!(
        forward.state().pricing().unwrap().subtotal,
        backward.state().pricing().unwrap().subtotal
    );
}

#[test]
fn test_account_view_shows_history() {
    let (mut store, _) = storefront();
    store.dispatch(Action::ShowView(View::Account)).unwrap();
    let state = store.state();
    assert_eq!(state.view(), View::Account);
    assert_eq!(state.shop().account.name, "Ivan Petrov");
    let statuses: Vec<_> = state
        .shop()
        .orders
        .orders()
        .iter()
        .map(|o| o.status)
        .collect();
    assert_eq!(statuses, vec![OrderStatus::Printing, OrderStatus::Delivered]);
}
