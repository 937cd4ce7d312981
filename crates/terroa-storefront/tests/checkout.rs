//! Placing orders and moving them through fulfilment.

mod common;

use std::time::Duration;

use common::*;
use rust_decimal_macros::dec;
use terroa_storefront::prelude::*;

fn request() -> CheckoutRequest {
    CheckoutRequest::new("Rua das Flores, 120 - Salvador BA", PaymentMethod::Pix)
}

#[tokio::test]
async fn test_place_order_records_and_clears_cart() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 2).unwrap();
    store.add_to_cart(&id("c"), 1).unwrap();
    let expected = store.cart_total().unwrap();

    let order = store.place_order(request()).await.unwrap();

    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.total, expected);
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.customer.business_name, "Bistrô Raiz");
    assert!(store.cart().is_empty());
    assert_eq!(store.checkout_state(), CheckoutState::Idle);

    let orders = store.user_orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order.id);
}

#[tokio::test]
async fn test_blank_address_changes_nothing() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 2).unwrap();

    let err = store
        .place_order(CheckoutRequest::new("  ", PaymentMethod::Boleto))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::MissingDeliveryAddress)
    ));
    assert!(err.is_validation());
    assert_eq!(store.cart().item_count(), 2);
    assert!(store.user_orders().is_empty());
    assert_eq!(store.checkout_state(), CheckoutState::Idle);
}

#[tokio::test]
async fn test_signed_out_cannot_checkout() {
    let mut store = open(basket_catalog());
    store.add_to_cart(&id("a"), 1).unwrap();

    assert!(store.can_checkout().is_err());
    let err = store.place_order(request()).await.unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(store.cart().item_count(), 1);
}

#[tokio::test]
async fn test_empty_cart_cannot_checkout() {
    let mut store = signed_in(basket_catalog());
    let err = store.place_order(request()).await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::EmptyCart)
    ));
}

#[tokio::test]
async fn test_wholesale_minimum_is_inclusive() {
    let mut store = signed_in(basket_catalog());
    store.set_pricing_mode(PricingMode::Wholesale);

    store.add_to_cart(&id("odd"), 1).unwrap();
    assert_eq!(store.cart_total().unwrap(), brl(dec!(499.99)));
    assert!(store.can_checkout().is_err());
    let err = store.place_order(request()).await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::BelowWholesaleMinimum { .. })
    ));
    assert_eq!(store.cart().item_count(), 1);

    store.clear_cart();
    store.add_to_cart(&id("bulk"), 5).unwrap();
    assert_eq!(store.cart_total().unwrap(), brl(dec!(500.00)));
    assert!(store.can_checkout().is_ok());
    let order = store.place_order(request()).await.unwrap();
    assert_eq!(order.pricing_mode, PricingMode::Wholesale);
    assert_eq!(order.total, brl(dec!(500.00)));
}

#[tokio::test]
async fn test_retail_has_no_minimum() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("b"), 1).unwrap();
    assert!(store.place_order(request()).await.is_ok());
}

#[tokio::test]
async fn test_order_is_a_snapshot() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 2).unwrap();
    let order = store.place_order(request()).await.unwrap();

    store.set_pricing_mode(PricingMode::Wholesale);
    store.logout().unwrap();
    store.login_as_admin().unwrap();
    store.set_stock(&id("a"), 0).unwrap();

    let stored = store.order(&order.id).unwrap();
    assert_eq!(stored.total, brl(dec!(25.80)));
    assert_eq!(stored.pricing_mode, PricingMode::Retail);
    assert_eq!(stored.lines[0].unit_price, brl(dec!(12.90)));
    assert_eq!(stored.lines[0].quantity, 2);
}

#[tokio::test]
async fn test_checkout_transitions() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 1).unwrap();
    let mut transitions = store.subscribe_checkout();

    store.place_order(request()).await.unwrap();

    assert_eq!(
        drain(&mut transitions),
        vec![
            CheckoutState::Validating,
            CheckoutState::Settling,
            CheckoutState::Completed,
            CheckoutState::Idle,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_latency_is_simulated() {
    let config = StorefrontConfig::default();
    let mut store =
        Storefront::open(&config, std::sync::Arc::new(MemoryStore::new()), basket_catalog())
            .unwrap();
    store.login_as_admin().unwrap();
    store.add_to_cart(&id("a"), 1).unwrap();

    let started = tokio::time::Instant::now();
    store.place_order(request()).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test]
async fn test_order_events() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 1).unwrap();
    let mut events = store.subscribe();

    let order = store.place_order(request()).await.unwrap();

    assert_eq!(
        drain(&mut events),
        vec![
            StoreEvent::OrderPlaced {
                order_id: order.id.clone(),
                total: order.total,
            },
            StoreEvent::CartChanged { item_count: 0 },
        ]
    );
}

#[tokio::test]
async fn test_order_visibility() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 1).unwrap();
    let first = store.place_order(request()).await.unwrap();

    store.logout().unwrap();
    assert!(store.user_orders().is_empty());

    store
        .login(&Credentials::new("outro@cliente.com", "x"))
        .unwrap();
    store.add_to_cart(&id("b"), 1).unwrap();
    let second = store.place_order(request()).await.unwrap();
    let mine: Vec<&OrderId> = store.user_orders().iter().map(|o| &o.id).collect();
    assert_eq!(mine, vec![&second.id]);

    store.login_as_admin().unwrap();
    let all: Vec<&OrderId> = store.user_orders().iter().map(|o| &o.id).collect();
    assert_eq!(all, vec![&second.id, &first.id]);
}

#[tokio::test]
async fn test_status_updates_are_admin_only() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 1).unwrap();
    let order = store.place_order(request()).await.unwrap();

    let err = store
        .update_order_status(&order.id, OrderStatus::Processing)
        .unwrap_err();
    assert!(err.is_permission_error());

    store.login_as_admin().unwrap();
    let mut events = store.subscribe();
    store
        .update_order_status(&order.id, OrderStatus::Processing)
        .unwrap();
    store
        .update_order_status(&order.id, OrderStatus::Processing)
        .unwrap();
    assert_eq!(
        store.order(&order.id).unwrap().status,
        OrderStatus::Processing
    );
    assert_eq!(
        drain(&mut events),
        vec![StoreEvent::OrderStatusChanged {
            order_id: order.id.clone(),
            from: OrderStatus::Received,
            to: OrderStatus::Processing,
        }]
    );

    let err = store
        .update_order_status(&order.id, OrderStatus::Received)
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::InvalidStatusTransition { .. })
    ));

    let err = store
        .update_order_status(&OrderId::new("TRR-000000"), OrderStatus::Shipped)
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Commerce(CommerceError::OrderNotFound(_))
    ));
}

#[tokio::test]
async fn test_customer_directory() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("a"), 2).unwrap();
    store.place_order(request()).await.unwrap();
    store.add_to_cart(&id("c"), 1).unwrap();
    let latest = store.place_order(request()).await.unwrap();

    store
        .login(&Credentials::new("pedidos@sol.com", "x").with_business_name("Padaria Sol"))
        .unwrap();
    store.add_to_cart(&id("b"), 1).unwrap();
    let cancelled = store.place_order(request()).await.unwrap();
    assert!(store.customers("").unwrap_err().is_permission_error());

    store.login_as_admin().unwrap();
    store
        .update_order_status(&cancelled.id, OrderStatus::Cancelled)
        .unwrap();

    let names: Vec<String> = store
        .customers("")
        .unwrap()
        .into_iter()
        .map(|c| c.business_name)
        .collect();
    assert_eq!(names, vec!["Padaria Sol", "Bistrô Raiz"]);

    let raiz = store.customers("RAIZ").unwrap();
    assert_eq!(raiz.len(), 1);
    assert_eq!(raiz[0].order_count, 2);
    assert_eq!(raiz[0].total_spent, brl(dec!(70.80)));
    assert_eq!(raiz[0].last_purchase, latest.placed_at);
    assert_eq!(raiz[0].tax_id.as_deref(), Some("12.345.678/0001-90"));

    let sol = store.customers("sol").unwrap();
    assert_eq!(sol.len(), 1);
    assert!(sol[0].total_spent.is_zero());

    assert_eq!(store.customers("678/0001").unwrap().len(), 2);
    assert!(store.customers("99.999").unwrap().is_empty());
}

#[tokio::test]
async fn test_orders_feed_best_selling() {
    let mut store = signed_in(basket_catalog());
    store.add_to_cart(&id("c"), 3).unwrap();
    store.add_to_cart(&id("b"), 1).unwrap();
    store.place_order(request()).await.unwrap();

    assert_eq!(store.catalog().get(&id("c")).unwrap().sales_count, 3);
    let query = CatalogQuery::new().with_sort(SortOption::BestSelling);
    let ranked: Vec<&str> = store.search(&query).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ranked[..2], ["c", "b"]);
}
