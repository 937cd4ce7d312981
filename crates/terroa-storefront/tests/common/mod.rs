#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal_macros::dec;
use terroa_storefront::prelude::*;

pub fn brl(amount: rust_decimal::Decimal) -> Money {
    Money::from_decimal(amount, Currency::BRL).unwrap()
}

pub fn product(id: &str, retail: Money, wholesale: Money, stock: u32) -> Product {
    Product::new(id, format!("Produto {id}"), retail, wholesale, stock)
        .unwrap()
        .with_category("Mercearia")
}

/// Products priced so the reference basket totals exactly 80.30 retail.
pub fn basket_catalog() -> StaticCatalog {
    StaticCatalog::new(
        vec![
            product("a", brl(dec!(12.90)), brl(dec!(10.00)), 50),
            product("b", brl(dec!(9.50)), brl(dec!(7.25)), 50),
            product("c", brl(dec!(45.00)), brl(dec!(30.00)), 50),
            product("bulk", brl(dec!(120.00)), brl(dec!(100.00)), 50),
            product("odd", brl(dec!(600.00)), brl(dec!(499.99)), 50),
        ],
        vec![],
    )
}

pub fn instant_config() -> StorefrontConfig {
    StorefrontConfig {
        settlement_latency_ms: 0,
        ..StorefrontConfig::default()
    }
}

pub fn open(catalog: StaticCatalog) -> Storefront {
    Storefront::open(&instant_config(), Arc::new(MemoryStore::new()), catalog).unwrap()
}

pub fn signed_in(catalog: StaticCatalog) -> Storefront {
    let mut store = open(catalog);
    store
        .login(&Credentials::new("compras@raiz.com", "x").with_business_name("Bistrô Raiz"))
        .unwrap();
    store
}

pub fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

pub fn drain<T: Clone>(rx: &mut tokio::sync::broadcast::Receiver<T>) -> Vec<T> {
    let mut seen = Vec::new();
    while let Ok(item) = rx.try_recv() {
        seen.push(item);
    }
    seen
}
