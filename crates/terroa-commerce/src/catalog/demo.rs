//! Seed data for the demo storefront.

use crate::catalog::{Category, Product, StaticCatalog};
use crate::ids::ProductId;
use crate::money::{Currency, Money};

const CATEGORIES: &[&str] = &[
    "Raízes e Tubérculos",
    "Grãos e Cereais",
    "Temperos Naturais",
    "Bebidas Artesanais",
    "Hortifruti Orgânico",
    "Óleos e Essências",
    "Utensílios Eco",
];

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    image: &'static str,
    retail_cents: i64,
    wholesale_cents: i64,
    stock: u32,
    unit: &'static str,
}

const PRODUCTS: &[Seed] = &[
    Seed {
        id: "1",
        name: "Cachaça Artesanal Raiz 700ml",
        description: "Destilada em alambique de cobre com fermentação natural.",
        category: "Bebidas Artesanais",
        image: "https://images.unsplash.com/photo-1595977437232-9a0426eb64e0",
        retail_cents: 4500,
        wholesale_cents: 3250,
        stock: 50,
        unit: "Garrafa",
    },
    Seed {
        id: "2",
        name: "Mix de Raízes Orgânicas 2kg",
        description: "Seleção de mandioca, batata-doce e cará direto do produtor.",
        category: "Raízes e Tubérculos",
        image: "https://images.unsplash.com/photo-1590779033100-9f60705a2f3b",
        retail_cents: 1890,
        wholesale_cents: 1200,
        stock: 100,
        unit: "Saco",
    },
    Seed {
        id: "3",
        name: "Azeite de Oliva Extra Virgem 500ml",
        description: "Prensado a frio, acidez máxima 0.2%. Sabor intenso.",
        category: "Óleos e Essências",
        image: "https://images.unsplash.com/photo-1474979266404-7eaacbcd87c5",
        retail_cents: 3800,
        wholesale_cents: 2800,
        stock: 45,
        unit: "Frasco",
    },
    Seed {
        id: "4",
        name: "Feijão Preto Premium 1kg",
        description: "Grãos selecionados de agricultura familiar.",
        category: "Grãos e Cereais",
        image: "https://images.unsplash.com/photo-1551462147-37885abb3e4a",
        retail_cents: 1250,
        wholesale_cents: 890,
        stock: 200,
        unit: "Pacote",
    },
    Seed {
        id: "5",
        name: "Cúrcuma Pura em Pó 100g",
        description: "Cúrcuma moída na hora, sem aditivos.",
        category: "Temperos Naturais",
        image: "https://images.unsplash.com/photo-1615485500704-8e990f9900f7",
        retail_cents: 1500,
        wholesale_cents: 950,
        stock: 80,
        unit: "Pote",
    },
    Seed {
        id: "6",
        name: "Canudo de Bambu Reutilizável",
        description: "Kit com escova de limpeza, feito de bambu natural.",
        category: "Utensílios Eco",
        image: "https://images.unsplash.com/photo-1589365278144-c9e705f843ba",
        retail_cents: 2500,
        wholesale_cents: 1500,
        stock: 150,
        unit: "Kit",
    },
];

/// The demo catalog: six products across seven categories, priced in BRL.
pub fn demo_catalog() -> StaticCatalog {
    let products = PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            category: seed.category.to_string(),
            image: seed.image.to_string(),
            retail_price: Money::new(seed.retail_cents, Currency::BRL),
            wholesale_price: Money::new(seed.wholesale_cents, Currency::BRL),
            stock: seed.stock,
            unit: seed.unit.to_string(),
            sales_count: 0,
        })
        .collect();
    let categories = CATEGORIES.iter().map(|name| Category::new(*name)).collect();
    StaticCatalog::new(products, categories)
}
