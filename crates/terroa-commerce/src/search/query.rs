//! Catalog query builder.

use crate::cart::{unit_price, PricingMode};
use crate::catalog::Product;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Sort options for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Position,
    /// Sort by price under the given price list, low to high.
    PriceAsc(PricingMode),
    /// Sort by price under the given price list, high to low.
    PriceDesc(PricingMode),
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by best selling.
    BestSelling,
}

impl SortOption {
    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Position => "Destaques",
            SortOption::PriceAsc(_) => "Menor Valor",
            SortOption::PriceDesc(_) => "Maior Valor",
            SortOption::NameAsc => "Nome (A-Z)",
            SortOption::BestSelling => "Tendências",
        }
    }
}

/// A catalog query: filters combined with AND, then sorted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogQuery {
    /// Filters to apply.
    pub filters: Vec<Filter>,
    /// Sort option.
    pub sort: SortOption,
}

impl CatalogQuery {
    /// Create an empty query matching every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_text(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        if !q.trim().is_empty() {
            self.filters.push(Filter::Text(q.trim().to_string()));
        }
        self
    }

    /// Restrict to a category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.filters.push(Filter::Category(category.into()));
        self
    }

    /// Add a filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Check whether a product passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filter and sort a product list.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut results: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            SortOption::Position => {}
            SortOption::PriceAsc(mode) => {
                results.sort_by_key(|p| price_key(p, mode));
            }
            SortOption::PriceDesc(mode) => {
                results.sort_by_key(|p| std::cmp::Reverse(price_key(p, mode)));
            }
            SortOption::NameAsc => {
                results.sort_by_key(|p| p.name.to_lowercase());
            }
            SortOption::BestSelling => {
                results.sort_by_key(|p| std::cmp::Reverse(p.sales_count));
            }
        }
        results
    }
}

fn price_key(product: &Product, mode: PricingMode) -> i64 {
    unit_price(product, mode).amount_cents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{demo_catalog, CatalogProvider};

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let catalog = demo_catalog();
        let results = CatalogQuery::new().apply(catalog.list_products());
        assert_eq!(ids(&results), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_text_and_category_combined() {
        let catalog = demo_catalog();
        let query = CatalogQuery::new()
            .with_text("azeite")
            .with_category("Óleos e Essências");
        assert_eq!(ids(&catalog.search(&query)), vec!["3"]);

        let query = CatalogQuery::new()
            .with_text("azeite")
            .with_category("Bebidas Artesanais");
        assert!(catalog.search(&query).is_empty());
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let query = CatalogQuery::new().with_text("   ");
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_sort_by_wholesale_price() {
        let catalog = demo_catalog();
        let query = CatalogQuery::new().with_sort(SortOption::PriceAsc(PricingMode::Wholesale));
        let results = catalog.search(&query);
        assert_eq!(results.first().map(|p| p.id.as_str()), Some("4"));
        assert_eq!(results.last().map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn test_best_selling_uses_sales_count() {
        let mut catalog = demo_catalog();
        catalog.record_sale(&"5".into(), 4);
        catalog.record_sale(&"2".into(), 1);
        let query = CatalogQuery::new().with_sort(SortOption::BestSelling);
        assert_eq!(ids(&catalog.search(&query))[..2], ["5", "2"]);
    }

    #[test]
    fn test_sort_labels() {
        assert_eq!(SortOption::BestSelling.display_name(), "Tendências");
        assert_eq!(
            SortOption::PriceDesc(PricingMode::Retail).display_name(),
            "Maior Valor"
        );
        assert_eq!(SortOption::NameAsc.display_name(), "Nome (A-Z)");
    }
}
