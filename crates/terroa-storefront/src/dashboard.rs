//! Admin dashboard figures.

use chrono::{DateTime, Utc};
use serde::Serialize;
use terroa_commerce::catalog::{CatalogProvider, Product};
use terroa_commerce::checkout::{OrderLedger, OrderStatus};
use terroa_commerce::ids::{ProductId, UserId};
use terroa_commerce::{CommerceError, Currency, Money};

const TOP_STOCK_COUNT: usize = 5;

/// A product row on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    pub product_id: ProductId,
    pub name: String,
    pub stock: u32,
}

impl From<&Product> for StockLevel {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            stock: product.stock,
        }
    }
}

/// Snapshot of sales and inventory for the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Total of all orders that were not cancelled.
    pub revenue: Money,
    pub order_count: usize,
    /// Orders that are neither delivered nor cancelled.
    pub open_orders: usize,
    /// Products below the low-stock threshold, in catalog order.
    pub low_stock: Vec<StockLevel>,
    /// Products with the most units on hand.
    pub top_by_stock: Vec<StockLevel>,
}

impl DashboardSummary {
    pub fn compute(
        ledger: &OrderLedger,
        catalog: &dyn CatalogProvider,
        currency: Currency,
        low_stock_threshold: u32,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            revenue: ledger.revenue(currency)?,
            order_count: ledger.len(),
            open_orders: ledger.open_orders().len(),
            low_stock: catalog
                .low_stock(low_stock_threshold)
                .into_iter()
                .map(StockLevel::from)
                .collect(),
            top_by_stock: catalog
                .top_by_stock(TOP_STOCK_COUNT)
                .into_iter()
                .map(StockLevel::from)
                .collect(),
        })
    }
}

/// A business that has ordered from the store, as seen from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub user_id: UserId,
    /// Contact person on the most recent order.
    pub name: String,
    pub business_name: String,
    /// CNPJ.
    pub tax_id: Option<String>,
    pub order_count: usize,
    pub last_purchase: DateTime<Utc>,
    /// Sum of orders that were not cancelled.
    pub total_spent: Money,
}

impl CustomerSummary {
    /// Case-insensitive business name match, or CNPJ substring match.
    /// A blank search matches everyone.
    pub fn matches(&self, search: &str) -> bool {
        let search = search.trim();
        if search.is_empty() {
            return true;
        }
        self.business_name
            .to_lowercase()
            .contains(&search.to_lowercase())
            || self.tax_id.as_deref().is_some_and(|t| t.contains(search))
    }
}

/// Customers who placed orders, most recent purchase first, filtered by
/// [`CustomerSummary::matches`].
pub fn customer_directory(
    ledger: &OrderLedger,
    currency: Currency,
    search: &str,
) -> Result<Vec<CustomerSummary>, CommerceError> {
    let mut customers: Vec<CustomerSummary> = Vec::new();
    for order in ledger.all() {
        let spent = if order.status == OrderStatus::Cancelled {
            Money::zero(currency)
        } else {
            order.total
        };
        match customers
            .iter_mut()
            .find(|c| c.user_id == order.customer.user_id)
        {
            Some(customer) => {
                customer.order_count += 1;
                customer.last_purchase = customer.last_purchase.max(order.placed_at);
                customer.total_spent = customer.total_spent.checked_add(&spent)?;
            }
            None => customers.push(CustomerSummary {
                user_id: order.customer.user_id.clone(),
                name: order.customer.name.clone(),
                business_name: order.customer.business_name.clone(),
                tax_id: order.customer.tax_id.clone(),
                order_count: 1,
                last_purchase: order.placed_at,
                total_spent: Money::zero(currency).checked_add(&spent)?,
            }),
        }
    }
    customers.retain(|c| c.matches(search));
    customers.sort_by(|a, b| b.last_purchase.cmp(&a.last_purchase));
    Ok(customers)
}
