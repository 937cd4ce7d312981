//! Catalog search module.
//!
//! Contains the filters and query builder behind the catalog page.

mod filter;
mod query;

pub use filter::Filter;
pub use query::{CatalogQuery, SortOption};
