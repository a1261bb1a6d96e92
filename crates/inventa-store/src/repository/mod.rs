//! # Repository Module
//!
//! Typed access to the data files for Inventa.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  store.sales().create_purchase(request)                         │
//! │       ▼                                                                 │
//! │  SaleRepository                                                         │
//! │  ├── lock                                                               │
//! │  ├── load empresas/productos/ventas snapshots                           │
//! │  ├── PurchasePlan::validate + commit (inventa-core)                     │
//! │  └── save ventas, then productos                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  JSON files in the data directory                                       │
//! │                                                                         │
//! │  Business rules stay in inventa-core; repositories only sequence        │
//! │  lock → load → plan → save.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CompanyRepository`](company::CompanyRepository) - Company CRUD, tax id uniqueness
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD
//! - [`SaleRepository`](sale::SaleRepository) - Sales, purchases, listing, history
//! - [`ReportRepository`](report::ReportRepository) - Cash-flow report
//! - [`ImportRepository`](import::ImportRepository) - Bulk product import

pub mod company;
pub mod import;
pub mod product;
pub mod report;
pub mod sale;

#[cfg(test)]
pub(crate) mod test_support {
    use inventa_core::{CompanyInput, Money, ProductInput};
    use tempfile::TempDir;

    use crate::{Store, StoreConfig};

    pub async fn store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(StoreConfig::new(dir.path())).await.unwrap();
        (dir, store)
    }

    pub fn company_input(name: &str, tax_id: &str) -> CompanyInput {
        CompanyInput {
            name: name.to_string(),
            tax_id: tax_id.to_string(),
            sector: None,
            phone: None,
            email: None,
            address: None,
        }
    }

    pub fn product_input(
        name: &str,
        price_cents: i64,
        cost_cents: i64,
        stock: i64,
    ) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: Money::from_cents(price_cents),
            stock,
            cost: Money::from_cents(cost_cents),
            category: "General".to_string(),
        }
    }
}
