//! # Sale Repository
//!
//! Sales, multi-item purchases, listing and per-company history over
//! `ventas.json`, reading `empresas.json` and `productos.json` as needed.
//!
//! ## Write Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Purchase Lifecycle                                │
//! │                                                                         │
//! │  1. LOCK + LOAD                                                         │
//! │     └── companies, products, sales snapshots                            │
//! │                                                                         │
//! │  2. VALIDATE (no mutation)                                              │
//! │     └── PurchasePlan::validate() → NotFound / InvalidArgument / Conflict│
//! │                                                                         │
//! │  3. APPLY IN MEMORY                                                     │
//! │     └── plan.commit() → new sale lines, stock deducted                  │
//! │                                                                         │
//! │  4. PERSIST                                                             │
//! │     └── ventas.json, then productos.json (sales restored on failure)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use inventa_core::sales::{filter_sales, history_for_company, PurchasePlan, SalePlan};
use inventa_core::{PurchaseReceipt, PurchaseRequest, Sale, SaleFilter, SaleRequest};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::Store;

/// Repository for sale operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: Store,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(store: Store) -> Self {
        SaleRepository { store }
    }

    /// Lists sales matching every present filter.
    pub async fn list(&self, filter: &SaleFilter) -> StoreResult<Vec<Sale>> {
        let _guard = self.store.lock().await;
        let sales = self.store.load_sales().await?;
        let matched = filter_sales(&sales, filter)?;
        debug!(
            total = sales.len(),
            matched = matched.len(),
            ?filter,
            "Listed sales"
        );
        Ok(matched)
    }

    /// Records a single-item sale and deducts its stock.
    ///
    /// ## Errors
    /// * `CompanyNotFound` / `ProductNotFound` - unknown ids
    /// * `Validation` - quantity ≤ 0 or unreadable date
    /// * `InsufficientStock` - not enough units
    pub async fn create(&self, request: SaleRequest) -> StoreResult<Sale> {
        let _guard = self.store.lock().await;
        debug!(
            empresa_id = request.company_id,
            producto_id = request.product_id,
            cantidad = request.quantity,
            "Creating sale"
        );

        let companies = self.store.load_companies().await?;
        let mut products = self.store.load_products().await?;
        let mut sales = self.store.load_sales().await?;

        let plan = SalePlan::validate(&request, &companies, &products, self.store.now())?;

        let previous = sales.clone();
        let sale = plan.commit(&mut products, &mut sales);
        self.store
            .commit_sales_and_products(&previous, &sales, &products)
            .await?;

        info!(
            id = sale.id,
            empresa_id = sale.company_id,
            producto_id = sale.product_id,
            total = %sale.total,
            "Sale recorded"
        );
        Ok(sale)
    }

    /// Records a multi-item purchase: all lines or none.
    pub async fn create_purchase(&self, request: PurchaseRequest) -> StoreResult<PurchaseReceipt> {
        let _guard = self.store.lock().await;
        debug!(
            empresa_id = request.company_id,
            items = request.items.len(),
            "Creating purchase"
        );

        let companies = self.store.load_companies().await?;
        let mut products = self.store.load_products().await?;
        let mut sales = self.store.load_sales().await?;

        let plan = PurchasePlan::validate(&request, &companies, &products, self.store.now())?;

        let previous = sales.clone();
        let receipt = plan.commit(&mut products, &mut sales);
        self.store
            .commit_sales_and_products(&previous, &sales, &products)
            .await?;

        info!(
            compra_id = receipt.purchase_id,
            empresa_id = receipt.company_id,
            lineas = receipt.lines_created,
            total = %receipt.total,
            "Purchase recorded"
        );
        Ok(receipt)
    }

    /// All sales of one company.
    ///
    /// `NotFound` for an unknown company and for a company without sales.
    pub async fn history(&self, company_id: i64) -> StoreResult<Vec<Sale>> {
        let _guard = self.store.lock().await;
        let companies = self.store.load_companies().await?;
        let sales = self.store.load_sales().await?;
        let history = history_for_company(company_id, &companies, &sales)?;
        debug!(empresa_id = company_id, count = history.len(), "Loaded history");
        Ok(history)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
