//! # Report Repository
//!
//! Cash-flow report over one snapshot of sales and products.

use inventa_core::report::cash_flow;
use inventa_core::CashFlowReport;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::Store;

/// Repository for reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    store: Store,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(store: Store) -> Self {
        ReportRepository { store }
    }

    /// Revenue, profit and units sold in `[from, to]`.
    ///
    /// Sales without a readable date are skipped and logged.
    pub async fn cash_flow(&self, from: &str, to: &str) -> StoreResult<CashFlowReport> {
        let _guard = self.store.lock().await;
        let sales = self.store.load_sales().await?;
        let products = self.store.load_products().await?;

        let flow = cash_flow(from, to, &sales, &products)?;
        if !flow.skipped.is_empty() {
            warn!(
                count = flow.skipped.len(),
                sale_ids = ?flow.skipped,
                "Skipped sales with unreadable fecha"
            );
        }

        debug!(
            desde = %flow.report.from,
            hasta = %flow.report.to,
            ventas = %flow.report.revenue,
            "Built cash-flow report"
        );
        Ok(flow.report)
    }
}
