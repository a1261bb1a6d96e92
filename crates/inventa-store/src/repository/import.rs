//! # Import Repository
//!
//! Bulk product upsert from a decoded workbook. `productos.json` is written
//! once, after every row has been processed.

use inventa_core::import::{import_products, Workbook};
use inventa_core::ImportSummary;
use tracing::info;

use crate::error::StoreResult;
use crate::store::Store;

/// Repository for bulk imports.
#[derive(Debug, Clone)]
pub struct ImportRepository {
    store: Store,
}

impl ImportRepository {
    /// Creates a new ImportRepository.
    pub fn new(store: Store) -> Self {
        ImportRepository { store }
    }

    /// Imports the `productos` sheet of `workbook`.
    ///
    /// Upload-level problems (extension, sheet, header) fail before any write.
    /// At most `error_limit` row errors are returned.
    pub async fn import_products(
        &self,
        file_name: &str,
        workbook: &(dyn Workbook + Sync),
        error_limit: usize,
    ) -> StoreResult<ImportSummary> {
        let _guard = self.store.lock().await;
        let mut products = self.store.load_products().await?;

        let summary = import_products(file_name, workbook, &mut products, error_limit)?;
        self.store.save_products(&products).await?;

        info!(
            file = file_name,
            creados = summary.created,
            actualizados = summary.updated,
            errores = summary.total_errors,
            "Products imported"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{product_input, store};
    use inventa_core::import::{Cell, InMemoryWorkbook, Sheet};
    use inventa_core::{ErrorKind, Money};

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[tokio::test]
    async fn test_import_upserts_and_reports_bad_rows() {
        let (_dir, store) = store().await;
        store
            .products()
            .create(product_input("Martillo", 1000, 600, 5))
            .await
            .unwrap();

        let workbook = InMemoryWorkbook {
            sheets: vec![Sheet {
                name: "productos".to_string(),
                rows: vec![
                    ["id", "nombre", "categoria", "precio", "stock"].map(text).to_vec(),
                    vec![
                        Cell::Int(1),
                        text("Martillo"),
                        text("Herramientas"),
                        Cell::Int(11),
                        Cell::Int(4),
                    ],
                    vec![
                        Cell::Empty,
                        text(""),
                        text("Herramientas"),
                        Cell::Int(1),
                        Cell::Int(1),
                    ],
                    vec![
                        Cell::Empty,
                        text("Serrucho"),
                        text("Herramientas"),
                        Cell::Float(20.5),
                        Cell::Int(2),
                    ],
                ],
            }],
        };

        let summary = store
            .imports()
            .import_products("inventario.xlsx", &workbook, 50)
            .await
            .unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.updated, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.errors[0].row, 3);

        let products = store.products().list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, Money::from_cents(1100));
        assert_eq!(products[0].stock, 4);
        assert_eq!(products[1].id, 2);
        assert_eq!(products[1].price, Money::from_cents(2050));
    }

    #[tokio::test]
    async fn test_invalid_upload_writes_nothing() {
        let (dir, store) = store().await;
        let err = store
            .imports()
            .import_products("inventario.xls", &InMemoryWorkbook::default(), 50)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let on_disk = std::fs::read_to_string(dir.path().join("productos.json")).unwrap();
        assert_eq!(on_disk.trim(), "[]");
    }
}
