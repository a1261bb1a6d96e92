//! # Product Repository
//!
//! CRUD over `productos.json`.
//!
//! Same shape as the company repository without a uniqueness rule. Price,
//! cost and stock are validated at the HTTP boundary, not here.

use inventa_core::{next_id, CoreError, Product, ProductInput};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::Store;

/// Repository for product operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: Store) -> Self {
        ProductRepository { store }
    }

    /// Lists every product in file order.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let _guard = self.store.lock().await;
        let products = self.store.load_products().await?;
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by id.
    pub async fn get(&self, id: i64) -> StoreResult<Product> {
        let _guard = self.store.lock().await;
        debug!(id, "Getting product");
        let products = self.store.load_products().await?;
        products
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    /// Creates a product under the next correlative id.
    pub async fn create(&self, input: ProductInput) -> StoreResult<Product> {
        let _guard = self.store.lock().await;
        let mut products = self.store.load_products().await?;

        let product = input.into_product(next_id(products.iter().map(|p| p.id)));
        products.push(product.clone());
        self.store.save_products(&products).await?;

        info!(id = product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Replaces every field of a product except its id.
    pub async fn update(&self, id: i64, input: ProductInput) -> StoreResult<Product> {
        let _guard = self.store.lock().await;
        let mut products = self.store.load_products().await?;

        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        *slot = input.into_product(id);
        let product = slot.clone();

        self.store.save_products(&products).await?;
        info!(id, "Product updated");
        Ok(product)
    }

    /// Deletes a product and returns the removed record.
    pub async fn delete(&self, id: i64) -> StoreResult<Product> {
        let _guard = self.store.lock().await;
        let mut products = self.store.load_products().await?;

        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::ProductNotFound(id))?;
        let removed = products.remove(index);

        self.store.save_products(&products).await?;
        info!(id, "Product deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{product_input, store};
    use inventa_core::{ErrorKind, Money};

    #[tokio::test]
    async fn test_crud_cycle() {
        let (_dir, store) = store().await;
        let repo = store.products();

        let p = repo.create(product_input("Martillo", 1000, 600, 5)).await.unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(repo.get(1).await.unwrap().price, Money::from_cents(1000));

        let updated = repo
            .update(1, product_input("Martillo", 1200, 600, 8))
            .await
            .unwrap();
        assert_eq!(updated.stock, 8);
        assert_eq!(repo.list().await.unwrap(), vec![updated.clone()]);

        assert_eq!(repo.delete(1).await.unwrap(), updated);
        assert_eq!(repo.get(1).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_no_uniqueness_on_names() {
        let (_dir, store) = store().await;
        let repo = store.products();

        repo.create(product_input("Clavos", 100, 50, 1)).await.unwrap();
        let second = repo.create(product_input("Clavos", 100, 50, 1)).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_reads_decimal_file_written_by_hand() {
        let (dir, store) = store().await;
        std::fs::write(
            dir.path().join("productos.json"),
            r#"[{"id": 3, "nombre": "Sierra", "precio": 15.5, "stock": 2,
                 "costo": 9.99, "categoria": "Herramientas"}]"#,
        )
        .unwrap();

        let p = store.products().get(3).await.unwrap();
        assert_eq!(p.price, Money::from_cents(1550));
        assert_eq!(p.cost, Money::from_cents(999));
    }

    #[tokio::test]
    async fn test_refuses_amounts_finer_than_four_decimals() {
        let (dir, store) = store().await;
        let path = dir.path().join("productos.json");
        let raw = r#"[{"id": 1, "nombre": "Clavo", "precio": 0.00125, "stock": 2,
                       "costo": 0, "categoria": "Fijaciones"}]"#;
        std::fs::write(&path, raw).unwrap();

        let err = store.products().list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), raw);
    }
}
