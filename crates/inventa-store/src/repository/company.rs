//! # Company Repository
//!
//! CRUD over `empresas.json`.
//!
//! Ids are correlative (max + 1) and the tax id (`rut`) must be unique when a
//! company is created. Updates replace every field but the id and do not
//! re-check uniqueness.

use inventa_core::{next_id, Company, CompanyInput, CoreError};
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::store::Store;

/// Repository for company operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    store: Store,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(store: Store) -> Self {
        CompanyRepository { store }
    }

    /// Lists every company in file order.
    pub async fn list(&self) -> StoreResult<Vec<Company>> {
        let _guard = self.store.lock().await;
        let companies = self.store.load_companies().await?;
        debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }

    /// Gets a company by id.
    ///
    /// ## Returns
    /// * `Ok(Company)` - Company found
    /// * `Err(CompanyNotFound)` - No company with that id
    pub async fn get(&self, id: i64) -> StoreResult<Company> {
        let _guard = self.store.lock().await;
        debug!(id, "Getting company");
        let companies = self.store.load_companies().await?;
        companies
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CoreError::CompanyNotFound(id).into())
    }

    /// Creates a company under the next correlative id.
    ///
    /// Fails with `DuplicateTaxId` when another company has the same `rut`.
    pub async fn create(&self, input: CompanyInput) -> StoreResult<Company> {
        let _guard = self.store.lock().await;
        let mut companies = self.store.load_companies().await?;

        if companies.iter().any(|c| c.tax_id == input.tax_id) {
            return Err(CoreError::DuplicateTaxId(input.tax_id).into());
        }

        let company = input.into_company(next_id(companies.iter().map(|c| c.id)));
        companies.push(company.clone());
        self.store.save_companies(&companies).await?;

        info!(id = company.id, rut = %company.tax_id, "Company created");
        Ok(company)
    }

    /// Replaces every field of a company except its id.
    pub async fn update(&self, id: i64, input: CompanyInput) -> StoreResult<Company> {
        let _guard = self.store.lock().await;
        let mut companies = self.store.load_companies().await?;

        let slot = companies
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(CoreError::CompanyNotFound(id))?;
        *slot = input.into_company(id);
        let company = slot.clone();

        self.store.save_companies(&companies).await?;
        info!(id, "Company updated");
        Ok(company)
    }

    /// Deletes a company and returns the removed record.
    ///
    /// Sales referencing the company are left as they are.
    pub async fn delete(&self, id: i64) -> StoreResult<Company> {
        let _guard = self.store.lock().await;
        let mut companies = self.store.load_companies().await?;

        let index = companies
            .iter()
            .position(|c| c.id == id)
            .ok_or(CoreError::CompanyNotFound(id))?;
        let removed = companies.remove(index);

        self.store.save_companies(&companies).await?;
        info!(id, "Company deleted");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{company_input, store};
    use inventa_core::ErrorKind;

    #[tokio::test]
    async fn test_crud_cycle() {
        let (_dir, store) = store().await;
        let repo = store.companies();

        assert!(repo.list().await.unwrap().is_empty());

        let a = repo.create(company_input("Acme", "1-9")).await.unwrap();
        let b = repo.create(company_input("Beta", "2-7")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let mut changed = company_input("Acme Ltda", "1-9");
        changed.email = Some("contacto@acme.cl".to_string());
        let updated = repo.update(1, changed).await.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(updated.name, "Acme Ltda");
        assert_eq!(repo.get(1).await.unwrap(), updated);

        let removed = repo.delete(1).await.unwrap();
        assert_eq!(removed.name, "Acme Ltda");
        assert_eq!(repo.list().await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn test_duplicate_tax_id_is_a_conflict() {
        let (_dir, store) = store().await;
        let repo = store.companies();

        repo.create(company_input("Acme", "1-9")).await.unwrap();
        let err = repo.create(company_input("Otra", "1-9")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ids_follow_the_max() {
        let (_dir, store) = store().await;
        let repo = store.companies();

        repo.create(company_input("A", "1")).await.unwrap();
        repo.create(company_input("B", "2")).await.unwrap();
        repo.create(company_input("C", "3")).await.unwrap();
        repo.delete(2).await.unwrap();

        let d = repo.create(company_input("D", "4")).await.unwrap();
        assert_eq!(d.id, 4);
    }

    #[tokio::test]
    async fn test_missing_company_is_not_found() {
        let (_dir, store) = store().await;
        let repo = store.companies();

        assert_eq!(repo.get(5).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            repo.update(5, company_input("X", "9")).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(repo.delete(5).await.unwrap_err().kind(), ErrorKind::NotFound);
    }
}
