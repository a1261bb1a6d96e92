//! # Store Handle
//!
//! Data directory configuration, the process-wide lock, and typed access to
//! the three collections.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store Handle                                    │
//! │                                                                         │
//! │  Server Startup                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(data_dir) ← Configure file names                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::open(config).await ← Create data dir                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │  Arc<Mutex<()>>  (one per process)      │                            │
//! │  │                                         │                            │
//! │  │  empresas.json  productos.json          │                            │
//! │  │  ventas.json                            │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       │ Every repository call takes the lock, reads included:           │
//! │       │ a load can reset a corrupted file.                              │
//! │       ▼                                                                 │
//! │  Request 1 ──► lock ──► load ──► plan ──► save ──► unlock               │
//! │  Request 2 ──► waits ─────────────────────────────► lock ...            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two-File Commits
//! Sales and stock live in different files. A commit writes `ventas.json`
//! first, then `productos.json`. If the second write fails the previous sales
//! snapshot is written back; if that fails too the caller gets
//! [`StoreError::PartialCommit`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use inventa_core::{Company, Product, Sale, Timestamp};
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};

use crate::error::{StoreError, StoreResult};
use crate::file::{load_json, save_json};
use crate::repository::company::CompanyRepository;
use crate::repository::import::ImportRepository;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use inventa_store::StoreConfig;
///
/// let config = StoreConfig::new("./data").sales_file("ventas_2026.json");
/// assert!(config.sales_path().ends_with("ventas_2026.json"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding the data files. Created on open.
    pub data_dir: PathBuf,

    /// Default: `empresas.json`
    pub companies_file: String,

    /// Default: `productos.json`
    pub products_file: String,

    /// Default: `ventas.json`
    pub sales_file: String,
}

impl StoreConfig {
    /// Creates a configuration rooted at `data_dir` with the standard file names.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        StoreConfig {
            data_dir: data_dir.into(),
            companies_file: "empresas.json".to_string(),
            products_file: "productos.json".to_string(),
            sales_file: "ventas.json".to_string(),
        }
    }

    /// Sets the companies file name.
    pub fn companies_file(mut self, name: impl Into<String>) -> Self {
        self.companies_file = name.into();
        self
    }

    /// Sets the products file name.
    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.products_file = name.into();
        self
    }

    /// Sets the sales file name.
    pub fn sales_file(mut self, name: impl Into<String>) -> Self {
        self.sales_file = name.into();
        self
    }

    pub fn companies_path(&self) -> PathBuf {
        self.data_dir.join(&self.companies_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.sales_file)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Main store handle providing repository access.
///
/// Cheap to clone; all clones share one lock.
///
/// ## Usage
/// ```rust,ignore
/// let store = Store::open(StoreConfig::new("./data")).await?;
///
/// let companies = store.companies().list().await?;
/// let receipt = store.sales().create_purchase(request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    config: Arc<StoreConfig>,
    lock: Arc<Mutex<()>>,
}

impl Store {
    /// Opens the store, creating the data directory if needed.
    ///
    /// Data files themselves are created lazily on first access.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(data_dir = %config.data_dir.display(), "Opening data store");

        fs::create_dir_all(&config.data_dir)
            .await
            .map_err(|e| StoreError::io(&config.data_dir, e))?;

        Ok(Store {
            config: Arc::new(config),
            lock: Arc::new(Mutex::new(())),
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the company repository.
    pub fn companies(&self) -> CompanyRepository {
        CompanyRepository::new(self.clone())
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.clone())
    }

    /// Returns the report repository.
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.clone())
    }

    /// Returns the import repository.
    pub fn imports(&self) -> ImportRepository {
        ImportRepository::new(self.clone())
    }

    /// Checks that the data directory exists and accepts writes.
    ///
    /// ## Returns
    /// * `true` - a probe file could be written and removed
    /// * `false` - the directory is missing or read-only
    pub async fn health_check(&self) -> bool {
        let _guard = self.lock().await;
        let probe = self.config.data_dir.join(".health");
        let written = fs::write(&probe, b"ok").await.is_ok();
        let removed = fs::remove_file(&probe).await.is_ok();
        written && removed
    }

    // ===== Crate-internal access =====

    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// Server-assigned timestamp for new sales: UTC wall clock, no offset.
    pub(crate) fn now(&self) -> Timestamp {
        Timestamp::naive_utc(Utc::now())
    }

    pub(crate) async fn load_companies(&self) -> StoreResult<Vec<Company>> {
        load_json(&self.config.companies_path(), Vec::new()).await
    }

    pub(crate) async fn save_companies(&self, companies: &[Company]) -> StoreResult<()> {
        save_json(&self.config.companies_path(), companies).await
    }

    pub(crate) async fn load_products(&self) -> StoreResult<Vec<Product>> {
        load_json(&self.config.products_path(), Vec::new()).await
    }

    pub(crate) async fn save_products(&self, products: &[Product]) -> StoreResult<()> {
        save_json(&self.config.products_path(), products).await
    }

    pub(crate) async fn load_sales(&self) -> StoreResult<Vec<Sale>> {
        load_json(&self.config.sales_path(), Vec::new()).await
    }

    /// Writes new sales and updated stock as one logical commit.
    pub(crate) async fn commit_sales_and_products(
        &self,
        previous_sales: &[Sale],
        sales: &[Sale],
        products: &[Product],
    ) -> StoreResult<()> {
        commit_pair(
            &self.config.sales_path(),
            previous_sales,
            sales,
            &self.config.products_path(),
            products,
        )
        .await
    }
}

/// Sales first, products second, sales restored if products fail.
async fn commit_pair(
    sales_path: &Path,
    previous_sales: &[Sale],
    sales: &[Sale],
    products_path: &Path,
    products: &[Product],
) -> StoreResult<()> {
    save_json(sales_path, sales).await?;

    let Err(commit_err) = save_json(products_path, products).await else {
        debug!(sales = sales.len(), products = products.len(), "Committed sales and stock");
        return Ok(());
    };

    error!(error = %commit_err, "Stock write failed, restoring previous sales");
    match save_json(sales_path, previous_sales).await {
        Ok(()) => Err(commit_err),
        Err(rollback_err) => {
            error!(error = %rollback_err, "Restoring previous sales failed");
            Err(StoreError::PartialCommit {
                sales_path: sales_path.to_path_buf(),
                commit: commit_err.to_string(),
                rollback: rollback_err.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
