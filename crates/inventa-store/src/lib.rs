//! # inventa-store: Flat-File Storage for Inventa
//!
//! This crate owns the JSON data files. Every operation loads the full
//! snapshot, lets inventa-core plan the change, and rewrites the file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventa Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /ventas/compra)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   inventa-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │   │
//! │  │   │    Store      │    │  Repositories │    │    file      │    │   │
//! │  │   │  (store.rs)   │    │               │    │              │    │   │
//! │  │   │               │    │ CompanyRepo   │    │ load_json    │    │   │
//! │  │   │ Mutex<()>     │◄───│ ProductRepo   │───►│ save_json    │    │   │
//! │  │   │ StoreConfig   │    │ SaleRepo      │    │ .bak reset   │    │   │
//! │  │   │               │    │ Report/Import │    │              │    │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   data/empresas.json   data/productos.json   data/ventas.json   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Store handle, configuration, lock, two-file commits
//! - [`file`] - JSON load/save with corruption recovery
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventa_store::{Store, StoreConfig};
//!
//! let store = Store::open(StoreConfig::new("./data")).await?;
//!
//! let products = store.products().list().await?;
//! let report = store.reports().cash_flow("2026-01-01", "2026-01-31").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::company::CompanyRepository;
pub use repository::import::ImportRepository;
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
