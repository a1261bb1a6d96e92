//! # inventa-core: Pure Business Logic for Inventa
//!
//! This crate is the **heart** of Inventa. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Inventa Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /empresas  /productos  /ventas  /reportes  /health           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 inventa-store (JSON files)                      │   │
//! │  │    load snapshot ──► plan (here) ──► commit ──► save snapshot   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ inventa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  sales  │ │ report  │ │ import  │  │   │
//! │  │   │ Company │ │  Money  │ │SalePlan │ │cash_flow│ │Workbook │  │   │
//! │  │   │ Product │ │timestamp│ │Purchase │ │         │ │ upsert  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Product, Sale, requests, responses)
//! - [`money`] - Money type with integer arithmetic
//! - [`timestamp`] - Naive/aware ISO-8601 timestamps
//! - [`error`] - Domain error types and their classification
//! - [`validation`] - Boundary validation rules
//! - [`sales`] - Sale and purchase planning, listing, history
//! - [`report`] - Cash-flow aggregation
//! - [`import`] - Spreadsheet row mapping and product upsert
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: callers pass snapshots (and "now") in, get results out
//! 2. **No I/O**: file system and network access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are i64 ten-thousandths with checked arithmetic
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use inventa_core::sales::PurchasePlan;
//! use inventa_core::timestamp::Timestamp;
//! use inventa_core::{Company, Money, Product, PurchaseItem, PurchaseRequest};
//!
//! let companies = vec![Company {
//!     id: 1,
//!     name: "Ferretería Sur".into(),
//!     tax_id: "76.123.456-7".into(),
//!     sector: None,
//!     phone: None,
//!     email: None,
//!     address: None,
//! }];
//! let mut products = vec![Product {
//!     id: 1,
//!     name: "Martillo".into(),
//!     price: Money::from_cents(1000),
//!     stock: 5,
//!     cost: Money::from_cents(600),
//!     category: "Herramientas".into(),
//! }];
//! let mut sales = Vec::new();
//!
//! let request = PurchaseRequest {
//!     company_id: 1,
//!     items: vec![PurchaseItem { product_id: 1, quantity: 3 }],
//!     date: None,
//! };
//! let now = Timestamp::parse("2026-01-10T09:00:00").unwrap();
//! let plan = PurchasePlan::validate(&request, &companies, &products, now).unwrap();
//! let receipt = plan.commit(&mut products, &mut sales);
//!
//! assert_eq!(receipt.total, Money::from_cents(3000));
//! assert_eq!(receipt.total_items, 3);
//! assert_eq!(products[0].stock, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod import;
pub mod money;
pub mod report;
pub mod sales;
pub mod timestamp;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use inventa_core::Money` instead of
// `use inventa_core::money::Money`

pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use timestamp::Timestamp;
pub use types::*;
