//! # Inventa API
//!
//! HTTP surface of the inventory backend. Handlers decode and validate input,
//! call an `inventa-store` repository and map errors to status codes.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Request Flow                                     │
//! │                                                                         │
//! │  Client ──► TraceLayer ──► Router ──► Handler                           │
//! │                                          │                              │
//! │                              input.validate()  (400 on failure)         │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                              store.<repo>().<op>().await                │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                              Json / (201, Json) / ApiError              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Routes
//! | Method | Path |
//! |---|---|
//! | GET, POST | `/empresas` |
//! | GET, PUT, DELETE | `/empresas/{id}` |
//! | GET, POST | `/productos` |
//! | GET, PUT, DELETE | `/productos/{id}` |
//! | POST | `/productos/importar_excel` (multipart `.xlsx` or JSON workbook) |
//! | GET, POST | `/ventas` |
//! | POST | `/ventas/compra` |
//! | GET | `/ventas/empresas/{id}/historial` |
//! | GET | `/reportes/flujo_caja` |
//! | GET | `/health` |
//!
//! Collection paths also answer with a trailing slash.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod upload;

use std::sync::Arc;

use inventa_store::Store;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(store: Store, config: ApiConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }
}
