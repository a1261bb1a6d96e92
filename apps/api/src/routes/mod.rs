//! Route table.

pub mod companies;
pub mod health;
pub mod import;
pub mod products;
pub mod reports;
pub mod sales;

use axum::routing::MethodRouter;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Builds the application router with tracing and CORS layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(companies::routes())
        .merge(products::routes())
        .merge(import::routes())
        .merge(sales::routes())
        .merge(reports::routes())
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Registers `path` and `path/` with the same handlers.
pub(crate) fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

// =============================================================================
// Test Support
// =============================================================================
