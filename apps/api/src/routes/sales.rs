//! `/ventas`: listing, single sales, purchases and per-company history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use inventa_core::{PurchaseReceipt, PurchaseRequest, Sale, SaleFilter, SaleRequest};

use super::route_both;
use crate::error::ApiResult;
use crate::extract::{JsonBody, PathParams, QueryParams};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    let router = route_both(Router::new(), "/ventas", get(list_sales).post(create_sale));
    let router = route_both(router, "/ventas/compra", post(create_purchase));
    router.route("/ventas/empresas/{id}/historial", get(company_history))
}

/// `GET /ventas?empresa_id&producto_id&desde&hasta`
async fn list_sales(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<SaleFilter>,
) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.store.sales().list(&filter).await?))
}

async fn create_sale(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<SaleRequest>,
) -> ApiResult<(StatusCode, Json<Sale>)> {
    let sale = state.store.sales().create(request).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

async fn create_purchase(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PurchaseRequest>,
) -> ApiResult<(StatusCode, Json<PurchaseReceipt>)> {
    let receipt = state.store.sales().create_purchase(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

async fn company_history(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Json<Vec<Sale>>> {
    Ok(Json(state.store.sales().history(id).await?))
}

// =============================================================================
// Unit Tests
// =============================================================================
