//! `/reportes/flujo_caja`

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use inventa_core::{CashFlowQuery, CashFlowReport};

use crate::error::ApiResult;
use crate::extract::QueryParams;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/reportes/flujo_caja", get(cash_flow))
}

/// `GET /reportes/flujo_caja?desde=...&hasta=...`
async fn cash_flow(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<CashFlowQuery>,
) -> ApiResult<Json<CashFlowReport>> {
    let report = state.store.reports().cash_flow(&query.from, &query.to).await?;
    Ok(Json(report))
}
