//! `/empresas` CRUD.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use inventa_core::{Company, CompanyInput};

use super::route_both;
use crate::error::ApiResult;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    let router = route_both(
        Router::new(),
        "/empresas",
        get(list_companies).post(create_company),
    );
    router.route(
        "/empresas/{id}",
        get(get_company).put(update_company).delete(delete_company),
    )
}

async fn list_companies(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    Ok(Json(state.store.companies().list().await?))
}

async fn get_company(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Json<Company>> {
    Ok(Json(state.store.companies().get(id).await?))
}

async fn create_company(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CompanyInput>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    input.validate()?;
    let company = state.store.companies().create(input).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

async fn update_company(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(input): JsonBody<CompanyInput>,
) -> ApiResult<Json<Company>> {
    input.validate()?;
    Ok(Json(state.store.companies().update(id, input).await?))
}

async fn delete_company(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Json<Company>> {
    Ok(Json(state.store.companies().delete(id).await?))
}
