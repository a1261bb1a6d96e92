//! `/productos` CRUD.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use inventa_core::{Product, ProductInput};

use super::route_both;
use crate::error::ApiResult;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    let router = route_both(
        Router::new(),
        "/productos",
        get(list_products).post(create_product),
    );
    router.route(
        "/productos/{id}",
        get(get_product).put(update_product).delete(delete_product),
    )
}

async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.store.products().list().await?))
}

async fn get_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().get(id).await?))
}

async fn create_product(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    input.validate()?;
    let product = state.store.products().create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
    JsonBody(input): JsonBody<ProductInput>,
) -> ApiResult<Json<Product>> {
    input.validate()?;
    Ok(Json(state.store.products().update(id, input).await?))
}

async fn delete_product(
    State(state): State<AppState>,
    PathParams(id): PathParams<i64>,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.products().delete(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, get, post, send};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    fn martillo() -> serde_json::Value {
        json!({
            "nombre": "Martillo",
            "precio": 10.5,
            "stock": 5,
            "costo": 6,
            "categoria": "Herramientas"
        })
    }

    #[tokio::test]
    async fn test_create_and_read_back_decimal_money() {
        let (_dir, app, store) = app().await;

        let (status, body) = post(&app, "/productos", martillo()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["precio"], 10.5);
        assert_eq!(store.products().get(1).await.unwrap().price.to_decimal(), 10.5);

        let (status, body) = get(&app, "/productos/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_amounts_keep_four_decimals_and_reject_a_fifth() {
        let (_dir, app, store) = app().await;
        let mut clavo = martillo();
        clavo["precio"] = json!(0.125);
        clavo["costo"] = json!(0.004);

        let (status, body) = post(&app, "/productos", clavo.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["precio"], 0.125);
        assert_eq!(body["costo"], 0.004);

        clavo["precio"] = json!(0.00001);
        let (status, body) = post(&app, "/productos", clavo).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_ARGUMENT");
        assert_eq!(store.products().list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_dir, app, _store) = app().await;
        post(&app, "/productos", martillo()).await;

        let mut changed = martillo();
        changed["stock"] = json!(9);
        let (status, body) = send(&app, Method::PUT, "/productos/1", Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stock"], 9);

        let (status, _) = send(&app, Method::DELETE, "/productos/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, "/productos/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_negative_values_rejected() {
        let (_dir, app, _store) = app().await;

        let mut bad = martillo();
        bad["stock"] = json!(-1);
        let (status, body) = post(&app, "/productos", bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "stock must not be negative");

        let mut bad = martillo();
        bad["precio"] = json!(-0.5);
        let (status, _) = post(&app, "/productos", bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let (_dir, app, _store) = app().await;
        let (status, _) = send(&app, Method::PUT, "/productos/4", Some(martillo())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
