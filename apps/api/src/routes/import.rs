//! `POST /productos/importar_excel`
//!
//! Two body shapes are accepted:
//!
//! - `multipart/form-data` with the spreadsheet in the `file` field, decoded
//!   by [`crate::upload`];
//! - JSON carrying the original file name and the workbook already decoded
//!   into sheets of typed cells:
//!
//! ```json
//! {
//!   "filename": "catalogo.xlsx",
//!   "workbook": {
//!     "sheets": [
//!       {"name": "productos", "rows": [
//!         ["nombre", "categoria", "precio"],
//!         ["Clavos", "Fijaciones", 1.5]
//!       ]}
//!     ]
//!   }
//! }
//! ```

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use inventa_core::import::ImportUpload;
use inventa_core::ImportSummary;

use super::route_both;
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::upload::read_multipart;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    route_both(Router::new(), "/productos/importar_excel", post(import_products))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

async fn import_products(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<ImportSummary>> {
    let upload = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state).await?;
        read_multipart(multipart).await?
    } else {
        let JsonBody(upload) = JsonBody::<ImportUpload>::from_request(request, &state).await?;
        upload
    };

    let summary = state
        .store
        .imports()
        .import_products(&upload.filename, &upload.workbook, state.config.import_error_limit)
        .await?;
    Ok(Json(summary))
}
