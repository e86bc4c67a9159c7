//! Checkout API endpoint.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::ApiResult;
use crate::checkout::initiate_checkout;
use crate::errors::AppError;
use crate::AppState;

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

/// POST /api/checkout/{clientSlug} - Create a hosted payment session for a cart.
pub async fn create_checkout(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<CheckoutResponse> {
    let Json(body) = body.map_err(|e| {
        tracing::debug!("Rejected checkout body: {}", e);
        AppError::BadRequest("Invalid request body".to_string())
    })?;

    let url = initiate_checkout(&state.repo, &state.http, &state.config, &slug, &body).await?;
    Ok(Json(CheckoutResponse { url }))
}
