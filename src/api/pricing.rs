use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use super::validation::validate_pricing_request;
use super::{ApiError, AppState, LookupResponse, PricingDto, PricingRequest};

/// `POST /api/get-pricing`
///
/// Cached and freshly generated quotes have the same shape.
pub async fn get_pricing(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<LookupResponse<PricingDto>>, ApiError> {
    let Json(request) = payload?;
    let (drug_name, zip_code) =
        validate_pricing_request(request.drug_name.as_deref(), request.zip_code.as_deref())?;

    let result = state
        .pricing()
        .get_pricing(drug_name, zip_code)
        .await
        .map(|pricing| PricingDto { pricing });

    Ok(Json(result.into()))
}
