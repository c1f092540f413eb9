//! Drug identity and generic alternative endpoints.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;

use super::validation::validate_drug_name;
use super::{AlternativesDto, ApiError, AppState, DrugDto, DrugNameRequest, LookupResponse};

/// `POST /api/search-drug`
pub async fn search_drug(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DrugNameRequest>, JsonRejection>,
) -> Result<Json<LookupResponse<DrugDto>>, ApiError> {
    let Json(request) = payload?;
    let drug_name = validate_drug_name(request.drug_name.as_deref())?;

    let result = state
        .resolver()
        .resolve(drug_name)
        .await
        .map(DrugDto::from);

    Ok(Json(result.into()))
}

/// `POST /api/get-alternatives`
pub async fn get_alternatives(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DrugNameRequest>, JsonRejection>,
) -> Result<Json<LookupResponse<AlternativesDto>>, ApiError> {
    let Json(request) = payload?;
    let drug_name = validate_drug_name(request.drug_name.as_deref())?;

    let result = state
        .alternatives()
        .find_alternatives(drug_name)
        .await
        .map(|alternatives| AlternativesDto { alternatives });

    Ok(Json(result.into()))
}
