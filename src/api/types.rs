use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Alternative, DrugRecord, PricingQuote};

/// Body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Outcome of a lookup. Lookup failures are answered with `200 OK` and an
/// `error` field rather than an error status.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LookupResponse<T> {
    Found(T),
    Failed(ErrorResponse),
}

impl<T, E: fmt::Display> From<Result<T, E>> for LookupResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Found(value),
            Err(e) => Self::Failed(ErrorResponse::new(e.to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DrugNameRequest {
    #[serde(default)]
    pub drug_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PricingRequest {
    #[serde(default)]
    pub drug_name: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DrugDto {
    pub name: String,
    pub generic_name: String,
    pub brand_name: String,
    pub ndc: String,
    pub manufacturer: String,
}

impl From<DrugRecord> for DrugDto {
    fn from(record: DrugRecord) -> Self {
        Self {
            name: record.name,
            generic_name: record.generic_name,
            brand_name: record.brand_name,
            ndc: record.ndc,
            manufacturer: record.manufacturer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PricingDto {
    pub pricing: Vec<PricingQuote>,
}

#[derive(Debug, Serialize)]
pub struct AlternativesDto {
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
