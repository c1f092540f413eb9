use serde::{Deserialize, Serialize};

use crate::entities::drugs;

/// Identity of a drug as resolved from the label database.
///
/// Multi-valued fields are stored as `", "`-joined strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugRecord {
    pub name: String,
    pub generic_name: String,
    pub brand_name: String,
    pub ndc: String,
    pub manufacturer: String,
    pub created_at: String,
}

impl From<drugs::Model> for DrugRecord {
    fn from(model: drugs::Model) -> Self {
        Self {
            name: model.name,
            generic_name: model.generic_name,
            brand_name: model.brand_name,
            ndc: model.ndc,
            manufacturer: model.manufacturer,
            created_at: model.created_at,
        }
    }
}

/// A generic drug suggested in place of the requested one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    /// Percentage, one decimal place.
    pub estimated_savings: f64,
    pub availability: String,
}
