//! Drug identity resolution with a persistent cache in front of openFDA.

use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::clients::openfda::{DrugLabelSource, LabelQuery, OpenFdaFields, join_values};
use crate::config::NameMatch;
use crate::db::{Store, format_timestamp};
use crate::models::DrugRecord;

/// Both variants are reported to API callers the same way, as an `error`
/// message on a successful response.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Drug not found")]
    NotFound,

    #[error("Error searching drug: {0}")]
    Search(String),
}

impl From<anyhow::Error> for ResolveError {
    fn from(err: anyhow::Error) -> Self {
        Self::Search(format!("{err:#}"))
    }
}

pub struct DrugResolver {
    store: Store,
    source: Arc<dyn DrugLabelSource>,
    name_match: NameMatch,
}

impl DrugResolver {
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn DrugLabelSource>, name_match: NameMatch) -> Self {
        Self {
            store,
            source,
            name_match,
        }
    }

    /// Returns the stored record for `name` if one matches, otherwise looks the
    /// name up upstream and stores the result. A stored record is never
    /// refreshed.
    pub async fn resolve(&self, name: &str) -> Result<DrugRecord, ResolveError> {
        if let Some(record) = self.store.find_drug(name, self.name_match).await? {
            metrics::counter!("drug_cache_hits_total").increment(1);
            debug!(drug = %name, matched = %record.name, "Drug cache hit");
            return Ok(record);
        }

        metrics::counter!("drug_cache_misses_total").increment(1);
        debug!(drug = %name, "Drug cache miss, querying openFDA");

        let results = self
            .source
            .search(&LabelQuery::BrandOrGeneric(name.to_string()), 1)
            .await
            .inspect_err(|e| warn!(drug = %name, "openFDA label search failed: {e:#}"))?;

        let Some(label) = results.into_iter().next() else {
            return Err(ResolveError::NotFound);
        };

        let record = record_from_label(name, &label.openfda, &format_timestamp(Utc::now()));
        self.store.save_drug(&record).await?;

        Ok(record)
    }
}

/// Builds a record keyed on the caller's `name`. Missing generic or brand
/// fields fall back to `name`; a present but empty list stays empty.
fn record_from_label(name: &str, fields: &OpenFdaFields, created_at: &str) -> DrugRecord {
    let joined_or_name = |values: &Option<Vec<String>>| {
        values
            .as_deref()
            .map_or_else(|| name.to_string(), join_values)
    };

    DrugRecord {
        name: name.to_string(),
        generic_name: joined_or_name(&fields.generic_name),
        brand_name: joined_or_name(&fields.brand_name),
        ndc: fields.product_ndc.as_deref().map(join_values).unwrap_or_default(),
        manufacturer: fields
            .manufacturer_name
            .as_deref()
            .map(join_values)
            .unwrap_or_default(),
        created_at: created_at.to_string(),
    }
}
