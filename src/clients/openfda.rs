use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::OpenFdaConfig;
use crate::constants::openfda::LABEL_ENDPOINT;

#[derive(Debug, Default, Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<LabelResult>,
}

/// One drug label. Only the harmonized `openfda` block is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelResult {
    #[serde(default)]
    pub openfda: OpenFdaFields,
}

/// Multi-valued identity fields. Absent fields deserialize to `None` so
/// callers can tell "missing" apart from "present but empty".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenFdaFields {
    pub brand_name: Option<Vec<String>>,
    pub generic_name: Option<Vec<String>>,
    pub product_ndc: Option<Vec<String>>,
    pub manufacturer_name: Option<Vec<String>>,
}

/// A structured label search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelQuery {
    /// Brand name or generic name equals the term.
    BrandOrGeneric(String),
    /// Generic name equals the term.
    Generic(String),
}

impl LabelQuery {
    #[must_use]
    pub fn to_search_expression(&self) -> String {
        match self {
            Self::BrandOrGeneric(term) => {
                let term = escape_query_value(term);
                format!("openfda.brand_name:\"{term}\" OR openfda.generic_name:\"{term}\"")
            }
            Self::Generic(term) => {
                format!("openfda.generic_name:\"{}\"", escape_query_value(term))
            }
        }
    }
}

fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Source of drug label search results.
///
/// A non-success upstream status is reported as an empty result set, not an
/// error; only transport and decoding failures are errors.
#[async_trait]
pub trait DrugLabelSource: Send + Sync {
    async fn search(&self, query: &LabelQuery, limit: u32) -> Result<Vec<LabelResult>>;
}

#[derive(Clone)]
pub struct OpenFdaClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenFdaClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &OpenFdaConfig) -> Self {
        let api_key = Some(config.api_key.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn label_url(&self) -> String {
        format!("{}{}", self.base_url, LABEL_ENDPOINT)
    }
}

#[async_trait]
impl DrugLabelSource for OpenFdaClient {
    async fn search(&self, query: &LabelQuery, limit: u32) -> Result<Vec<LabelResult>> {
        let search = query.to_search_expression();
        let limit = limit.to_string();

        let mut params: Vec<(&str, &str)> =
            vec![("search", search.as_str()), ("limit", limit.as_str())];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.as_str()));
        }

        let response = match self.client.get(self.label_url()).query(&params).send().await {
            Ok(r) => r,
            Err(e) => {
                metrics::counter!("upstream_requests_total", "outcome" => "error").increment(1);
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::counter!("upstream_requests_total", "outcome" => "no_results").increment(1);
            if status == reqwest::StatusCode::NOT_FOUND {
                debug!(search = %search, "openFDA returned no matches");
            } else {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "openFDA returned an error status");
            }
            return Ok(vec![]);
        }

        let body: LabelResponse = response.json().await?;
        metrics::counter!("upstream_requests_total", "outcome" => "ok").increment(1);

        Ok(body.results)
    }
}

/// Joins a multi-valued field the way it is stored and displayed.
#[must_use]
pub fn join_values(values: &[String]) -> String {
    values.join(", ")
}
