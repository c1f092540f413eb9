use std::sync::Arc;

use crate::clients::openfda::{DrugLabelSource, OpenFdaClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AlternativesService, DrugResolver, PricingService, QuoteSource, SyntheticQuoteSource,
};

/// Build a shared HTTP client for upstream calls.
/// Reused across requests so connections are pooled.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("drug-pricing/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub resolver: Arc<DrugResolver>,

    pub pricing: Arc<PricingService>,

    pub alternatives: Arc<AlternativesService>,
}

impl SharedState {
    /// Connects the store and wires the openFDA client and the synthetic
    /// quote source.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client = build_shared_http_client(config.openfda.request_timeout_seconds)?;
        let openfda = Arc::new(OpenFdaClient::with_shared_client(
            http_client,
            &config.openfda,
        ));

        Ok(Self::with_sources(
            config,
            store,
            openfda,
            Arc::new(SyntheticQuoteSource),
        ))
    }

    #[must_use]
    pub fn with_sources(
        config: Config,
        store: Store,
        label_source: Arc<dyn DrugLabelSource>,
        quote_source: Arc<dyn QuoteSource>,
    ) -> Self {
        let resolver = Arc::new(DrugResolver::new(
            store.clone(),
            label_source.clone(),
            config.drugs.name_match,
        ));

        let pricing = Arc::new(PricingService::new(
            store.clone(),
            quote_source,
            config.pricing.cache_ttl_hours,
        ));

        let alternatives = Arc::new(AlternativesService::new(
            label_source,
            config.openfda.alternatives_limit,
        ));

        Self {
            config: Arc::new(config),
            store,
            resolver,
            pricing,
            alternatives,
        }
    }
}
