use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

mod drugs;
mod error;
mod observability;
mod pricing;
mod system;
mod types;
pub mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{AlternativesService, DrugResolver, PricingService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn resolver(&self) -> &Arc<DrugResolver> {
        &self.shared.resolver
    }

    #[must_use]
    pub fn pricing(&self) -> &Arc<PricingService> {
        &self.shared.pricing
    }

    #[must_use]
    pub fn alternatives(&self) -> &Arc<AlternativesService> {
        &self.shared.alternatives
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = &state.config().server.cors_allowed_origins;

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/search-drug", post(drugs::search_drug))
        .route("/get-pricing", post(pricing::get_pricing))
        .route("/get-alternatives", post(drugs::get_alternatives))
        .route("/health", get(system::health))
        .route("/metrics", get(system::get_metrics))
        .route_layer(middleware::from_fn(observability::track_requests))
        .with_state(state);

    Router::new()
        .nest("/api", api_router)
        .fallback(system::not_found)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
