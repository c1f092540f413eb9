//! Plan and pharmacy price quotes with a time-bounded cache.
//!
//! Quotes come from a [`QuoteSource`]. The only implementation today is
//! [`SyntheticQuoteSource`], which produces randomized figures in place of a
//! real pricing feed.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tracing::debug;

use crate::constants::pricing::{BASE_COST_MAX, BASE_COST_MIN, MULTIPLIER_MAX, MULTIPLIER_MIN};
use crate::db::Store;
use crate::entities::pricing_cache;
use crate::models::{PharmacyType, PlanType, PricingQuote};

#[derive(Debug, Error)]
#[error("Error getting pricing: {0}")]
pub struct PricingError(pub String);

impl From<anyhow::Error> for PricingError {
    fn from(err: anyhow::Error) -> Self {
        Self(format!("{err:#}"))
    }
}

/// Produces fresh quotes for a drug in a postal area.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn quotes(&self, drug_name: &str, zip_code: &str) -> anyhow::Result<Vec<PricingQuote>>;
}

/// One quote per plan/pharmacy combination, all scattered around a single
/// random base cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticQuoteSource;

#[async_trait]
impl QuoteSource for SyntheticQuoteSource {
    async fn quotes(&self, _drug_name: &str, _zip_code: &str) -> anyhow::Result<Vec<PricingQuote>> {
        Ok(generate_quotes(&mut rand::rng()))
    }
}

pub fn generate_quotes<R: Rng>(rng: &mut R) -> Vec<PricingQuote> {
    let base_cost = rng.random_range(BASE_COST_MIN..BASE_COST_MAX);

    PlanType::ALL
        .into_iter()
        .flat_map(|plan| PharmacyType::ALL.into_iter().map(move |pharmacy| (plan, pharmacy)))
        .map(|(plan, pharmacy)| {
            let multiplier = rng.random_range(MULTIPLIER_MIN..MULTIPLIER_MAX);
            PricingQuote::new(plan, pharmacy, base_cost * multiplier)
        })
        .collect()
}

type KeyLocks = HashMap<(String, String), Arc<tokio::sync::Mutex<()>>>;

pub struct PricingService {
    store: Store,
    source: Arc<dyn QuoteSource>,
    ttl: chrono::Duration,
    key_locks: Mutex<KeyLocks>,
}

impl PricingService {
    #[must_use]
    pub fn new(store: Store, source: Arc<dyn QuoteSource>, ttl_hours: i64) -> Self {
        Self {
            store,
            source,
            ttl: chrono::Duration::try_hours(ttl_hours).unwrap_or(chrono::Duration::MAX),
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the fresh cached quotes for the key, or generates, stores and
    /// returns a new set. Lookups for the same key are serialized so
    /// concurrent misses store a single set.
    pub async fn get_pricing(
        &self,
        drug_name: &str,
        zip_code: &str,
    ) -> Result<Vec<PricingQuote>, PricingError> {
        let lock = self.key_lock(drug_name, zip_code);
        let _guard = lock.lock().await;

        let since = Utc::now()
            .checked_sub_signed(self.ttl)
            .ok_or_else(|| PricingError("cache TTL out of range".to_string()))?;
        let cached = self.store.get_fresh_quotes(drug_name, zip_code, since).await?;

        if !cached.is_empty() {
            metrics::counter!("pricing_cache_hits_total").increment(1);
            debug!(drug = %drug_name, zip = %zip_code, rows = cached.len(), "Pricing cache hit");
            return cached.into_iter().map(quote_from_row).collect();
        }

        metrics::counter!("pricing_cache_misses_total").increment(1);
        debug!(drug = %drug_name, zip = %zip_code, "Pricing cache miss, generating quotes");

        let quotes = self.source.quotes(drug_name, zip_code).await?;
        self.store
            .cache_quotes(drug_name, zip_code, &quotes, Utc::now())
            .await?;

        Ok(quotes)
    }

    fn key_lock(&self, drug_name: &str, zip_code: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .key_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Drop locks nobody is holding or waiting on.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        locks
            .entry((drug_name.to_string(), zip_code.to_string()))
            .or_default()
            .clone()
    }
}

fn quote_from_row(row: pricing_cache::Model) -> Result<PricingQuote, PricingError> {
    let plan_type: PlanType = row.plan_type.parse()?;
    let pharmacy_type: PharmacyType = row.pharmacy_type.parse()?;
    Ok(PricingQuote::new(plan_type, pharmacy_type, row.cost))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::memory_store;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteSource for CountingSource {
        async fn quotes(&self, _: &str, _: &str) -> anyhow::Result<Vec<PricingQuote>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok(generate_quotes(&mut StdRng::seed_from_u64(7)))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl QuoteSource for FailingSource {
        async fn quotes(&self, _: &str, _: &str) -> anyhow::Result<Vec<PricingQuote>> {
            anyhow::bail!("pricing feed unavailable")
        }
    }

    #[test]
    fn test_generate_covers_every_combination() {
        let quotes = generate_quotes(&mut StdRng::seed_from_u64(42));
        assert_eq!(quotes.len(), 9);

        let combos: HashSet<_> = quotes.iter().map(|q| (q.plan_type, q.pharmacy_type)).collect();
        assert_eq!(combos.len(), 9);

        for q in &quotes {
            assert!(q.cost >= BASE_COST_MIN * MULTIPLIER_MIN - 0.01);
            assert!(q.cost <= BASE_COST_MAX * MULTIPLIER_MAX + 0.01);
            assert!((q.copay - (q.cost * 0.2 * 100.0).round() / 100.0).abs() < 1e-9);
        }
    }

    #[tokio::test]
    async fn test_first_call_generates_nine_quotes() {
        let service = PricingService::new(memory_store().await, Arc::new(SyntheticQuoteSource), 24);

        let quotes = service.get_pricing("Lipitor", "10001").await.unwrap();
        assert_eq!(quotes.len(), 9);
        assert!(quotes.iter().all(|q| q.cost > 0.0));
    }

    #[tokio::test]
    async fn test_second_call_returns_identical_cached_quotes() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let service = PricingService::new(memory_store().await, source.clone(), 24);

        let first = service.get_pricing("Lipitor", "10001").await.unwrap();
        let second = service.get_pricing("Lipitor", "10001").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // Different zip is a different key.
        service.get_pricing("Lipitor", "90210").await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_quotes_are_regenerated_but_kept() {
        let store = memory_store().await;
        let stale = generate_quotes(&mut StdRng::seed_from_u64(1));
        store
            .cache_quotes("Lipitor", "10001", &stale, Utc::now() - chrono::Duration::hours(25))
            .await
            .unwrap();

        let service = PricingService::new(store.clone(), Arc::new(SyntheticQuoteSource), 24);
        let quotes = service.get_pricing("Lipitor", "10001").await.unwrap();

        assert_eq!(quotes.len(), 9);
        assert_eq!(store.count_cached_quotes("Lipitor", "10001").await.unwrap(), 18);
    }

    #[tokio::test]
    async fn test_concurrent_misses_store_one_set() {
        let store = memory_store().await;
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let service = Arc::new(PricingService::new(store.clone(), source.clone(), 24));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.get_pricing("Lipitor", "10001").await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().len(), 9);
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.count_cached_quotes("Lipitor", "10001").await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_is_an_error() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
        });
        let service = PricingService::new(memory_store().await, source.clone(), 2_000_000_000_000);

        let err = service.get_pricing("Lipitor", "10001").await.unwrap_err();
        assert_eq!(err.to_string(), "Error getting pricing: cache TTL out of range");
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_source_failure_is_reported() {
        let service = PricingService::new(memory_store().await, Arc::new(FailingSource), 24);

        let err = service.get_pricing("Lipitor", "10001").await.unwrap_err();
        assert_eq!(err.to_string(), "Error getting pricing: pricing feed unavailable");
    }
}
