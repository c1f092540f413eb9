//! Stub label source shared by the service unit tests.

use crate::clients::openfda::{DrugLabelSource, LabelQuery, LabelResult, OpenFdaFields};
use crate::db::Store;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn label(brand: &[&str], generic: &[&str]) -> LabelResult {
    let owned = |v: &[&str]| v.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    LabelResult {
        openfda: OpenFdaFields {
            brand_name: Some(owned(brand)),
            generic_name: Some(owned(generic)),
            product_ndc: Some(vec!["0071-0155".to_string(), "0071-0156".to_string()]),
            manufacturer_name: Some(vec!["Parke-Davis".to_string()]),
        },
    }
}

/// Returns canned results and records every query it receives.
#[derive(Default)]
pub struct StubLabelSource {
    results: Vec<LabelResult>,
    fail_with: Option<String>,
    calls: AtomicUsize,
    queries: Mutex<Vec<(LabelQuery, u32)>>,
}

impl StubLabelSource {
    pub fn returning(results: Vec<LabelResult>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<(LabelQuery, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DrugLabelSource for StubLabelSource {
    async fn search(&self, query: &LabelQuery, limit: u32) -> anyhow::Result<Vec<LabelResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push((query.clone(), limit));

        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }

        Ok(self.results.iter().take(limit as usize).cloned().collect())
    }
}

pub async fn memory_store() -> Store {
    Store::new("sqlite::memory:").await.unwrap()
}
