use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::clients::openfda::{DrugLabelSource, LabelQuery, LabelResult, join_values};
use crate::constants::alternatives::{AVAILABILITY, MAX_CANDIDATES, SAVINGS_MAX, SAVINGS_MIN};
use crate::models::{Alternative, round_tenths};

#[derive(Debug, Error)]
#[error("Error getting alternatives: {0}")]
pub struct AlternativesError(pub String);

impl From<anyhow::Error> for AlternativesError {
    fn from(err: anyhow::Error) -> Self {
        Self(format!("{err:#}"))
    }
}

/// Suggests generic drugs sharing the requested generic name. Uncached.
pub struct AlternativesService {
    source: Arc<dyn DrugLabelSource>,
    search_limit: u32,
}

impl AlternativesService {
    #[must_use]
    pub fn new(source: Arc<dyn DrugLabelSource>, search_limit: u32) -> Self {
        Self {
            source,
            search_limit,
        }
    }

    /// An upstream with no matches yields an empty list, not an error.
    pub async fn find_alternatives(
        &self,
        drug_name: &str,
    ) -> Result<Vec<Alternative>, AlternativesError> {
        let results = self
            .source
            .search(&LabelQuery::Generic(drug_name.to_string()), self.search_limit)
            .await
            .inspect_err(|e| warn!(drug = %drug_name, "openFDA generic search failed: {e:#}"))?;

        Ok(select_alternatives(drug_name, &results, &mut rand::rng()))
    }
}

/// Looks at the first few results only. A candidate is kept when its joined
/// generic name is non-empty and differs from `drug_name`.
pub fn select_alternatives<R: Rng>(
    drug_name: &str,
    results: &[LabelResult],
    rng: &mut R,
) -> Vec<Alternative> {
    results
        .iter()
        .take(MAX_CANDIDATES)
        .filter_map(|result| {
            let name = result
                .openfda
                .generic_name
                .as_deref()
                .map(join_values)
                .unwrap_or_default();

            (!name.is_empty() && name != drug_name).then(|| Alternative {
                name,
                estimated_savings: round_tenths(rng.random_range(SAVINGS_MIN..=SAVINGS_MAX)),
                availability: AVAILABILITY.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{StubLabelSource, label};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_query_name_is_never_suggested() {
        let results = vec![
            label(&["Glucophage"], &["metformin"]),
            label(&["Glumetza"], &["metformin hydrochloride"]),
            label(&["Fortamet"], &[]),
        ];

        let alternatives = select_alternatives("metformin", &results, &mut StdRng::seed_from_u64(3));

        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].name, "metformin hydrochloride");
        assert_eq!(alternatives[0].availability, "Available");
        assert!((20.0..=70.0).contains(&alternatives[0].estimated_savings));
    }

    #[test]
    fn test_only_first_three_results_are_considered() {
        let results = vec![
            label(&["A"], &["alpha"]),
            label(&["B"], &["beta"]),
            label(&["C"], &["gamma"]),
            label(&["D"], &["delta"]),
            label(&["E"], &["epsilon"]),
        ];

        let alternatives = select_alternatives("statin", &results, &mut StdRng::seed_from_u64(9));
        let names: Vec<_> = alternatives.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_savings_has_one_decimal() {
        let results = vec![label(&["Zocor"], &["simvastatin"])];
        let alternatives = select_alternatives("Zocor", &results, &mut StdRng::seed_from_u64(11));
        let savings = alternatives[0].estimated_savings;
        assert!(((savings * 10.0).round() - savings * 10.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_find_alternatives_queries_generic_name() {
        let source = Arc::new(StubLabelSource::returning(vec![label(
            &["Lipitor"],
            &["atorvastatin calcium"],
        )]));
        let service = AlternativesService::new(source.clone(), 5);

        let alternatives = service.find_alternatives("atorvastatin").await.unwrap();
        assert_eq!(alternatives.len(), 1);
        assert_eq!(
            source.queries(),
            vec![(LabelQuery::Generic("atorvastatin".to_string()), 5)]
        );
    }

    #[tokio::test]
    async fn test_empty_upstream_gives_empty_list() {
        let service = AlternativesService::new(Arc::new(StubLabelSource::returning(vec![])), 5);
        assert!(service.find_alternatives("Lipitor").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let service = AlternativesService::new(Arc::new(StubLabelSource::failing("connection refused")), 5);

        let err = service.find_alternatives("Lipitor").await.unwrap_err();
        assert_eq!(err.to_string(), "Error getting alternatives: connection refused");
    }
}
