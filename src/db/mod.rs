use crate::config::NameMatch;
use crate::entities::pricing_cache;
use crate::models::{DrugRecord, PricingQuote};
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::sqlx::sqlite::SqlitePoolOptions;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Formats a timestamp the way every `created_at` column stores it.
///
/// Fixed-width UTC so that string comparison in SQL orders chronologically.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        let in_memory = path_str.starts_with(":memory:");
        if !in_memory {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let conn = if in_memory {
            Self::connect_in_memory(db_url).await?
        } else {
            let mut opt = ConnectOptions::new(db_url.to_string());
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .connect_timeout(Duration::from_secs(10))
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600))
                .sqlx_logging(false);

            Database::connect(opt).await?
        };

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// An in-memory database lives only as long as its connection, so the
    /// pool holds exactly one and never recycles it.
    async fn connect_in_memory(db_url: &str) -> Result<DatabaseConnection> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(db_url)
            .await?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    fn drug_repo(&self) -> repositories::drug::DrugRepository {
        repositories::drug::DrugRepository::new(self.conn.clone())
    }

    fn pricing_repo(&self) -> repositories::pricing::PricingRepository {
        repositories::pricing::PricingRepository::new(self.conn.clone())
    }

    pub async fn find_drug(&self, name: &str, policy: NameMatch) -> Result<Option<DrugRecord>> {
        self.drug_repo().find(name, policy).await
    }

    pub async fn save_drug(&self, record: &DrugRecord) -> Result<()> {
        self.drug_repo().upsert(record).await
    }

    pub async fn get_fresh_quotes(
        &self,
        drug_name: &str,
        zip_code: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<pricing_cache::Model>> {
        self.pricing_repo()
            .fresh_quotes(drug_name, zip_code, &format_timestamp(since))
            .await
    }

    pub async fn cache_quotes(
        &self,
        drug_name: &str,
        zip_code: &str,
        quotes: &[PricingQuote],
        created_at: DateTime<Utc>,
    ) -> Result<()> {
        self.pricing_repo()
            .insert_quotes(drug_name, zip_code, quotes, &format_timestamp(created_at))
            .await
    }

    pub async fn count_cached_quotes(&self, drug_name: &str, zip_code: &str) -> Result<u64> {
        self.pricing_repo().count_for_key(drug_name, zip_code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PharmacyType, PlanType};

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn record(name: &str, created_at: &str) -> DrugRecord {
        DrugRecord {
            name: name.to_string(),
            generic_name: "atorvastatin calcium".to_string(),
            brand_name: name.to_string(),
            ndc: "0071-0155".to_string(),
            manufacturer: "Parke-Davis".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_in_memory_store_keeps_its_tables() {
        let store = memory_store().await;
        store.save_drug(&record("Lipitor", "2026-01-01T00:00:00.000000Z")).await.unwrap();

        let options = store.conn.get_sqlite_connection_pool().options();
        assert_eq!(options.get_max_connections(), 1);
        assert!(options.get_idle_timeout().is_none());
        assert!(options.get_max_lifetime().is_none());

        assert!(store.find_drug("Lipitor", NameMatch::Exact).await.unwrap().is_some());
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let a = format_timestamp(DateTime::from_timestamp(0, 0).unwrap());
        let b = format_timestamp(DateTime::from_timestamp(1_700_000_000, 5_000).unwrap());
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert!(a.ends_with('Z'));
    }

    #[tokio::test]
    async fn test_save_drug_replaces_existing_record() {
        let store = memory_store().await;
        store.save_drug(&record("Lipitor", "2026-01-01T00:00:00.000000Z")).await.unwrap();

        let mut updated = record("Lipitor", "2026-02-01T00:00:00.000000Z");
        updated.manufacturer = "Viatris".to_string();
        store.save_drug(&updated).await.unwrap();

        let found = store
            .find_drug("Lipitor", NameMatch::Exact)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_exact_match_ignores_substrings() {
        let store = memory_store().await;
        store.save_drug(&record("Lipitor 20mg", "2026-01-01T00:00:00.000000Z")).await.unwrap();

        assert!(store.find_drug("Lipitor", NameMatch::Exact).await.unwrap().is_none());
        assert!(store.find_drug("lipitor 20mg", NameMatch::Exact).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_contains_match_prefers_shortest_name() {
        let store = memory_store().await;
        store.save_drug(&record("Lipitor 20mg tablets", "2026-01-01T00:00:00.000000Z")).await.unwrap();
        store.save_drug(&record("Lipitor 20mg", "2026-01-02T00:00:00.000000Z")).await.unwrap();
        store.save_drug(&record("Zocor", "2026-01-03T00:00:00.000000Z")).await.unwrap();

        let found = store
            .find_drug("Lipitor", NameMatch::Contains)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Lipitor 20mg");

        // Case-sensitive and literal.
        assert!(store.find_drug("lipitor", NameMatch::Contains).await.unwrap().is_none());
        assert!(store.find_drug("Lip%", NameMatch::Contains).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fresh_quotes_excludes_stale_rows() {
        let store = memory_store().await;
        let now = Utc::now();
        let quotes = vec![PricingQuote::new(
            PlanType::PartDStandard,
            PharmacyType::Retail,
            120.5,
        )];

        store
            .cache_quotes("Lipitor", "10001", &quotes, now - chrono::Duration::hours(30))
            .await
            .unwrap();

        let fresh = store
            .get_fresh_quotes("Lipitor", "10001", now - chrono::Duration::hours(24))
            .await
            .unwrap();
        assert!(fresh.is_empty());

        store.cache_quotes("Lipitor", "10001", &quotes, now).await.unwrap();
        let fresh = store
            .get_fresh_quotes("Lipitor", "10001", now - chrono::Duration::hours(24))
            .await
            .unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].plan_type, "Medicare Part D Standard");

        // Stale rows are kept.
        assert_eq!(store.count_cached_quotes("Lipitor", "10001").await.unwrap(), 2);
    }
}
