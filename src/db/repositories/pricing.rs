use crate::entities::{prelude::*, pricing_cache};
use crate::models::PricingQuote;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

pub struct PricingRepository {
    conn: DatabaseConnection,
}

impl PricingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Rows for the exact key created strictly after `since`, in insertion order.
    pub async fn fresh_quotes(
        &self,
        drug_name: &str,
        zip_code: &str,
        since: &str,
    ) -> Result<Vec<pricing_cache::Model>> {
        let rows = PricingCache::find()
            .filter(pricing_cache::Column::DrugName.eq(drug_name))
            .filter(pricing_cache::Column::ZipCode.eq(zip_code))
            .filter(pricing_cache::Column::CreatedAt.gt(since))
            .order_by_asc(pricing_cache::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Appends one row per quote in a single transaction.
    pub async fn insert_quotes(
        &self,
        drug_name: &str,
        zip_code: &str,
        quotes: &[PricingQuote],
        created_at: &str,
    ) -> Result<()> {
        if quotes.is_empty() {
            return Ok(());
        }

        let models: Vec<pricing_cache::ActiveModel> = quotes
            .iter()
            .map(|q| pricing_cache::ActiveModel {
                drug_name: Set(drug_name.to_string()),
                zip_code: Set(zip_code.to_string()),
                plan_type: Set(q.plan_type.as_str().to_string()),
                pharmacy_type: Set(q.pharmacy_type.as_str().to_string()),
                cost: Set(q.cost),
                created_at: Set(created_at.to_string()),
                ..Default::default()
            })
            .collect();

        let txn = self.conn.begin().await?;
        PricingCache::insert_many(models).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    /// Total stored rows for a key, stale ones included.
    pub async fn count_for_key(&self, drug_name: &str, zip_code: &str) -> Result<u64> {
        let count = PricingCache::find()
            .filter(pricing_cache::Column::DrugName.eq(drug_name))
            .filter(pricing_cache::Column::ZipCode.eq(zip_code))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}
