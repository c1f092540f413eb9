use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Freshness lookups filter on the key and compare created_at.
        conn.execute_unprepared(
            "CREATE INDEX IF NOT EXISTS idx_pricing_cache_lookup ON pricing_cache(drug_name, zip_code, created_at)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_pricing_cache_lookup")
            .await?;

        Ok(())
    }
}
