use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PricingCache::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PricingCache::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PricingCache::DrugName).string().not_null())
                    .col(ColumnDef::new(PricingCache::ZipCode).string().not_null())
                    .col(ColumnDef::new(PricingCache::PlanType).string().not_null())
                    .col(ColumnDef::new(PricingCache::PharmacyType).string().not_null())
                    .col(ColumnDef::new(PricingCache::Cost).double().not_null())
                    .col(
                        ColumnDef::new(PricingCache::CreatedAt)
                            .string()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PricingCache::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PricingCache {
    Table,
    Id,
    DrugName,
    ZipCode,
    PlanType,
    PharmacyType,
    Cost,
    CreatedAt,
}
