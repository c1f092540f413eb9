use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Drugs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Drugs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Drugs::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Drugs::GenericName).string().not_null())
                    .col(ColumnDef::new(Drugs::BrandName).string().not_null())
                    .col(ColumnDef::new(Drugs::Ndc).text().not_null())
                    .col(ColumnDef::new(Drugs::Manufacturer).text().not_null())
                    .col(
                        ColumnDef::new(Drugs::CreatedAt)
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
            .drop_table(Table::drop().table(Drugs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Drugs {
    Table,
    Id,
    Name,
    GenericName,
    BrandName,
    Ndc,
    Manufacturer,
    CreatedAt,
}
