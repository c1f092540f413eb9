use sea_orm_migration::prelude::*;

mod m20260301_create_drugs;
mod m20260301_create_pricing_cache;
mod m20260302_pricing_cache_lookup_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_create_drugs::Migration),
            Box::new(m20260301_create_pricing_cache::Migration),
            Box::new(m20260302_pricing_cache_lookup_index::Migration),
        ]
    }
}
